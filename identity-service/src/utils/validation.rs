use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::dtos::ErrorResponse;

/// JSON body extractor that applies the DTO's `validator` rules before the
/// handler runs. A body that does not parse is a 400; one that parses but
/// breaks a rule is a 422.
pub struct ValidatedJson<T>(pub T);

fn reject(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => {
                return Err(reject(
                    StatusCode::BAD_REQUEST,
                    format!("Malformed request body: {}", rejection.body_text()),
                ))
            }
        };

        if let Err(errors) = value.validate() {
            return Err(reject(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Validation error: {}", errors),
            ));
        }

        Ok(ValidatedJson(value))
    }
}

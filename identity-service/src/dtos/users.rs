use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sam Member")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "sam@example.com")]
    pub email: String,
}

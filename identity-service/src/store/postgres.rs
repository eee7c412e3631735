//! PostgreSQL store implementations backed by sqlx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::models::{Admin, ManagedUser};
use crate::store::{AdminStore, ManagedUserStore, StoreError};

fn map_sqlx(e: sqlx::Error) -> StoreError {
    let unique = e
        .as_database_error()
        .map(|d| d.is_unique_violation())
        .unwrap_or(false);
    if unique {
        StoreError::Duplicate
    } else {
        StoreError::Backend(anyhow::anyhow!(e))
    }
}

#[derive(Clone)]
pub struct PostgresAdminStore {
    pool: PgPool,
}

impl PostgresAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PostgresAdminStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, email, name, password_hash, otp_code, otp_expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(admin.id)
        .bind(&admin.email)
        .bind(&admin.name)
        .bind(&admin.password_hash)
        .bind(&admin.otp_code)
        .bind(admin.otp_expires_at)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM admins WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn set_otp(
        &self,
        admin_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE admins SET otp_code = $2, otp_expires_at = $3 WHERE id = $1")
            .bind(admin_id)
            .bind(code)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn update_password_and_clear_otp(
        &self,
        admin_id: Uuid,
        password_hash: &str,
        expected_code: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET password_hash = $2, otp_code = NULL, otp_expires_at = NULL
            WHERE id = $1 AND otp_code = $3
            "#,
        )
        .bind(admin_id)
        .bind(password_hash)
        .bind(expected_code)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }
}

#[derive(Clone)]
pub struct PostgresManagedUserStore {
    pool: PgPool,
}

impl PostgresManagedUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagedUserStore for PostgresManagedUserStore {
    async fn insert(&self, user: &ManagedUser) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO managed_users (id, name, email, owner_admin_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.owner_admin_id)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ManagedUser>, StoreError> {
        sqlx::query_as::<_, ManagedUser>("SELECT * FROM managed_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn exists_for_owner(
        &self,
        email: &str,
        owner_admin_id: Uuid,
    ) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM managed_users WHERE email = $1 AND owner_admin_id = $2)",
        )
        .bind(email)
        .bind(owner_admin_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn list_by_owner(&self, owner_admin_id: Uuid) -> Result<Vec<ManagedUser>, StoreError> {
        sqlx::query_as::<_, ManagedUser>(
            "SELECT * FROM managed_users WHERE owner_admin_id = $1 ORDER BY created_at",
        )
        .bind(owner_admin_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM managed_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }
}

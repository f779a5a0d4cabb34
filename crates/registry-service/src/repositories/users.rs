//! User repository.
//!
//! The two statements of the user registry: insert on the write primary,
//! list on the read replica.

use crate::errors::RegistryError;
use crate::models::User;
use sqlx::PgPool;

/// Insert a user and return the stored row.
pub async fn create_user(pool: &PgPool, name: &str) -> Result<User, RegistryError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name)
        VALUES ($1)
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|e| RegistryError::Database(format!("Failed to create user: {}", e)))?;

    Ok(user)
}

/// List all users ordered by id.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, RegistryError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| RegistryError::Database(format!("Failed to list users: {}", e)))?;

    Ok(users)
}

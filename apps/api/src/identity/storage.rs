use sqlx::PgPool;

use crate::errors::AppError;
use crate::identity::VerifiedIdentity;
use crate::models::user::User;

/// Mirrors a verified identity into `users`, creating the row on first
/// sight. The update arm keeps the stored email when the provider omits
/// one, so a token without an email claim never wipes a known address.
pub async fn upsert_user(pool: &PgPool, identity: &VerifiedIdentity) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET
            email = COALESCE(EXCLUDED.email, users.email),
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(&identity.id)
    .bind(&identity.email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Looks up a mirrored user by provider subject id.
pub async fn get_user(pool: &PgPool, user_id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

//! User and session database operations (credential store)
//!
//! Passwords are hashed with Argon2id before storage and never leave this
//! module in any other form. Bearer tokens are opaque random strings held in
//! the auth_sessions table.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::RngCore;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::model::User;
use crate::{Error, Result};

/// Create a new user with a freshly hashed password.
///
/// The email is trimmed and lowercased before storage so uniqueness holds
/// regardless of the spelling the caller used.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    let user = User {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        email: normalize_email(email),
        password_hash: hash_password(password)?,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id.to_string())
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return Error::Conflict("email already registered".to_string());
            }
        }
        Error::Database(e)
    })?;

    Ok(user)
}

/// Verify an email/password pair. Returns the identity on success; a missing
/// user and a wrong password are indistinguishable to the caller.
pub async fn verify_credentials(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let user = row_to_user(&row)?;
    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Open a bearer session for a user and return the opaque token
pub async fn create_session(pool: &SqlitePool, user_id: Uuid) -> Result<String> {
    let token = generate_token();

    sqlx::query("INSERT INTO auth_sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a bearer token to its user, or None for unknown tokens
pub async fn user_for_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.created_at
        FROM auth_sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| Error::Internal(format!("invalid user id in database: {}", e)))?,
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: parse_timestamp(&created_at)?,
    })
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("invalid timestamp in database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[tokio::test]
    async fn create_then_verify_roundtrip() {
        let pool = open_in_memory().await.unwrap();
        let user = create_user(&pool, "Jane", "Jane@Example.COM ", "hunter22")
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");

        let verified = verify_credentials(&pool, "jane@example.com", "hunter22")
            .await
            .unwrap()
            .expect("credentials should verify");
        assert_eq!(verified.id, user.id);

        let wrong = verify_credentials(&pool, "jane@example.com", "hunter23")
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let pool = open_in_memory().await.unwrap();
        create_user(&pool, "A", "dup@example.com", "pw-one").await.unwrap();

        let err = create_user(&pool, "B", "DUP@example.com", "pw-two")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn token_resolves_to_its_user() {
        let pool = open_in_memory().await.unwrap();
        let user = create_user(&pool, "Jane", "jane@example.com", "hunter22")
            .await
            .unwrap();

        let token = create_session(&pool, user.id).await.unwrap();
        let resolved = user_for_token(&pool, &token).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        assert!(user_for_token(&pool, "not-a-token").await.unwrap().is_none());
    }
}

//! Registration and login endpoints
//!
//! Both hand out an opaque bearer token that the inspection routes require.
//! Credential verification lives in the common credential store; these
//! handlers only shape requests and responses.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::state::AppState;
use pdc_common::db::users;
use pdc_common::model::User;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    if request.name.trim().is_empty() {
        return Err(Error::BadRequest("Name is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(Error::BadRequest("Email is required".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(Error::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let user = users::create_user(&state.pool, &request.name, &request.email, &request.password)
        .await
        .map_err(Error::from)?;
    let token = users::create_session(&state.pool, user.id)
        .await
        .map_err(Error::from)?;

    info!("Registered user {}", user.email);
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = users::verify_credentials(&state.pool, &request.email, &request.password)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

    let token = users::create_session(&state.pool, user.id)
        .await
        .map_err(Error::from)?;

    Ok(Json(AuthResponse { token, user }))
}

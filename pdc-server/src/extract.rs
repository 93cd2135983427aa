//! Bearer credential extractor
//!
//! Every inspection route takes an `AuthUser` argument; extraction resolves
//! the Authorization header to the owning user or rejects with 401 before the
//! handler runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::Error;
use crate::state::AppState;
use pdc_common::db::users;
use pdc_common::model::User;

/// The authenticated owner of the request
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Error::Unauthorized("Missing bearer token".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("Malformed authorization header".to_string()))?;

        let user = users::user_for_token(&state.pool, token)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::Unauthorized("Invalid bearer token".to_string()))?;

        Ok(AuthUser(user))
    }
}

//! Inspection CRUD endpoints
//!
//! All routes are scoped to the authenticated owner; a record belonging to
//! another user is indistinguishable from a missing one. Record identifiers
//! are opaque strings on the wire; anything that is not a known id of the
//! caller's reports not-found.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::extract::AuthUser;
use crate::state::AppState;
use pdc_common::db::inspections;
use pdc_common::model::{Inspection, InspectionPatch};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct InspectionListResponse {
    pub inspections: Vec<Inspection>,
}

#[derive(Debug, Serialize)]
pub struct InspectionResponse {
    pub inspection: Inspection,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn not_found() -> Error {
    Error::NotFound("Inspection not found".to_string())
}

/// Opaque-id parse: an unparseable id is simply a record that does not exist
fn parse_record_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| not_found())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/inspections
pub async fn list_inspections(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<InspectionListResponse>> {
    let records = inspections::list(&state.pool, user.id)
        .await
        .map_err(Error::from)?;
    Ok(Json(InspectionListResponse {
        inspections: records,
    }))
}

/// GET /api/inspections/:id
pub async fn get_inspection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<InspectionResponse>> {
    let id = parse_record_id(&id)?;
    let record = inspections::get(&state.pool, user.id, id)
        .await
        .map_err(Error::from)?
        .ok_or_else(not_found)?;
    Ok(Json(InspectionResponse { inspection: record }))
}

/// POST /api/inspections
pub async fn create_inspection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(patch): Json<InspectionPatch>,
) -> Result<(StatusCode, Json<InspectionResponse>)> {
    let record = inspections::create(&state.pool, user.id, &patch)
        .await
        .map_err(Error::from)?;
    info!("Created inspection {} for {}", record.id, user.email);
    Ok((
        StatusCode::CREATED,
        Json(InspectionResponse { inspection: record }),
    ))
}

/// PUT /api/inspections/:id
pub async fn update_inspection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<InspectionPatch>,
) -> Result<Json<InspectionResponse>> {
    let id = parse_record_id(&id)?;
    let record = inspections::update(&state.pool, user.id, id, &patch)
        .await
        .map_err(Error::from)?
        .ok_or_else(not_found)?;
    Ok(Json(InspectionResponse { inspection: record }))
}

/// DELETE /api/inspections/:id
pub async fn delete_inspection(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_record_id(&id)?;
    let deleted = inspections::delete(&state.pool, user.id, id)
        .await
        .map_err(Error::from)?;
    if !deleted {
        return Err(not_found());
    }
    Ok(Json(MessageResponse {
        message: "Inspection deleted successfully".to_string(),
    }))
}

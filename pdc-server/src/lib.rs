//! pdc-server - HTTP API for the PDC Pro inspection tool
//!
//! JSON API over the inspection record store, plus registration/login and the
//! image upload relay. Inspection routes require a bearer credential naming
//! the owner.

pub mod api;
pub mod error;
pub mod extract;
pub mod relay;
pub mod state;

pub use error::{Error, Result};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Request bodies up to 10 MB (photo payloads)
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health::health_check))
        .route("/api/auth/register", post(api::auth::register))
        .route("/api/auth/login", post(api::auth::login))
        .route(
            "/api/inspections",
            get(api::inspections::list_inspections).post(api::inspections::create_inspection),
        )
        .route("/api/inspections/temp/upload", post(api::upload::upload_image))
        .route(
            "/api/inspections/:id",
            get(api::inspections::get_inspection)
                .put(api::inspections::update_inspection)
                .delete(api::inspections::delete_inspection),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

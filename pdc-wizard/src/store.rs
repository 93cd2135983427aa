//! Record store seam
//!
//! The wizard never talks to a transport directly; everything goes through
//! this trait. Production uses the HTTP `ApiClient`, tests use an in-memory
//! implementation.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use pdc_common::model::{Inspection, InspectionPatch};

/// Errors reported by a record store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record absent or not owned by the authenticated user
    #[error("Record not found")]
    NotFound,

    /// Bearer credential missing, expired or rejected
    #[error("Unauthorized")]
    Unauthorized,

    /// Transport-level failure (connection refused, timeout, bad payload)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API reported a failure
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable home of inspection records, as seen from the wizard
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Create a record from the given partial data and return it with its
    /// newly assigned id
    async fn create_record(&self, draft: &InspectionPatch) -> StoreResult<Inspection>;

    /// Load an existing record
    async fn fetch_record(&self, id: Uuid) -> StoreResult<Inspection>;

    /// Persist a (full or partial) update and return the stored record
    async fn save_record(&self, id: Uuid, patch: &InspectionPatch) -> StoreResult<Inspection>;
}

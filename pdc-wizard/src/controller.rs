//! Wizard controller
//!
//! Binds the in-memory inspection state to one durable record. A new capture
//! session creates its Draft record before accepting any edit, so there is
//! never client state without a durable counterpart. Every edit goes through
//! the pure update functions and is handed to the autosaver; only the final
//! complete action saves synchronously.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::autosave::{Autosaver, DEFAULT_QUIET};
use crate::state::{
    self, AdditionalChecksPatch, EngineConditionsPatch, ExteriorConditionPatch, ImagesPatch,
    VehicleDetailsPatch,
};
use crate::steps::Step;
use crate::store::{RecordStore, StoreResult};
use pdc_common::model::{Inspection, InspectionPatch, InspectionStatus};

/// One capture session over one inspection record
pub struct Wizard<S: RecordStore + ?Sized> {
    store: Arc<S>,
    record_id: Uuid,
    state: Inspection,
    step: Step,
    autosaver: Autosaver,
}

impl<S: RecordStore + ?Sized> Wizard<S> {
    /// Start a fresh capture session: creates an empty Draft record first,
    /// then binds all further operations to its id
    pub async fn begin(store: Arc<S>) -> StoreResult<Self> {
        Self::begin_with_quiet(store, DEFAULT_QUIET).await
    }

    /// `begin` with a custom autosave quiet period
    pub async fn begin_with_quiet(store: Arc<S>, quiet: Duration) -> StoreResult<Self> {
        let record = store.create_record(&InspectionPatch::default()).await?;
        Ok(Self::bind(store, record, quiet))
    }

    /// Resume editing an existing record
    pub async fn resume(store: Arc<S>, record_id: Uuid) -> StoreResult<Self> {
        Self::resume_with_quiet(store, record_id, DEFAULT_QUIET).await
    }

    /// `resume` with a custom autosave quiet period
    pub async fn resume_with_quiet(
        store: Arc<S>,
        record_id: Uuid,
        quiet: Duration,
    ) -> StoreResult<Self> {
        let record = store.fetch_record(record_id).await?;
        Ok(Self::bind(store, record, quiet))
    }

    fn bind(store: Arc<S>, record: Inspection, quiet: Duration) -> Self {
        let autosaver = Autosaver::spawn(store.clone(), record.id, quiet);
        Self {
            store,
            record_id: record.id,
            state: record,
            step: Step::first(),
            autosaver,
        }
    }

    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    pub fn state(&self) -> &Inspection {
        &self.state
    }

    // ------------------------------------------------------------------
    // Step navigation
    // ------------------------------------------------------------------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn next_step(&mut self) {
        self.step = self.step.next();
    }

    pub fn prev_step(&mut self) {
        self.step = self.step.prev();
    }

    // ------------------------------------------------------------------
    // Group-scoped edits (each schedules an autosave)
    // ------------------------------------------------------------------

    pub fn update_vehicle_details(&mut self, patch: &VehicleDetailsPatch) {
        self.apply(state::update_vehicle_details(&self.state, patch));
    }

    pub fn update_exterior_condition(&mut self, patch: &ExteriorConditionPatch) {
        self.apply(state::update_exterior_condition(&self.state, patch));
    }

    pub fn update_engine_conditions(&mut self, patch: &EngineConditionsPatch) {
        self.apply(state::update_engine_conditions(&self.state, patch));
    }

    pub fn update_additional_checks(&mut self, patch: &AdditionalChecksPatch) {
        self.apply(state::update_additional_checks(&self.state, patch));
    }

    pub fn update_images(&mut self, patch: &ImagesPatch) {
        self.apply(state::update_images(&self.state, patch));
    }

    fn apply(&mut self, next: Inspection) {
        self.state = next;
        self.autosaver.note_edit(self.state.clone());
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Mark the record Completed and persist the full record synchronously.
    ///
    /// Unlike autosave, a failure here surfaces to the caller; the record is
    /// not Completed until the store has acknowledged the write.
    pub async fn complete(&mut self) -> StoreResult<Inspection> {
        self.state.status = InspectionStatus::Completed;
        // Keep the autosave slot in step so a pending save cannot revert the
        // status with stale data
        self.autosaver.note_edit(self.state.clone());

        let saved = self
            .store
            .save_record(self.record_id, &InspectionPatch::from(&self.state))
            .await?;
        self.state = saved.clone();
        Ok(saved)
    }
}

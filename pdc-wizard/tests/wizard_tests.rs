//! Wizard controller and autosave behavior tests
//!
//! Run against an in-memory record store on a paused tokio clock, so the
//! debounce timing assertions are exact and fast.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::{sleep, Instant};
use uuid::Uuid;

use pdc_common::model::{ConditionItem, Inspection, InspectionPatch, InspectionStatus};
use pdc_wizard::state::{ExteriorConditionPatch, VehicleDetailsPatch};
use pdc_wizard::{RecordStore, Step, StoreError, StoreResult, Wizard};

// ============================================================================
// In-memory store
// ============================================================================

struct SaveEvent {
    at: Duration,
    snapshot: Inspection,
}

struct MemoryStore {
    records: Mutex<HashMap<Uuid, Inspection>>,
    saves: Mutex<Vec<SaveEvent>>,
    save_attempts: Mutex<u32>,
    fail_saves: AtomicBool,
    t0: Instant,
}

impl MemoryStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(HashMap::new()),
            saves: Mutex::new(Vec::new()),
            save_attempts: Mutex::new(0),
            fail_saves: AtomicBool::new(false),
            t0: Instant::now(),
        })
    }

    fn record(&self, id: Uuid) -> Option<Inspection> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    fn attempts(&self) -> u32 {
        *self.save_attempts.lock().unwrap()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_record(&self, draft: &InspectionPatch) -> StoreResult<Inspection> {
        let record = Inspection::new_draft(Utc::now()).merged(draft);
        self.records.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn fetch_record(&self, id: Uuid) -> StoreResult<Inspection> {
        self.record(id).ok_or(StoreError::NotFound)
    }

    async fn save_record(&self, id: Uuid, patch: &InspectionPatch) -> StoreResult<Inspection> {
        *self.save_attempts.lock().unwrap() += 1;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("connection refused".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        let record = records.get(&id).ok_or(StoreError::NotFound)?;
        let mut updated = record.merged(patch);
        updated.updated_at = Utc::now();
        records.insert(id, updated.clone());

        self.saves.lock().unwrap().push(SaveEvent {
            at: self.t0.elapsed(),
            snapshot: updated.clone(),
        });
        Ok(updated)
    }
}

const QUIET: Duration = Duration::from_millis(1000);

fn client_name_patch(name: &str) -> VehicleDetailsPatch {
    VehicleDetailsPatch {
        client_name: Some(name.to_string()),
        ..VehicleDetailsPatch::default()
    }
}

// ============================================================================
// Bootstrapping
// ============================================================================

#[tokio::test(start_paused = true)]
async fn begin_creates_draft_record_before_any_edit() {
    let store = MemoryStore::new();
    let wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();

    assert_eq!(store.record_count(), 1);
    let stored = store.record(wizard.record_id()).expect("draft exists");
    assert_eq!(stored.status, InspectionStatus::Draft);
    assert_eq!(wizard.state(), &stored);
    assert_eq!(wizard.step(), Step::VehicleDetails);
}

#[tokio::test(start_paused = true)]
async fn resume_loads_the_existing_record() {
    let store = MemoryStore::new();
    let existing = store
        .create_record(&InspectionPatch {
            vehicle_details: Some(pdc_common::model::VehicleDetails {
                client_name: "J. Doe".to_string(),
                ..Default::default()
            }),
            ..InspectionPatch::default()
        })
        .await
        .unwrap();

    let wizard = Wizard::resume_with_quiet(store.clone(), existing.id, QUIET)
        .await
        .unwrap();
    assert_eq!(wizard.state().vehicle_details.client_name, "J. Doe");
    assert_eq!(store.record_count(), 1);

    let missing = Wizard::resume_with_quiet(store, Uuid::new_v4(), QUIET).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));
}

// ============================================================================
// Debounced autosave
// ============================================================================

#[tokio::test(start_paused = true)]
async fn rapid_edits_coalesce_into_one_save_after_the_quiet_window() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();

    let t0 = Instant::now();

    // Edits at t=0, t=200ms, t=400ms
    wizard.update_vehicle_details(&client_name_patch("J"));
    sleep(Duration::from_millis(200)).await;
    wizard.update_vehicle_details(&client_name_patch("J."));
    sleep(Duration::from_millis(200)).await;
    wizard.update_vehicle_details(&client_name_patch("J. Doe"));

    // Nothing fires before the quiet window has elapsed
    sleep(Duration::from_millis(900)).await;
    assert_eq!(store.save_count(), 0);

    // ...then exactly one save, carrying the state as of t=400ms
    sleep(Duration::from_millis(700)).await;
    assert_eq!(store.save_count(), 1);

    let saves = store.saves.lock().unwrap();
    let event = &saves[0];
    let offset = event.at.checked_sub(t0.duration_since(store.t0)).unwrap();
    assert!(
        offset >= Duration::from_millis(1400) && offset < Duration::from_millis(1500),
        "save fired at {:?}, expected ~1400ms",
        offset
    );
    assert_eq!(event.snapshot.vehicle_details.client_name, "J. Doe");
}

#[tokio::test(start_paused = true)]
async fn separate_quiet_periods_fire_separate_saves() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();

    wizard.update_vehicle_details(&client_name_patch("First"));
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.save_count(), 1);

    wizard.update_vehicle_details(&client_name_patch("Second"));
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.save_count(), 2);

    let saves = store.saves.lock().unwrap();
    assert_eq!(saves[1].snapshot.vehicle_details.client_name, "Second");
}

#[tokio::test(start_paused = true)]
async fn autosave_failure_is_swallowed_and_editing_continues() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();
    store.fail_saves.store(true, Ordering::SeqCst);

    wizard.update_vehicle_details(&client_name_patch("J. Doe"));
    sleep(Duration::from_millis(1500)).await;

    // The save was attempted and failed; nothing surfaced, nothing stored
    assert_eq!(store.attempts(), 1);
    assert_eq!(store.save_count(), 0);
    let stored = store.record(wizard.record_id()).unwrap();
    assert_eq!(stored.vehicle_details.client_name, "");

    // Editing continues; once the store recovers, the next autosave lands
    store.fail_saves.store(false, Ordering::SeqCst);
    wizard.update_vehicle_details(&client_name_patch("J. Doe"));
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.save_count(), 1);
    let stored = store.record(wizard.record_id()).unwrap();
    assert_eq!(stored.vehicle_details.client_name, "J. Doe");
}

#[tokio::test(start_paused = true)]
async fn dropping_the_wizard_cancels_a_pending_autosave() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();

    wizard.update_vehicle_details(&client_name_patch("abandoned"));
    drop(wizard);
    sleep(Duration::from_millis(3000)).await;

    assert_eq!(store.attempts(), 0);
}

// ============================================================================
// Completion
// ============================================================================

#[tokio::test(start_paused = true)]
async fn complete_persists_the_full_record_synchronously() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();

    wizard.update_vehicle_details(&client_name_patch("J. Doe"));
    wizard.update_exterior_condition(&ExteriorConditionPatch {
        paint_condition: Some(ConditionItem::issue("scratch on door")),
        ..ExteriorConditionPatch::default()
    });

    // No waiting on the debounce: complete saves right away
    let saved = wizard.complete().await.unwrap();
    assert_eq!(saved.status, InspectionStatus::Completed);

    let stored = store.record(wizard.record_id()).unwrap();
    assert_eq!(stored.status, InspectionStatus::Completed);
    assert_eq!(stored.vehicle_details.client_name, "J. Doe");
    assert_eq!(
        stored.exterior_condition.paint_condition,
        ConditionItem::issue("scratch on door")
    );
}

#[tokio::test(start_paused = true)]
async fn complete_failure_surfaces_to_the_caller() {
    let store = MemoryStore::new();
    let mut wizard = Wizard::begin_with_quiet(store.clone(), QUIET).await.unwrap();
    store.fail_saves.store(true, Ordering::SeqCst);

    wizard.update_vehicle_details(&client_name_patch("J. Doe"));
    let result = wizard.complete().await;
    assert!(matches!(result, Err(StoreError::Transport(_))));
}

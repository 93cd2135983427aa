//! Debounced best-effort persistence
//!
//! Every edit publishes a full snapshot into a single watch slot; a
//! background task waits out a quiet period (restarted by each further edit)
//! and then issues one save carrying whatever the slot holds. The slot is the
//! per-record write queue of depth one: an edit landing while a save is in
//! flight replaces the pending snapshot rather than queueing behind it, and
//! the task never runs two saves concurrently.
//!
//! Autosave failures are logged and swallowed; the explicit complete action
//! in the controller is the only save whose failure reaches the user.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::RecordStore;
use pdc_common::model::{Inspection, InspectionPatch};

/// Quiet period with no edits before a save fires
pub const DEFAULT_QUIET: Duration = Duration::from_secs(1);

/// Handle to the autosave task for one bound record.
///
/// Dropping the handle cancels any pending quiet period without rolling back
/// writes that were already issued.
pub struct Autosaver {
    tx: watch::Sender<Option<Inspection>>,
    task: JoinHandle<()>,
}

impl Autosaver {
    /// Start the autosave task for `record_id`
    pub fn spawn<S>(store: Arc<S>, record_id: Uuid, quiet: Duration) -> Self
    where
        S: RecordStore + ?Sized,
    {
        let (tx, mut rx) = watch::channel(None::<Inspection>);

        let task = tokio::spawn(async move {
            loop {
                // Wait for the first edit since the last save
                if rx.changed().await.is_err() {
                    break;
                }

                // Each further edit restarts the quiet window
                loop {
                    match tokio::time::timeout(quiet, rx.changed()).await {
                        Ok(Ok(())) => continue,
                        Ok(Err(_)) => return,
                        Err(_) => break,
                    }
                }

                let Some(snapshot) = rx.borrow_and_update().clone() else {
                    continue;
                };

                let patch = InspectionPatch::from(&snapshot);
                match store.save_record(record_id, &patch).await {
                    Ok(_) => debug!("Auto-saved inspection draft {}", record_id),
                    Err(e) => warn!("Autosave for inspection {} failed: {}", record_id, e),
                }
            }
        });

        Self { tx, task }
    }

    /// Record an edit: replace the pending snapshot and (re)start the quiet
    /// window
    pub fn note_edit(&self, snapshot: Inspection) {
        self.tx.send_modify(|slot| *slot = Some(snapshot));
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! pdc-wizard - client-side capture wizard for PDC Pro
//!
//! Holds the in-progress inspection as an explicitly owned value with pure
//! group-scoped update functions, sequences the seven capture steps, and
//! keeps the draft durable through a debounced best-effort autosaver. The
//! record store behind the wizard is a trait seam; `ApiClient` is the HTTP
//! implementation against pdc-server.

pub mod autosave;
pub mod client;
pub mod controller;
pub mod state;
pub mod steps;
pub mod store;

pub use autosave::{Autosaver, DEFAULT_QUIET};
pub use client::ApiClient;
pub use controller::Wizard;
pub use steps::Step;
pub use store::{RecordStore, StoreError, StoreResult};

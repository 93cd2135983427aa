//! Database access
//!
//! SQLite-backed stores: users and bearer sessions (credential store) and the
//! per-user inspection records (record store). All queries use the sqlx
//! runtime API; nested condition groups are serialized as JSON text columns.

pub mod init;
pub mod inspections;
pub mod users;

pub use init::{init_database, open_in_memory};

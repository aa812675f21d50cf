//! One-Shield Network Log Indexer
//!
//! Two batch components for getting security-event CSV exports into a
//! search datastore:
//!
//! - [`provision`]: creates the `network-logs` index with its field mapping.
//! - [`transform`]: converts the CSV into bulk-ingest NDJSON.
//!
//! They share no runtime state; provision once, then ingest transform output.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod provision;
pub mod transform;

pub use error::{AppError, AppResult};

//! Core types for the gifsmith conversion worker: the event record model,
//! object-key path functions, and environment configuration.

pub mod config;
pub mod keys;
pub mod models;

pub use config::WorkerConfig;
pub use models::EventRecord;

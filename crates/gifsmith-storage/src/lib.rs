//! Object store abstraction for the conversion worker.
//!
//! The worker only needs two operations: fetch an object's bytes into a local
//! file and store a local file's bytes as an object. The [`ObjectStore`]
//! trait keeps the pipeline decoupled from the S3 SDK so tests can substitute
//! an in-memory store.

mod s3;
mod traits;

pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, StorageError, StorageResult};

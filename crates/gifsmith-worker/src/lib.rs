//! Conversion worker: downloads source objects named in S3 events, runs them
//! through the external ffmpeg binary to produce animated GIFs, and uploads
//! the results to the destination bucket.

pub mod exec;
pub mod handler;
pub mod pipeline;

pub use exec::{exec, ProcessOutcome};
pub use pipeline::RecordPipeline;

//! Lambda entry point: maps the incoming S3 event onto event records and
//! hands them to the pipeline.

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::LambdaEvent;

use gifsmith_core::EventRecord;

use crate::pipeline::RecordPipeline;

/// Extracts the bucket/key pairs from an S3 event.
///
/// Records missing a bucket name or object key are logged and skipped;
/// malformed input is a per-record failure, never a batch failure.
pub fn records_from_event(event: &S3Event) -> Vec<EventRecord> {
    event
        .records
        .iter()
        .filter_map(|record| {
            match (record.s3.bucket.name.as_deref(), record.s3.object.key.as_deref()) {
                (Some(bucket), Some(key)) => Some(EventRecord::new(bucket, key)),
                _ => {
                    tracing::warn!(
                        event_name = record.event_name.as_deref().unwrap_or(""),
                        "event record missing bucket name or object key; skipping"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Handles one invocation: processes the batch and returns the constant
/// acknowledgement. Per-record failures are visible only through logs.
pub async fn handle(
    pipeline: &RecordPipeline,
    event: LambdaEvent<S3Event>,
) -> Result<String, lambda_runtime::Error> {
    let payload = event.payload;
    tracing::info!(records = payload.records.len(), "received S3 event");

    let records = records_from_event(&payload);
    Ok(pipeline.process_batch(&records).await.to_string())
}

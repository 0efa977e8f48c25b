use std::sync::Arc;

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing_subscriber::EnvFilter;

use gifsmith_core::WorkerConfig;
use gifsmith_storage::S3ObjectStore;
use gifsmith_worker::{handler, RecordPipeline};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        // CloudWatch supplies timestamps
        .without_time()
        .init();

    let config = WorkerConfig::from_env()?;
    // A missing or non-executable conversion tool fails startup rather than
    // every record individually.
    config.verify_tool()?;
    tracing::info!(
        destination_bucket = %config.destination_bucket,
        tool_path = %config.tool_path.display(),
        scratch_dir = %config.scratch_dir.display(),
        "worker configured"
    );

    let store = Arc::new(S3ObjectStore::new(config.s3_endpoint.clone()).await);
    let pipeline = RecordPipeline::new(store, &config);

    lambda_runtime::run(service_fn(|event: LambdaEvent<S3Event>| {
        handler::handle(&pipeline, event)
    }))
    .await
}

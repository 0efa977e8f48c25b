//! Per-record conversion pipeline and batch processing.
//!
//! Each record runs download, convert, upload in sequence. A failure in any
//! step is contained at the record boundary; the scratch files are removed on
//! every exit path by scope-exit guards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use gifsmith_core::{keys, EventRecord, WorkerConfig};
use gifsmith_storage::ObjectStore;

use crate::exec::exec;

/// Output container format passed to the conversion tool.
const OUTPUT_FORMAT: &str = "gif";
/// Extension of the converted artifact.
const OUTPUT_EXTENSION: &str = "gif";

/// Acknowledgement returned to the trigger source once every record in a
/// batch has been attempted. Per-record failures surface in logs only.
pub const BATCH_ACK: &str = "Ok";

/// Converts the objects named in event records and uploads the results.
///
/// Constructed once at process start and reused across invocations.
pub struct RecordPipeline {
    store: Arc<dyn ObjectStore>,
    destination_bucket: String,
    tool_path: PathBuf,
    scratch_dir: PathBuf,
}

impl RecordPipeline {
    pub fn new(store: Arc<dyn ObjectStore>, config: &WorkerConfig) -> Self {
        Self {
            store,
            destination_bucket: config.destination_bucket.clone(),
            tool_path: config.tool_path.clone(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// Processes every record in order, independent of prior outcomes, and
    /// returns the constant acknowledgement.
    ///
    /// Records run strictly sequentially; scratch file names are derived from
    /// object key file names and are only collision-free within one
    /// sequential batch.
    pub async fn process_batch(&self, records: &[EventRecord]) -> &'static str {
        tracing::info!(records = records.len(), "processing batch");

        for record in records {
            if let Err(err) = self.process_record(record).await {
                tracing::error!(
                    bucket = %record.bucket,
                    key = %record.key,
                    error = ?err,
                    "record failed; continuing with next record"
                );
            }
        }

        BATCH_ACK
    }

    async fn process_record(&self, record: &EventRecord) -> Result<()> {
        let input_name = keys::file_name(&record.key);
        if input_name.is_empty() {
            bail!("object key has no file name component: {}", record.key);
        }
        let output_name = keys::with_extension(input_name, OUTPUT_EXTENSION);

        let input = ScratchFile::new(self.scratch_dir.join(input_name));
        let output = ScratchFile::new(self.scratch_dir.join(&output_name));

        tracing::info!(bucket = %record.bucket, key = %record.key, "downloading source object");
        self.store
            .download_to_file(&record.bucket, &record.key, input.path())
            .await
            .context("failed to download source object")?;

        let args = vec![
            "-i".to_string(),
            input.path().display().to_string(),
            "-f".to_string(),
            OUTPUT_FORMAT.to_string(),
            output.path().display().to_string(),
        ];
        let outcome = exec(&self.tool_path, &args).await?;
        if !outcome.success() {
            // Conversion failure is a per-record outcome, not a hard error;
            // the remaining records in the batch must still be attempted.
            tracing::warn!(
                exit_code = outcome.exit_code,
                stderr = %outcome.stderr,
                stdout = %outcome.stdout,
                "conversion tool failed; skipping upload"
            );
            return Ok(());
        }

        let target_key = keys::destination_key(&record.key, &output_name);
        tracing::info!(bucket = %self.destination_bucket, key = %target_key, "uploading converted object");
        self.store
            .upload_file(&self.destination_bucket, &target_key, output.path())
            .await
            .context("failed to upload converted object")?;

        Ok(())
    }
}

/// Scratch file that is removed when it goes out of scope.
///
/// Removal failures are logged at warn level and never escalated; a file
/// that was never created (for example when conversion failed before writing
/// its output) is not an error.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unable to delete scratch file"
                );
            }
        }
    }
}

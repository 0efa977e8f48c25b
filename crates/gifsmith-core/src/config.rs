//! Environment configuration for the conversion worker.
//!
//! The worker is configured entirely through environment variables, read once
//! at process start. The conversion tool path is pre-provisioned in the
//! runtime image (a Lambda layer mounts it under `/opt`).

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

const DEFAULT_TOOL_PATH: &str = "/opt/ffmpeg";
const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// Worker configuration, constructed once at startup and shared across
/// invocations.
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Bucket the converted artifacts are uploaded to.
    pub destination_bucket: String,
    /// Path to the ffmpeg binary performing the conversion.
    pub tool_path: PathBuf,
    /// Local ephemeral directory for temporary input/output files. The
    /// hosting environment clears it between invocations.
    pub scratch_dir: PathBuf,
    /// Custom endpoint URL for S3-compatible providers (MinIO etc.).
    pub s3_endpoint: Option<String>,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self> {
        let destination_bucket =
            env::var("ANIMATED_GIF_BUCKET").context("ANIMATED_GIF_BUCKET must be set")?;

        let tool_path = env::var("FFMPEG_PATH").unwrap_or_else(|_| DEFAULT_TOOL_PATH.to_string());
        validate_tool_path(&tool_path)?;

        let scratch_dir =
            env::var("SCRATCH_DIR").unwrap_or_else(|_| DEFAULT_SCRATCH_DIR.to_string());

        let s3_endpoint = env::var("S3_ENDPOINT").ok();

        Ok(Self {
            destination_bucket,
            tool_path: PathBuf::from(tool_path),
            scratch_dir: PathBuf::from(scratch_dir),
            s3_endpoint,
        })
    }

    /// Checks that the conversion tool exists and is executable.
    ///
    /// A missing or non-executable tool is an environment-configuration
    /// error: it fails startup rather than every record individually.
    pub fn verify_tool(&self) -> Result<()> {
        verify_executable(&self.tool_path)
    }
}

/// Rejects tool paths containing shell metacharacters or traversal sequences.
fn validate_tool_path(path: &str) -> Result<()> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(anyhow!(
            "Invalid FFMPEG_PATH: contains dangerous characters: {}",
            path
        ));
    }

    if path.contains("..") {
        return Err(anyhow!(
            "Invalid FFMPEG_PATH: contains directory traversal: {}",
            path
        ));
    }

    Ok(())
}

fn verify_executable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("conversion tool not found at {}", path.display()))?;

    if !metadata.is_file() {
        return Err(anyhow!(
            "conversion tool at {} is not a regular file",
            path.display()
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(anyhow!(
                "conversion tool at {} is not executable",
                path.display()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for all env-var handling; parallel tests sharing process
    // environment would race.
    #[test]
    fn from_env_defaults_and_required_variables() {
        env::remove_var("ANIMATED_GIF_BUCKET");
        env::remove_var("FFMPEG_PATH");
        env::remove_var("SCRATCH_DIR");
        env::remove_var("S3_ENDPOINT");

        let err = WorkerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("ANIMATED_GIF_BUCKET"));

        env::set_var("ANIMATED_GIF_BUCKET", "gifs");
        let config = WorkerConfig::from_env().unwrap();
        assert_eq!(config.destination_bucket, "gifs");
        assert_eq!(config.tool_path, PathBuf::from("/opt/ffmpeg"));
        assert_eq!(config.scratch_dir, PathBuf::from("/tmp"));
        assert_eq!(config.s3_endpoint, None);

        env::set_var("FFMPEG_PATH", "/usr/local/bin/ffmpeg");
        env::set_var("SCRATCH_DIR", "/var/scratch");
        env::set_var("S3_ENDPOINT", "http://localhost:9000");
        let config = WorkerConfig::from_env().unwrap();
        assert_eq!(config.tool_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.scratch_dir, PathBuf::from("/var/scratch"));
        assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));

        env::set_var("FFMPEG_PATH", "/opt/ffmpeg; rm -rf /");
        assert!(WorkerConfig::from_env().is_err());

        env::remove_var("ANIMATED_GIF_BUCKET");
        env::remove_var("FFMPEG_PATH");
        env::remove_var("SCRATCH_DIR");
        env::remove_var("S3_ENDPOINT");
    }

    #[test]
    fn rejects_dangerous_tool_paths() {
        assert!(validate_tool_path("/opt/ffmpeg").is_ok());
        assert!(validate_tool_path("/usr/local/bin/ffmpeg").is_ok());
        assert!(validate_tool_path("/opt/ffmpeg; rm -rf /").is_err());
        assert!(validate_tool_path("/opt/$(whoami)/ffmpeg").is_err());
        assert!(validate_tool_path("/opt/../etc/passwd").is_err());
    }

    #[test]
    fn verify_rejects_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_executable(&dir.path().join("ffmpeg")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[test]
    fn verify_checks_execute_permission() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("ffmpeg");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(verify_executable(&tool).is_err());

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(verify_executable(&tool).is_ok());
    }
}

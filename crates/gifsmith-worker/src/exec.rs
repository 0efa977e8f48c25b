//! External process runner.
//!
//! Runs an executable to completion with both output streams piped, and
//! returns the exit code together with the fully drained stream contents.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Exit code plus captured output of one external process invocation.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `program` with `args`, waits for it to exit, and returns its
/// [`ProcessOutcome`].
///
/// Both streams are drained on their own tasks before blocking on process
/// exit: a child that fills an unread pipe buffer would otherwise stall. A
/// process that cannot be started at all (missing file, no execute
/// permission) is an error, not an outcome.
pub async fn exec(program: &Path, args: &[String]) -> Result<ProcessOutcome> {
    tracing::info!(program = %program.display(), args = ?args, "executing");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start {}", program.display()))?;

    let mut stdout_pipe = child.stdout.take().context("child stdout was not piped")?;
    let mut stderr_pipe = child.stderr.take().context("child stderr was not piped")?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for {}", program.display()))?;

    let stdout = stdout_task
        .await
        .context("stdout drain task panicked")?
        .context("failed to read child stdout")?;
    let stderr = stderr_task
        .await
        .context("stderr drain task panicked")?
        .context("failed to read child stderr")?;

    Ok(ProcessOutcome {
        // code() is None when the child was killed by a signal
        exit_code: status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    })
}

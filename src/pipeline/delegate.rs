//! Delegation: spawn the upload script and wait for it.
//!
//! The child inherits stdin, stdout and stderr so its own progress output
//! and any interactive prompt (e.g. "reprocess existing document?") reach the
//! user unchanged. There is no timeout and no retry.

use crate::error::LaunchError;
use crate::pipeline::resolve::DelegateCommand;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{info, warn};

/// How the child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegateOutcome {
    /// Exit code; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    /// Wall-clock time between spawn and exit.
    pub elapsed_ms: u64,
}

impl DelegateOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawn `command`, block until it exits and report how it ended.
///
/// A non-zero exit is *not* an error here; only a failure to start the
/// process is.
pub async fn run_delegate(command: &DelegateCommand) -> Result<DelegateOutcome, LaunchError> {
    info!("Running: {}", command);

    let start = Instant::now();
    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| LaunchError::spawn_failed(command.program.display().to_string(), e))?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let outcome = DelegateOutcome {
        code: status.code(),
        elapsed_ms,
    };

    if outcome.success() {
        info!("Upload script finished in {}ms", elapsed_ms);
    } else {
        warn!("Upload script exited with {} after {}ms", status, elapsed_ms);
    }
    Ok(outcome)
}

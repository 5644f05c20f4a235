//! Launch entry points.
//!
//! [`launch`] runs the whole pipeline: validate the path, resolve the upload
//! script, spawn it and wait. [`prepare`] stops right before the spawn, which
//! is what `--dry-run` uses. [`launch_sync`] wraps [`launch`] for callers
//! without a Tokio runtime.

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use crate::output::LaunchReport;
use crate::pipeline::resolve::{self, DelegateCommand};
use crate::pipeline::{delegate, validate};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Validate `input` and hand it to the upload script.
///
/// # Arguments
/// * `input`  — path to the PDF, as typed by the user
/// * `config` — launch configuration
///
/// # Returns
/// `Ok(LaunchReport)` whenever the upload script ran, even if it failed
/// (check `report.success` or call [`LaunchReport::into_result`]).
///
/// # Errors
/// - [`LaunchError::MissingArgument`], [`LaunchError::FileNotFound`],
///   [`LaunchError::InvalidExtension`] and the other validation errors
/// - [`LaunchError::DelegateNotFound`] if the script is not installed
/// - [`LaunchError::DelegateSpawnFailed`] if the child could not start
pub async fn launch(
    input: impl AsRef<Path>,
    config: &LaunchConfig,
) -> Result<LaunchReport, LaunchError> {
    let total_start = Instant::now();

    let command = prepare(input, config)?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_delegate_start(&command);
    }

    let outcome = delegate::run_delegate(&command).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_delegate_exit(outcome.code, outcome.elapsed_ms);
    }

    Ok(LaunchReport {
        input: command.pdf().to_path_buf(),
        command: command.to_string(),
        exit_code: outcome.code,
        success: outcome.success(),
        duration_ms: total_start.elapsed().as_millis() as u64,
    })
}

/// Blocking version of [`launch`].
///
/// Creates its own Tokio runtime, so it must not be called from inside one.
pub fn launch_sync(
    input: impl AsRef<Path>,
    config: &LaunchConfig,
) -> Result<LaunchReport, LaunchError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| LaunchError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(launch(input, config))
}

/// Validate `input` and resolve the command that would run, without
/// spawning anything.
pub fn prepare(
    input: impl AsRef<Path>,
    config: &LaunchConfig,
) -> Result<DelegateCommand, LaunchError> {
    let input = input.as_ref();
    info!("Preparing upload: {}", input.display());

    let validated = validate::validate_input(input, config)?;
    if validated.original != validated.path {
        debug!(
            "Input {} resolved to {}",
            validated.original.display(),
            validated.path.display()
        );
    }
    if let Some(ref cb) = config.progress_callback {
        cb.on_validated(&validated.path);
    }

    resolve::resolve_delegate(config, &validated)
}

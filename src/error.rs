//! Error types for the edgequake-pdf-upload library.
//!
//! Every failure the launcher can hit is a variant of [`LaunchError`]. They
//! fall into three groups that mirror the pipeline stages:
//!
//! * **Validation** — the argument is missing, the file does not exist, or
//!   it is not a PDF. Nothing is spawned.
//! * **Resolution** — the launcher cannot work out where it is installed or
//!   the upload script is missing from that directory. Nothing is spawned.
//! * **Delegation** — the upload script could not be started, or it ran and
//!   reported failure.
//!
//! The outer contract is uniform: every variant maps to exit code `1`
//! (see [`LaunchError::exit_code`]). The variants exist so callers and logs
//! can tell the cases apart.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used for every launcher failure.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// All errors returned by the edgequake-pdf-upload library.
#[derive(Debug, Error)]
pub enum LaunchError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// No PDF path was supplied.
    #[error("No PDF file specified")]
    MissingArgument,

    /// The path does not refer to an existing filesystem entry.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// The path does not end in `.pdf` (case-insensitive).
    #[error("File must be a PDF: '{path}'")]
    InvalidExtension { path: PathBuf },

    /// The file exists but does not start with the `%PDF` header.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but reading its header failed.
    #[error("Failed to read '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Resolution errors ─────────────────────────────────────────────────
    /// The launcher could not determine its own installation directory.
    #[error("Cannot determine the launcher's installation directory: {source}\nSet UPLOAD_PDF_HOME or pass --base-dir.")]
    LauncherLocationUnavailable {
        #[source]
        source: std::io::Error,
    },

    /// The upload script is not where the launcher expects it.
    #[error("Upload script not found: '{path}'\nInstall it next to the launcher or pass --script.")]
    DelegateNotFound { path: PathBuf },

    // ── Delegation errors ─────────────────────────────────────────────────
    /// The child process could not be started at all.
    #[error("Failed to start '{program}': {source}{hint}")]
    DelegateSpawnFailed {
        program: String,
        hint: String,
        #[source]
        source: std::io::Error,
    },

    /// The child process ran and reported failure.
    ///
    /// `code` is `None` when the child was terminated by a signal.
    #[error("Upload script failed ({})", describe_exit(.code))]
    DelegateFailed { code: Option<i32> },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LaunchError {
    /// Process exit code the launcher should terminate with.
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// `true` when the error was raised before any child process existed.
    pub fn is_pre_spawn(&self) -> bool {
        !matches!(
            self,
            LaunchError::DelegateSpawnFailed { .. } | LaunchError::DelegateFailed { .. }
        )
    }

    pub(crate) fn spawn_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        let hint = if source.kind() == std::io::ErrorKind::NotFound {
            "\nCheck that it is installed and on your PATH, or pass --interpreter.".to_string()
        } else {
            String::new()
        };
        LaunchError::DelegateSpawnFailed {
            program: program.into(),
            hint,
            source,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

//! Result of a launch.

use crate::error::LaunchError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happened when the upload script was run.
///
/// A report exists whenever the child process actually ran, whatever its
/// exit status. Use [`LaunchReport::into_result`] to treat a failed upload
/// as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchReport {
    /// Absolute PDF path handed to the upload script.
    pub input: PathBuf,
    /// The command line that was executed.
    pub command: String,
    /// Child exit code; `None` if it was terminated by a signal.
    pub exit_code: Option<i32>,
    /// `true` iff `exit_code == Some(0)`.
    pub success: bool,
    /// Total wall-clock time of the launch, validation included.
    pub duration_ms: u64,
}

impl LaunchReport {
    /// `Ok(self)` if the upload succeeded, otherwise
    /// [`LaunchError::DelegateFailed`].
    pub fn into_result(self) -> Result<Self, LaunchError> {
        if self.success {
            Ok(self)
        } else {
            Err(LaunchError::DelegateFailed {
                code: self.exit_code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(code: Option<i32>) -> LaunchReport {
        LaunchReport {
            input: "/tmp/book.pdf".into(),
            command: "python3 /opt/kb/upload_pdf.py /tmp/book.pdf".into(),
            exit_code: code,
            success: code == Some(0),
            duration_ms: 12,
        }
    }

    #[test]
    fn success_passes_through() {
        assert!(report(Some(0)).into_result().is_ok());
    }

    #[test]
    fn failure_becomes_delegate_failed() {
        match report(Some(2)).into_result() {
            Err(LaunchError::DelegateFailed { code }) => assert_eq!(code, Some(2)),
            other => panic!("expected DelegateFailed, got {other:?}"),
        }
        assert!(matches!(
            report(None).into_result(),
            Err(LaunchError::DelegateFailed { code: None })
        ));
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(report(Some(0))).unwrap();
        assert_eq!(json["exit_code"], 0);
        assert_eq!(json["success"], true);
        assert_eq!(json["input"], "/tmp/book.pdf");
    }
}

//! Progress-callback trait for launch events.
//!
//! Inject an [`Arc<dyn LaunchProgressCallback>`] via
//! [`crate::config::LaunchConfigBuilder::progress_callback`] to be told when
//! the input has been validated, when the upload script is about to start and
//! when it exits. The CLI uses this to print its status lines; library
//! callers can forward the events wherever they like.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf_upload::{LaunchConfig, LaunchProgressCallback};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Announce;
//!
//! impl LaunchProgressCallback for Announce {
//!     fn on_validated(&self, pdf: &Path) {
//!         println!("uploading {}", pdf.display());
//!     }
//! }
//!
//! let config = LaunchConfig::builder()
//!     .progress_callback(Arc::new(Announce) as Arc<dyn LaunchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::pipeline::resolve::DelegateCommand;
use std::path::Path;
use std::sync::Arc;

/// Called by the launcher at each stage of a run.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive in order: `on_validated`, then
/// `on_delegate_start`, then `on_delegate_exit`. A run that fails validation
/// or resolution stops before the later events.
pub trait LaunchProgressCallback: Send + Sync {
    /// The input passed validation.
    ///
    /// # Arguments
    /// * `pdf` — absolute path that will be handed to the upload script
    fn on_validated(&self, pdf: &Path) {
        let _ = pdf;
    }

    /// The child process is about to be spawned.
    fn on_delegate_start(&self, command: &DelegateCommand) {
        let _ = command;
    }

    /// The child process has exited.
    ///
    /// # Arguments
    /// * `code`       — exit code, `None` if the child was killed by a signal
    /// * `elapsed_ms` — wall-clock time the child ran for
    fn on_delegate_exit(&self, code: Option<i32>, elapsed_ms: u64) {
        let _ = (code, elapsed_ms);
    }
}

/// A callback that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLaunchCallback;

impl LaunchProgressCallback for NoopLaunchCallback {}

/// Shared, thread-safe callback handle stored in [`crate::LaunchConfig`].
pub type ProgressCallback = Arc<dyn LaunchProgressCallback>;

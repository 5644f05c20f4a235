//! Configuration types for launching the upload script.
//!
//! All launcher behaviour is controlled through [`LaunchConfig`], built via
//! its [`LaunchConfigBuilder`]. The defaults reproduce the classic setup: run
//! `upload_pdf.py` with the platform's Python from the directory the launcher
//! is installed in, and only accept files ending in `.pdf`.

use crate::error::LaunchError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// File name of the upload script, resolved against the base directory.
pub const DEFAULT_SCRIPT: &str = "upload_pdf.py";

/// Interpreter used when none is configured.
#[cfg(windows)]
pub const DEFAULT_INTERPRETER: &str = "python";
/// Interpreter used when none is configured.
#[cfg(not(windows))]
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Configuration for a single launch.
///
/// Built via [`LaunchConfig::builder()`] or using [`LaunchConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_pdf_upload::LaunchConfig;
///
/// let config = LaunchConfig::builder()
///     .interpreter("python3.12")
///     .script("tools/upload_pdf.py")
///     .base_dir("/opt/pdf-kb")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Program that runs the script. Default: [`DEFAULT_INTERPRETER`].
    ///
    /// `None` executes the script directly, which requires it to be
    /// executable (shebang + exec bit on Unix, a registered extension on
    /// Windows).
    pub interpreter: Option<String>,

    /// Upload script path. Default: [`DEFAULT_SCRIPT`].
    ///
    /// Relative paths are joined to the base directory, never to the
    /// caller's working directory.
    pub script: PathBuf,

    /// Installation directory. Default: `None`, meaning the directory that
    /// contains the running launcher executable.
    ///
    /// The script is resolved against it and the child process runs in it.
    pub base_dir: Option<PathBuf>,

    /// Reject paths that do not end in `.pdf` (case-insensitive). Default: true.
    pub require_pdf_extension: bool,

    /// Also require the file to begin with the `%PDF` header. Default: false.
    pub verify_magic: bool,

    /// Observer notified as the launch progresses.
    #[serde(skip)]
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            interpreter: Some(DEFAULT_INTERPRETER.to_string()),
            script: PathBuf::from(DEFAULT_SCRIPT),
            base_dir: None,
            require_pdf_extension: true,
            verify_magic: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for LaunchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchConfig")
            .field("interpreter", &self.interpreter)
            .field("script", &self.script)
            .field("base_dir", &self.base_dir)
            .field("require_pdf_extension", &self.require_pdf_extension)
            .field("verify_magic", &self.verify_magic)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn LaunchProgressCallback>"),
            )
            .finish()
    }
}

impl LaunchConfig {
    /// Create a new builder for `LaunchConfig`.
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`LaunchConfig`].
#[derive(Debug)]
pub struct LaunchConfigBuilder {
    config: LaunchConfig,
}

impl LaunchConfigBuilder {
    pub fn interpreter(mut self, program: impl Into<String>) -> Self {
        self.config.interpreter = Some(program.into());
        self
    }

    /// Run the script directly instead of through an interpreter.
    pub fn no_interpreter(mut self) -> Self {
        self.config.interpreter = None;
        self
    }

    pub fn script(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.script = path.into();
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    pub fn require_pdf_extension(mut self, v: bool) -> Self {
        self.config.require_pdf_extension = v;
        self
    }

    pub fn verify_magic(mut self, v: bool) -> Self {
        self.config.verify_magic = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<LaunchConfig, LaunchError> {
        let c = &self.config;
        if c.script.as_os_str().is_empty() {
            return Err(LaunchError::InvalidConfig(
                "Script path must not be empty".into(),
            ));
        }
        if let Some(ref interp) = c.interpreter {
            if interp.trim().is_empty() {
                return Err(LaunchError::InvalidConfig(
                    "Interpreter must not be empty; use no_interpreter() to run the script directly"
                        .into(),
                ));
            }
        }
        if let Some(ref dir) = c.base_dir {
            if dir.as_os_str().is_empty() {
                return Err(LaunchError::InvalidConfig(
                    "Base directory must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_setup() {
        let c = LaunchConfig::default();
        assert_eq!(c.interpreter.as_deref(), Some(DEFAULT_INTERPRETER));
        assert_eq!(c.script, PathBuf::from("upload_pdf.py"));
        assert!(c.base_dir.is_none());
        assert!(c.require_pdf_extension);
        assert!(!c.verify_magic);
    }

    #[test]
    fn builder_overrides() {
        let c = LaunchConfig::builder()
            .no_interpreter()
            .script("bin/upload")
            .base_dir("/opt/kb")
            .require_pdf_extension(false)
            .verify_magic(true)
            .build()
            .unwrap();
        assert!(c.interpreter.is_none());
        assert_eq!(c.script, PathBuf::from("bin/upload"));
        assert_eq!(c.base_dir, Some(PathBuf::from("/opt/kb")));
        assert!(!c.require_pdf_extension);
        assert!(c.verify_magic);
    }

    #[test]
    fn empty_script_rejected() {
        let err = LaunchConfig::builder().script("").build().unwrap_err();
        assert!(matches!(err, LaunchError::InvalidConfig(_)));
    }

    #[test]
    fn blank_interpreter_rejected() {
        let err = LaunchConfig::builder().interpreter("  ").build().unwrap_err();
        assert!(err.to_string().contains("no_interpreter"));
    }

    #[test]
    fn debug_hides_callback() {
        let c = LaunchConfig::builder()
            .progress_callback(std::sync::Arc::new(crate::progress::NoopLaunchCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn LaunchProgressCallback>"), "got: {dbg}");
    }

    #[test]
    fn serialises_without_callback() {
        let json = serde_json::to_string(&LaunchConfig::default()).unwrap();
        assert!(json.contains("upload_pdf.py"));
        assert!(!json.contains("progress_callback"));
    }
}

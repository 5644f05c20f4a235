//! Delegate resolution: turn a config and a validated input into the exact
//! command line that will be spawned.
//!
//! Everything is resolved against the launcher's installation directory and
//! made absolute here, so the launcher never has to change its own working
//! directory. The child gets the installation directory as its working
//! directory instead.

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use crate::pipeline::validate::ValidatedInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A fully resolved child-process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateCommand {
    /// Program to execute: the interpreter, or the script itself.
    pub program: PathBuf,
    /// Arguments, the validated PDF path always last.
    pub args: Vec<PathBuf>,
    /// Working directory for the child.
    pub working_dir: PathBuf,
}

impl DelegateCommand {
    /// The PDF path handed to the upload script.
    pub fn pdf(&self) -> &Path {
        self.args
            .last()
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(""))
    }

    /// The upload script, whether it is run directly or via an interpreter.
    pub fn script(&self) -> &Path {
        if self.args.len() > 1 {
            self.args[0].as_path()
        } else {
            self.program.as_path()
        }
    }
}

impl fmt::Display for DelegateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(p: &Path) -> String {
    let s = p.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.into_owned()
    }
}

/// Directory containing the running launcher executable.
pub fn launcher_dir() -> Result<PathBuf, LaunchError> {
    let exe =
        std::env::current_exe().map_err(|source| LaunchError::LauncherLocationUnavailable { source })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LaunchError::LauncherLocationUnavailable {
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("'{}' has no parent directory", exe.display()),
            ),
        })
}

/// The installation directory this config resolves against.
pub fn base_dir(config: &LaunchConfig) -> Result<PathBuf, LaunchError> {
    match config.base_dir {
        Some(ref dir) => std::path::absolute(dir)
            .map_err(|e| LaunchError::InvalidConfig(format!("Bad base directory {dir:?}: {e}"))),
        None => launcher_dir(),
    }
}

/// Build the child invocation for `input`.
///
/// Fails with [`LaunchError::DelegateNotFound`] when the script does not
/// exist, before anything is spawned.
pub fn resolve_delegate(
    config: &LaunchConfig,
    input: &ValidatedInput,
) -> Result<DelegateCommand, LaunchError> {
    let base = base_dir(config)?;

    let script = if config.script.is_absolute() {
        config.script.clone()
    } else {
        base.join(&config.script)
    };
    if !script.is_file() {
        return Err(LaunchError::DelegateNotFound { path: script });
    }

    let command = match config.interpreter {
        Some(ref interp) => DelegateCommand {
            program: resolve_program(interp, &base),
            args: vec![script, input.path.clone()],
            working_dir: base,
        },
        None => DelegateCommand {
            program: script,
            args: vec![input.path.clone()],
            working_dir: base,
        },
    };

    debug!("Resolved delegate: {}", command);
    Ok(command)
}

/// Bare names (`python3`) stay as-is for the command search path; relative
/// paths with a directory part (`venv/bin/python`) are anchored at `base`.
fn resolve_program(program: &str, base: &Path) -> PathBuf {
    let p = Path::new(program);
    let is_bare = p.components().count() == 1
        && matches!(p.components().next(), Some(Component::Normal(_)));
    if p.is_absolute() || is_bare {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn input_in(dir: &Path) -> ValidatedInput {
        let pdf = dir.join("book.pdf");
        fs::write(&pdf, "%PDF-1.4").unwrap();
        ValidatedInput {
            original: pdf.clone(),
            path: pdf,
        }
    }

    #[test]
    fn launcher_dir_is_exe_parent() {
        let exe = std::env::current_exe().unwrap();
        assert_eq!(launcher_dir().unwrap(), exe.parent().unwrap());
    }

    #[test]
    fn relative_script_joins_base_dir() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("upload_pdf.py"), "").unwrap();
        let input = input_in(home.path());

        let config = LaunchConfig::builder()
            .interpreter("python3")
            .base_dir(home.path())
            .build()
            .unwrap();
        let cmd = resolve_delegate(&config, &input).unwrap();

        assert_eq!(cmd.program, PathBuf::from("python3"));
        assert_eq!(
            cmd.args,
            vec![home.path().join("upload_pdf.py"), input.path.clone()]
        );
        assert_eq!(cmd.working_dir, home.path());
        assert_eq!(cmd.script(), home.path().join("upload_pdf.py"));
        assert_eq!(cmd.pdf(), input.path);
    }

    #[test]
    fn no_interpreter_runs_script_directly() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("upload"), "").unwrap();
        let input = input_in(home.path());

        let config = LaunchConfig::builder()
            .no_interpreter()
            .script("upload")
            .base_dir(home.path())
            .build()
            .unwrap();
        let cmd = resolve_delegate(&config, &input).unwrap();

        assert_eq!(cmd.program, home.path().join("upload"));
        assert_eq!(cmd.args, vec![input.path.clone()]);
        assert_eq!(cmd.script(), home.path().join("upload"));
    }

    #[test]
    fn missing_script_is_reported_before_spawn() {
        let home = TempDir::new().unwrap();
        let input = input_in(home.path());
        let config = LaunchConfig::builder().base_dir(home.path()).build().unwrap();

        match resolve_delegate(&config, &input) {
            Err(LaunchError::DelegateNotFound { path }) => {
                assert_eq!(path, home.path().join("upload_pdf.py"))
            }
            other => panic!("expected DelegateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn interpreter_with_directory_is_anchored() {
        let base = Path::new("/opt/kb");
        assert_eq!(resolve_program("python3", base), PathBuf::from("python3"));
        assert_eq!(
            resolve_program("venv/bin/python", base),
            PathBuf::from("/opt/kb/venv/bin/python")
        );
        assert_eq!(
            resolve_program("/usr/bin/python3", base),
            PathBuf::from("/usr/bin/python3")
        );
    }

    #[test]
    fn display_quotes_paths_with_spaces() {
        let cmd = DelegateCommand {
            program: "python3".into(),
            args: vec!["/opt/kb/upload_pdf.py".into(), "/home/me/My Book.pdf".into()],
            working_dir: "/opt/kb".into(),
        };
        assert_eq!(
            cmd.to_string(),
            "python3 /opt/kb/upload_pdf.py \"/home/me/My Book.pdf\""
        );
    }
}

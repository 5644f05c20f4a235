//! Input validation: decide whether a user-supplied path may be uploaded.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. a path was given at all,
//! 2. it names an existing filesystem entry,
//! 3. it ends in `.pdf` (case-insensitive), unless disabled,
//! 4. the file starts with `%PDF`, only when enabled.
//!
//! Nothing here spawns a process, so every error from this module is
//! guaranteed to leave the upload script untouched.

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// First bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// An input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// The path exactly as the caller supplied it.
    pub original: PathBuf,
    /// Absolute form of `original`; this is what the upload script receives.
    pub path: PathBuf,
}

/// Validate `input` against the checks enabled in `config`.
pub fn validate_input(
    input: &Path,
    config: &LaunchConfig,
) -> Result<ValidatedInput, LaunchError> {
    if input.as_os_str().is_empty() {
        return Err(LaunchError::MissingArgument);
    }

    let original = input.to_path_buf();

    if !original.exists() {
        return Err(LaunchError::FileNotFound { path: original });
    }

    if config.require_pdf_extension && !has_pdf_extension(&original) {
        return Err(LaunchError::InvalidExtension { path: original });
    }

    if config.verify_magic {
        check_magic(&original)?;
    }

    // The child runs in the installation directory, so a relative path from
    // the caller's shell would no longer resolve there.
    let path = std::path::absolute(&original)
        .map_err(|e| LaunchError::Internal(format!("Failed to make path absolute: {e}")))?;

    debug!("Validated input: {}", path.display());
    Ok(ValidatedInput { original, path })
}

/// `true` if the path ends with `.pdf`, ignoring ASCII case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .to_ascii_lowercase()
        .ends_with(".pdf")
}

fn check_magic(path: &Path) -> Result<(), LaunchError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(LaunchError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LaunchError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut magic = Vec::with_capacity(PDF_MAGIC.len());
    file.take(PDF_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(|source| LaunchError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    if magic.as_slice() != PDF_MAGIC {
        return Err(LaunchError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn strict() -> LaunchConfig {
        LaunchConfig::default()
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension(Path::new("book.pdf")));
        assert!(has_pdf_extension(Path::new("C:\\Docs\\BOOK.PDF")));
        assert!(has_pdf_extension(Path::new("/tmp/report.Pdf")));
        assert!(!has_pdf_extension(Path::new("notes.txt")));
        assert!(!has_pdf_extension(Path::new("archive.pdf.zip")));
        assert!(!has_pdf_extension(Path::new("pdf")));
    }

    #[test]
    fn empty_path_is_missing_argument() {
        let err = validate_input(Path::new(""), &strict()).unwrap_err();
        assert!(matches!(err, LaunchError::MissingArgument));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.pdf");
        match validate_input(&missing, &strict()) {
            Err(LaunchError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn wrong_extension_rejected_when_strict() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "hello").unwrap();

        let err = validate_input(&notes, &strict()).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidExtension { .. }));
    }

    #[test]
    fn wrong_extension_allowed_when_relaxed() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "hello").unwrap();

        let config = LaunchConfig::builder()
            .require_pdf_extension(false)
            .build()
            .unwrap();
        let ok = validate_input(&notes, &config).unwrap();
        assert_eq!(ok.original, notes);
    }

    #[test]
    fn uppercase_extension_accepted() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("BOOK.PDF");
        fs::write(&pdf, "%PDF-1.7").unwrap();

        let ok = validate_input(&pdf, &strict()).unwrap();
        assert!(ok.path.is_absolute());
        assert_eq!(ok.path, pdf);
    }

    #[test]
    fn magic_check_rejects_non_pdf_content() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("fake.pdf");
        fs::write(&fake, "PK\x03\x04 zip data").unwrap();

        let config = LaunchConfig::builder().verify_magic(true).build().unwrap();
        match validate_input(&fake, &config) {
            Err(LaunchError::NotAPdf { magic, .. }) => assert_eq!(magic, b"PK\x03\x04"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn magic_check_rejects_short_file() {
        let dir = TempDir::new().unwrap();
        let tiny = dir.path().join("tiny.pdf");
        fs::write(&tiny, "%P").unwrap();

        let config = LaunchConfig::builder().verify_magic(true).build().unwrap();
        let err = validate_input(&tiny, &config).unwrap_err();
        assert!(matches!(err, LaunchError::NotAPdf { .. }));
    }

    #[test]
    fn magic_check_accepts_real_header() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("ok.pdf");
        fs::write(&pdf, "%PDF-1.4\n%âãÏÓ\n").unwrap();

        let config = LaunchConfig::builder().verify_magic(true).build().unwrap();
        assert!(validate_input(&pdf, &config).is_ok());
    }

    #[test]
    fn magic_check_off_by_default() {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("empty.pdf");
        fs::write(&pdf, "").unwrap();

        assert!(validate_input(&pdf, &strict()).is_ok());
    }
}

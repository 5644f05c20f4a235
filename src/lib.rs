//! # edgequake-pdf-upload
//!
//! Validate a PDF path and hand it to the knowledge-base upload script.
//!
//! The upload script (`upload_pdf.py`) does the real work: copying the file,
//! recording it in the database and indexing it. This crate is the launcher
//! in front of it. It refuses obviously wrong input before anything is
//! started, finds the script next to its own executable regardless of where
//! it was invoked from, runs it with the PDF path as its only argument and
//! turns the child's exit status into a clear success or failure.
//!
//! ## Pipeline Overview
//!
//! ```text
//! path
//!  │
//!  ├─ 1. Validate  exists? ends in .pdf? (optionally: starts with %PDF?)
//!  ├─ 2. Resolve   script + interpreter relative to the install directory
//!  ├─ 3. Delegate  spawn with inherited stdio, wait, no timeout
//!  └─ 4. Report    exit code, duration, success flag
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf_upload::{launch, LaunchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LaunchConfig::default();
//!     let report = launch("book.pdf", &config).await?.into_result()?;
//!     eprintln!("uploaded in {}ms", report.duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `upload-pdf` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod launch;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LaunchConfig, LaunchConfigBuilder, DEFAULT_INTERPRETER, DEFAULT_SCRIPT};
pub use error::LaunchError;
pub use launch::{launch, launch_sync, prepare};
pub use output::LaunchReport;
pub use pipeline::resolve::DelegateCommand;
pub use progress::{LaunchProgressCallback, NoopLaunchCallback, ProgressCallback};

//! Pipeline stages for launching the upload script.
//!
//! Each submodule implements exactly one step, and the first two never spawn
//! anything, which keeps the "no child on validation failure" guarantee easy
//! to see and to test.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ validate ──▶ resolve ──▶ delegate
//!          (exists,     (install    (spawn,
//!           .pdf)        dir)        wait)
//! ```
//!
//! 1. [`validate`] — existence, `.pdf` suffix and optional `%PDF` header
//! 2. [`resolve`]  — absolute script/interpreter paths and child working dir
//! 3. [`delegate`] — run the child with inherited stdio and collect its status

pub mod delegate;
pub mod resolve;
pub mod validate;

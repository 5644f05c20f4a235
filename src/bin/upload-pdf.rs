//! CLI binary for edgequake-pdf-upload.
//!
//! A thin shim over the library crate that maps CLI flags to `LaunchConfig`,
//! prints status lines and turns the outcome into the process exit code.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf_upload::{
    launch, prepare, DelegateCommand, LaunchConfig, LaunchError, LaunchProgressCallback,
    LaunchReport, DEFAULT_INTERPRETER, DEFAULT_SCRIPT,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}
fn green(s: &str) -> String {
    paint("32", s)
}
fn red(s: &str) -> String {
    paint("31", s)
}
fn dim(s: &str) -> String {
    paint("2", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}
fn cyan(s: &str) -> String {
    paint("36", s)
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints one status line per launch event on stdout.
struct CliProgressCallback {
    verbose: bool,
}

impl LaunchProgressCallback for CliProgressCallback {
    fn on_delegate_start(&self, command: &DelegateCommand) {
        println!(
            "{} {}",
            cyan("◆"),
            bold(&format!(
                "Uploading {} with {}…",
                file_name(command.pdf()),
                file_name(command.script())
            ))
        );
        if self.verbose {
            println!("  {}", dim(&format!("$ {command}")));
            println!("  {}", dim(&format!("in {}", command.working_dir.display())));
        }
    }

    fn on_delegate_exit(&self, code: Option<i32>, elapsed_ms: u64) {
        if self.verbose {
            let status = match code {
                Some(c) => format!("exit code {c}"),
                None => "terminated by signal".to_string(),
            };
            println!(
                "  {}",
                dim(&format!("{status} after {:.1}s", elapsed_ms as f64 / 1000.0))
            );
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

const USAGE: &str = "Usage: upload-pdf <path_to_pdf_file>";
const EXAMPLE: &str = r#"Example: upload-pdf "C:\Documents\my_book.pdf""#;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload a PDF with the script installed next to this launcher
  upload-pdf "C:\Documents\my_book.pdf"

  # Check what would run, without running it
  upload-pdf --dry-run ~/papers/attention.pdf

  # Use the project's virtualenv instead of the system Python
  upload-pdf --interpreter .venv/bin/python paper.pdf

  # Machine-readable result
  upload-pdf --json paper.pdf

EXIT CODES:
  0   the upload script reported success (or --dry-run validated the input)
  1   missing argument, missing file, not a PDF, script not found,
      script could not be started, or script reported failure

ENVIRONMENT VARIABLES:
  UPLOAD_PDF_HOME          Installation directory (default: launcher's directory)
  UPLOAD_PDF_SCRIPT        Upload script path (default: upload_pdf.py)
  UPLOAD_PDF_INTERPRETER   Program that runs the script (default: python3 / python)
  RUST_LOG                 Overrides the log filter, e.g. RUST_LOG=debug
"#;

/// Validate a PDF and hand it to the knowledge-base upload script.
#[derive(Parser, Debug)]
#[command(
    name = "upload-pdf",
    version,
    about = "Validate a PDF and hand it to the knowledge-base upload script",
    long_about = "Checks that the given file exists and is a PDF, then runs the upload script \
installed next to this launcher with the file's path as its only argument. The script's output \
is passed through unchanged and its exit status decides success or failure.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file to upload.
    input: Option<PathBuf>,

    /// Program used to run the upload script.
    #[arg(long, env = "UPLOAD_PDF_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    interpreter: String,

    /// Execute the upload script directly instead of through an interpreter.
    /// Takes precedence over `--interpreter`.
    #[arg(long, env = "UPLOAD_PDF_NO_INTERPRETER")]
    no_interpreter: bool,

    /// Upload script; relative paths are resolved against the base directory.
    #[arg(long, env = "UPLOAD_PDF_SCRIPT", default_value = DEFAULT_SCRIPT)]
    script: PathBuf,

    /// Installation directory (default: the directory containing this launcher).
    #[arg(long, env = "UPLOAD_PDF_HOME")]
    base_dir: Option<PathBuf>,

    /// Accept files that do not end in `.pdf`.
    #[arg(long, env = "UPLOAD_PDF_ALLOW_ANY_EXTENSION")]
    allow_any_extension: bool,

    /// Also require the file to start with the `%PDF` header.
    #[arg(long, env = "UPLOAD_PDF_VERIFY_MAGIC")]
    verify_magic: bool,

    /// Validate and print the command that would run, without running it.
    #[arg(long)]
    dry_run: bool,

    /// Print the launch report as JSON instead of status lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs and show the resolved command.
    #[arg(short, long, env = "UPLOAD_PDF_VERBOSE")]
    verbose: bool,

    /// Suppress status lines; failures are still reported.
    #[arg(short, long, env = "UPLOAD_PDF_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err, cli.json);
            let code = err
                .downcast_ref::<LaunchError>()
                .map(LaunchError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let Some(ref input) = cli.input else {
        return Err(LaunchError::MissingArgument.into());
    };

    let config = build_config(cli)?;

    // ── Dry run ──────────────────────────────────────────────────────────
    if cli.dry_run {
        let command = prepare(input, &config)?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&command).context("Failed to serialise command")?
            );
        } else {
            println!("{} {}", green("✔"), bold("Input is valid; would run:"));
            println!("  {command}");
            println!("  {}", dim(&format!("in {}", command.working_dir.display())));
        }
        return Ok(());
    }

    // ── Launch ───────────────────────────────────────────────────────────
    let report = launch(input, &config).await?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    }

    let report = report.into_result()?;
    if !cli.quiet && !cli.json {
        print_success(&report);
    }
    Ok(())
}

/// Map CLI args to `LaunchConfig`.
fn build_config(cli: &Cli) -> Result<LaunchConfig> {
    let mut builder = LaunchConfig::builder()
        .script(cli.script.clone())
        .require_pdf_extension(!cli.allow_any_extension)
        .verify_magic(cli.verify_magic);

    builder = if cli.no_interpreter {
        builder.no_interpreter()
    } else {
        builder.interpreter(cli.interpreter.clone())
    };

    if let Some(ref dir) = cli.base_dir {
        builder = builder.base_dir(dir.clone());
    }

    if !cli.quiet && !cli.json {
        builder = builder.progress_callback(Arc::new(CliProgressCallback {
            verbose: cli.verbose,
        }));
    }

    Ok(builder.build()?)
}

fn print_success(report: &LaunchReport) {
    println!();
    println!(
        "{} {}",
        green("✔"),
        bold("Success! Your PDF has been uploaded and processed.")
    );
    println!(
        "  {}",
        dim(&format!(
            "{}  ·  {:.1}s",
            report.input.display(),
            report.duration_ms as f64 / 1000.0
        ))
    );
}

/// Diagnostics go to stdout, or to stderr when stdout carries JSON.
fn report_failure(err: &anyhow::Error, json: bool) {
    for line in failure_lines(err) {
        if json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

fn failure_lines(err: &anyhow::Error) -> Vec<String> {
    match err.downcast_ref::<LaunchError>() {
        Some(LaunchError::MissingArgument) => vec![
            format!("{} {}", red("✘"), LaunchError::MissingArgument),
            USAGE.to_string(),
            EXAMPLE.to_string(),
        ],
        Some(e) if e.is_pre_spawn() => vec![format!("{} {}", red("✘"), red(&format!("Error: {e}")))],
        Some(e) => vec![
            format!("{} {}", red("✘"), red(&format!("Error: {e}"))),
            String::new(),
            bold("Failed to upload and process PDF."),
        ],
        None => vec![format!("{} {}", red("✘"), red(&format!("Error: {err:#}")))],
    }
}

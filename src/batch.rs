//! Batch export of every open figure.

use crate::error::{FigExportError, Result};
use crate::export::{filename, Exporter};
use crate::figure::Session;
use crate::style::StyleGuard;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "Figures";

/// Status line emitted when the session has no figures.
pub const NOTHING_TO_EXPORT: &str = "no open figures to export";

/// Options for a batch export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Output directory; `None` or empty means [`DEFAULT_OUTPUT_DIR`].
    pub output_dir: Option<PathBuf>,
    /// Skip the vector backend and use the print renderer.
    pub force_print: bool,
}

impl ExportOptions {
    /// Options writing to `dir`.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// The directory files are written to.
    pub fn resolve_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information.
    Info,
    /// A figure could not be exported.
    Warn,
}

/// One line of user-facing status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.message),
            Level::Warn => write!(f, "warning: {}", self.message),
        }
    }
}

/// A figure that could not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureFailure {
    /// Figure number.
    pub id: u32,
    /// Target path.
    pub path: PathBuf,
    /// Failure description including causes.
    pub reason: String,
}

/// Outcome of a batch export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Directory written to.
    pub output_dir: PathBuf,
    /// Files written, in figure order.
    pub exported: Vec<PathBuf>,
    /// Figures that failed.
    pub failed: Vec<FigureFailure>,
    /// Status lines, in emission order.
    pub lines: Vec<StatusLine>,
}

impl ExportReport {
    fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }

    fn info(&mut self, message: String) {
        tracing::info!("{}", message);
        self.lines.push(StatusLine {
            level: Level::Info,
            message,
        });
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.lines.push(StatusLine {
            level: Level::Warn,
            message,
        });
    }

    /// Whether every figure was exported.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Export every open figure of `session` as configured by `options`.
pub fn export_open_figures(session: &mut Session, options: &ExportOptions) -> Result<ExportReport> {
    let exporter = Exporter::pdf(options.force_print);
    export_open_figures_with(session, &options.resolve_output_dir(), &exporter)
}

/// Export every open figure of `session` into `dir` using `exporter`.
///
/// Only a failure to create `dir` is returned as an error. Each figure is
/// exported with the print palette applied and its own style restored
/// afterwards, whether or not the export succeeded.
pub fn export_open_figures_with(
    session: &mut Session,
    dir: &Path,
    exporter: &Exporter,
) -> Result<ExportReport> {
    std::fs::create_dir_all(dir)
        .map_err(|e| FigExportError::directory_creation(dir.to_path_buf(), e))?;

    let mut report = ExportReport::new(dir.to_path_buf());
    if session.is_empty() {
        report.info(NOTHING_TO_EXPORT.to_string());
        return Ok(report);
    }

    for figure in session.open_figures() {
        let id = figure.id;
        let path = filename::output_path(dir, id, &figure.name);

        // The guard restores the style while unwinding, so a panicking
        // backend only fails this figure.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let guard = StyleGuard::acquire(figure);
            let outcome = exporter.export(&guard, &path);
            guard.restore();
            outcome
        }))
        .unwrap_or_else(|payload| {
            Err(FigExportError::export(format!(
                "export panicked: {}",
                panic_message(payload.as_ref())
            )))
        });

        match outcome {
            Ok(()) => {
                report.info(format!("Exported figure {} to {}", id, path.display()));
                report.exported.push(path);
            },
            Err(e) => {
                let reason = error_chain(&e);
                report.warn(format!("Failed to export figure {}: {}", id, reason));
                report.failed.push(FigureFailure { id, path, reason });
            },
        }
    }

    Ok(report)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

//! Writing figures to files.
//!
//! [`Exporter`] prefers a high-fidelity backend and falls back to a generic
//! print backend when the preferred one is unavailable.

pub mod filename;
mod pdf;

pub use pdf::{Fidelity, PdfBackend};

use crate::error::{FigExportError, Result};
use crate::figure::Figure;
use std::fmt;
use std::path::Path;

/// A capability that serializes a figure to a file.
pub trait ExportBackend: fmt::Debug {
    /// Backend name used in log lines.
    fn name(&self) -> &str;

    /// Whether the backend can run in this environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Write `figure` to `path`, replacing any existing file.
    fn export(&self, figure: &Figure, path: &Path) -> Result<()>;
}

/// Export with a preferred backend and a fallback.
#[derive(Debug)]
pub struct Exporter {
    preferred: Box<dyn ExportBackend>,
    fallback: Box<dyn ExportBackend>,
}

impl Exporter {
    /// Create an exporter from two backends.
    pub fn new(preferred: Box<dyn ExportBackend>, fallback: Box<dyn ExportBackend>) -> Self {
        Self {
            preferred,
            fallback,
        }
    }

    /// Vector PDF, falling back to the print renderer.
    ///
    /// With `force_print` the vector backend reports itself unavailable.
    pub fn pdf(force_print: bool) -> Self {
        let vector = PdfBackend::new(Fidelity::Vector).with_available(!force_print);
        Self::new(Box::new(vector), Box::new(PdfBackend::new(Fidelity::Print)))
    }

    /// The backend that [`Exporter::export`] would use right now.
    pub fn active_backend(&self) -> &dyn ExportBackend {
        if self.preferred.is_available() {
            self.preferred.as_ref()
        } else {
            self.fallback.as_ref()
        }
    }

    /// Export `figure` to `path`.
    pub fn export(&self, figure: &Figure, path: &Path) -> Result<()> {
        let backend = self.active_backend();
        if !backend.is_available() {
            return Err(FigExportError::backend_unavailable(backend.name()));
        }
        tracing::debug!("Exporting figure {} via {}", figure.id, backend.name());
        backend.export(figure, path)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::pdf(false)
    }
}

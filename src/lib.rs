//! figexport - batch-export open figures to print-readable vector PDF.
//!
//! Every open figure of a [`Session`] is written to
//! `<dir>/Fig<NNN>_<name>.pdf`. While a figure is exported its foreground is
//! forced to black and its backgrounds to white; the original colors are put
//! back afterwards, even when the export fails.
//!
//! # Features
//!
//! - Deterministic file names, re-runs overwrite
//! - Per-property best-effort restyling of axes, text, legends and colorbars
//! - Guaranteed style restore through a scoped guard
//! - Vector PDF output with a print fallback
//! - Per-figure fault isolation
//!
//! # Example
//!
//! ```ignore
//! use figexport::{export_open_figures, ExportOptions, Session};
//! use std::path::Path;
//!
//! let mut session = Session::load(Path::new("session.json"))?;
//! let report = export_open_figures(&mut session, &ExportOptions::default())?;
//! println!("Wrote {} file(s)", report.exported.len());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod batch;
pub mod error;
pub mod export;
pub mod figure;
pub mod style;

pub use batch::{export_open_figures, export_open_figures_with, ExportOptions, ExportReport};
pub use error::{FigExportError, Result};
pub use figure::{Figure, Session};

//! Error types for figexport.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Property-level failures live in [`crate::figure::PropertyError`]; they are
//! swallowed by the style passes and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for figexport operations.
pub type Result<T> = std::result::Result<T, FigExportError>;

/// Errors that can occur in figexport.
#[derive(Debug, Error)]
pub enum FigExportError {
    /// Failed to create the output directory.
    #[error("Failed to create output directory: {path}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a session file.
    #[error("Failed to open session file: {path}")]
    SessionOpen {
        /// Session file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Session file is not valid JSON or does not describe figures.
    #[error("Invalid session file: {0}")]
    SessionParse(#[from] serde_json::Error),

    /// Failed to write an exported file.
    #[error("Failed to write {path}")]
    Write {
        /// Output file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The selected export backend cannot run in this environment.
    #[error("Export backend unavailable: {backend}")]
    BackendUnavailable {
        /// Backend name.
        backend: String,
    },

    /// A backend rejected the figure.
    #[error("Export failed: {0}")]
    Export(String),
}

impl FigExportError {
    /// Create a DirectoryCreation error.
    pub fn directory_creation(path: PathBuf, source: std::io::Error) -> Self {
        Self::DirectoryCreation { path, source }
    }

    /// Create a SessionOpen error.
    pub fn session_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::SessionOpen { path, source }
    }

    /// Create a Write error.
    pub fn write(path: PathBuf, source: std::io::Error) -> Self {
        Self::Write { path, source }
    }

    /// Create a BackendUnavailable error.
    pub fn backend_unavailable(backend: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
        }
    }

    /// Create an Export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }
}

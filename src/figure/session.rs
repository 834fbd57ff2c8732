//! The set of open figures.

use super::Figure;
use crate::error::{FigExportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A visualization session holding the currently open figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Open figures, in the order they were opened.
    #[serde(default)]
    pub figures: Vec<Figure>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from figures.
    pub fn with_figures(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    /// Load a session description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FigExportError::session_open(path.to_path_buf(), e))?;
        let session: Session = serde_json::from_str(&text)?;
        tracing::debug!(
            "Loaded {} figure(s) from {}",
            session.figures.len(),
            path.display()
        );
        Ok(session)
    }

    /// All open figures at call time, in a stable order.
    pub fn open_figures(&mut self) -> std::slice::IterMut<'_, Figure> {
        self.figures.iter_mut()
    }

    /// Number of open figures.
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Whether no figure is open.
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Look up a figure by number.
    pub fn figure(&self, id: u32) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id == id)
    }
}

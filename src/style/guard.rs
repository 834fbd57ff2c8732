//! Scoped print-palette override.

use super::{apply_print_palette, StyleSnapshot};
use crate::figure::Figure;
use std::ops::Deref;

/// Holds a figure in its print palette until released.
///
/// Acquiring captures a [`StyleSnapshot`] and then applies the print palette.
/// The snapshot is written back exactly once: by [`StyleGuard::restore`], or
/// on drop (including while unwinding) if `restore` was never called.
#[derive(Debug)]
pub struct StyleGuard<'a> {
    figure: &'a mut Figure,
    snapshot: Option<StyleSnapshot>,
}

impl<'a> StyleGuard<'a> {
    /// Snapshot `figure`, then switch it to the print palette.
    pub fn acquire(figure: &'a mut Figure) -> Self {
        let snapshot = StyleSnapshot::capture(figure);
        tracing::trace!(
            "Captured {} style value(s) of figure {}",
            snapshot.recorded(),
            figure.id
        );
        apply_print_palette(figure);
        Self {
            figure,
            snapshot: Some(snapshot),
        }
    }

    /// The snapshot taken on acquire, until it has been restored.
    pub fn snapshot(&self) -> Option<&StyleSnapshot> {
        self.snapshot.as_ref()
    }

    /// Restore the original style now. Returns how many writes failed.
    pub fn restore(mut self) -> usize {
        self.release()
    }

    fn release(&mut self) -> usize {
        match self.snapshot.take() {
            Some(snapshot) => {
                let failed = snapshot.restore(&mut *self.figure);
                if failed > 0 {
                    tracing::debug!(
                        "{} style value(s) of figure {} could not be restored",
                        failed,
                        self.figure.id
                    );
                }
                failed
            },
            None => 0,
        }
    }
}

impl Deref for StyleGuard<'_> {
    type Target = Figure;

    fn deref(&self) -> &Figure {
        &*self.figure
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

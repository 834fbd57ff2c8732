//! Print-palette override and restore.
//!
//! Capture, override and restore all touch one property at a time through
//! [`attempt`], so a sub-element that lacks a property never stops the pass.

mod guard;
mod palette;
mod snapshot;

pub use guard::StyleGuard;
pub use palette::{apply_print_palette, print_palette};
pub use snapshot::StyleSnapshot;

use crate::figure::{Property, PropertyError};

/// Run one property operation, swallowing its failure.
///
/// Returns `Some` on success. Failures are logged at trace level only.
pub(crate) fn attempt<T>(
    prop: Property,
    op: impl FnOnce() -> std::result::Result<T, PropertyError>,
) -> Option<T> {
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!("skipping {}: {}", prop, e);
            None
        },
    }
}

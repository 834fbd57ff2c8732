//! Pre-override style state of one figure.

use super::attempt;
use crate::figure::{Figure, Property, StyleValue};

/// The value every style property had before the print palette was applied.
///
/// Properties the figure could not report are kept as `None` and are left
/// alone on restore.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    figure_id: u32,
    entries: Vec<(Property, Option<StyleValue>)>,
}

impl StyleSnapshot {
    /// Record the current value of every style property of `figure`.
    pub fn capture(figure: &Figure) -> Self {
        let entries = figure
            .style_properties()
            .into_iter()
            .map(|prop| (prop, attempt(prop, || figure.read(prop))))
            .collect();

        Self {
            figure_id: figure.id,
            entries,
        }
    }

    /// Write every recorded value back. Returns how many writes failed.
    pub fn restore(&self, figure: &mut Figure) -> usize {
        debug_assert_eq!(figure.id, self.figure_id);

        self.entries
            .iter()
            .filter_map(|(prop, value)| value.map(|v| (*prop, v)))
            .filter(|&(prop, value)| attempt(prop, || figure.write(prop, value)).is_none())
            .count()
    }

    /// Recorded value of a property; `None` when absent or never enumerated.
    pub fn get(&self, prop: Property) -> Option<StyleValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prop)
            .and_then(|(_, v)| *v)
    }

    /// Whether `prop` was enumerated but could not be read.
    pub fn is_absent(&self, prop: Property) -> bool {
        self.entries.iter().any(|(p, v)| *p == prop && v.is_none())
    }

    /// Number of properties with a recorded value.
    pub fn recorded(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }
}

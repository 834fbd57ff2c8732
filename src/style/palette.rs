//! The print-readable palette: black foreground on white background.

use super::attempt;
use crate::figure::{Color, FillMode, Figure, Paint, Property, StyleValue};

/// Target value of a property under the print palette.
///
/// Only foreground and background colors are listed; series colors and
/// colormaps carry data and keep their values.
pub fn print_palette(prop: Property) -> StyleValue {
    match prop {
        Property::InvertHardcopy => StyleValue::Flag(false),
        Property::FigureColor
        | Property::AxesColor(_)
        | Property::LegendColor(_)
        | Property::LegendFaceColor(_) => StyleValue::Color(Color::WHITE),
        Property::LegendFaceEdge(_) => StyleValue::Paint(Paint::None),
        Property::LegendFaceFill(_) => StyleValue::Fill(FillMode::Solid),
        Property::AxesTickColor(..)
        | Property::AxesLabelColor(..)
        | Property::TextColor(_)
        | Property::LegendTextColor(_)
        | Property::ColorbarLabelColor(_) => StyleValue::Color(Color::BLACK),
    }
}

/// Force the print palette onto every property of `figure`.
///
/// Each write is independent. Returns how many properties were set.
pub fn apply_print_palette(figure: &mut Figure) -> usize {
    let mut applied = 0;
    for prop in figure.style_properties() {
        if attempt(prop, || figure.write(prop, print_palette(prop))).is_some() {
            applied += 1;
        }
    }
    tracing::debug!("Applied print palette to {} property(ies) of figure {}", applied, figure.id);
    applied
}

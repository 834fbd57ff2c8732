//! Addressable style properties of a figure.
//!
//! Every readability-relevant color of a figure is reachable through a
//! [`Property`] key. Reads and writes go through [`Figure::read`] and
//! [`Figure::write`], which fail with [`PropertyError`] when the addressed
//! sub-element lacks the capability (no z axis, no legend face, ...).

use super::color::{Color, FillMode, Paint};
use super::element::{AxesLabel, Dim, Figure};
use std::fmt;
use thiserror::Error;

/// A style property of one sub-element, keyed by kind and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Figure background.
    FigureColor,
    /// Figure "invert on print" flag.
    InvertHardcopy,
    /// Axes background.
    AxesColor(usize),
    /// Axes tick-label color for one dimension.
    AxesTickColor(usize, Dim),
    /// Axes title or axis-label color.
    AxesLabelColor(usize, AxesLabel),
    /// Free-standing text color.
    TextColor(usize),
    /// Legend entry text color.
    LegendTextColor(usize),
    /// Legend background.
    LegendColor(usize),
    /// Legend box-face fill color.
    LegendFaceColor(usize),
    /// Legend box-face edge stroke.
    LegendFaceEdge(usize),
    /// Legend box-face fill mode.
    LegendFaceFill(usize),
    /// Colorbar label color.
    ColorbarLabelColor(usize),
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::FigureColor => write!(f, "figure.color"),
            Property::InvertHardcopy => write!(f, "figure.invert_hardcopy"),
            Property::AxesColor(i) => write!(f, "axes[{i}].color"),
            Property::AxesTickColor(i, dim) => write!(f, "axes[{i}].tick_colors.{dim:?}"),
            Property::AxesLabelColor(i, which) => write!(f, "axes[{i}].{which:?}.color"),
            Property::TextColor(i) => write!(f, "texts[{i}].color"),
            Property::LegendTextColor(i) => write!(f, "legends[{i}].text_color"),
            Property::LegendColor(i) => write!(f, "legends[{i}].color"),
            Property::LegendFaceColor(i) => write!(f, "legends[{i}].face.color"),
            Property::LegendFaceEdge(i) => write!(f, "legends[{i}].face.edge"),
            Property::LegendFaceFill(i) => write!(f, "legends[{i}].face.fill_mode"),
            Property::ColorbarLabelColor(i) => write!(f, "colorbars[{i}].label.color"),
        }
    }
}

/// A property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleValue {
    /// Plain color.
    Color(Color),
    /// Color or nothing.
    Paint(Paint),
    /// Fill mode.
    Fill(FillMode),
    /// On/off flag.
    Flag(bool),
}

/// Why a property could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The sub-element exists but does not have this property.
    #[error("{0} is not supported here")]
    Unsupported(Property),
    /// The indexed sub-element does not exist.
    #[error("{0} refers to a missing element")]
    MissingElement(Property),
    /// The value kind does not match the property.
    #[error("{property} cannot hold {value:?}")]
    TypeMismatch {
        /// Target property.
        property: Property,
        /// Rejected value.
        value: StyleValue,
    },
}

type PropResult<T> = std::result::Result<T, PropertyError>;

impl Figure {
    /// Every style property key of this figure, in a stable order.
    ///
    /// Keys are listed for each sub-element whether or not it supports the
    /// property; unsupported ones fail on access.
    pub fn style_properties(&self) -> Vec<Property> {
        let mut props = vec![Property::FigureColor, Property::InvertHardcopy];

        for i in 0..self.axes.len() {
            props.push(Property::AxesColor(i));
            for dim in [Dim::X, Dim::Y, Dim::Z] {
                props.push(Property::AxesTickColor(i, dim));
            }
            for which in [AxesLabel::Title, AxesLabel::X, AxesLabel::Y, AxesLabel::Z] {
                props.push(Property::AxesLabelColor(i, which));
            }
        }

        props.extend((0..self.texts.len()).map(Property::TextColor));

        for i in 0..self.legends.len() {
            props.extend([
                Property::LegendTextColor(i),
                Property::LegendColor(i),
                Property::LegendFaceColor(i),
                Property::LegendFaceEdge(i),
                Property::LegendFaceFill(i),
            ]);
        }

        props.extend((0..self.colorbars.len()).map(Property::ColorbarLabelColor));
        props
    }

    /// Read one property.
    pub fn read(&self, prop: Property) -> PropResult<StyleValue> {
        let missing = || PropertyError::MissingElement(prop);
        let unsupported = || PropertyError::Unsupported(prop);

        let value = match prop {
            Property::FigureColor => StyleValue::Color(self.color),
            Property::InvertHardcopy => StyleValue::Flag(self.invert_hardcopy),
            Property::AxesColor(i) => {
                StyleValue::Color(self.axes.get(i).ok_or_else(missing)?.color)
            },
            Property::AxesTickColor(i, dim) => {
                let axes = self.axes.get(i).ok_or_else(missing)?;
                StyleValue::Color(axes.tick_colors.get(dim).ok_or_else(unsupported)?)
            },
            Property::AxesLabelColor(i, which) => {
                let axes = self.axes.get(i).ok_or_else(missing)?;
                StyleValue::Color(axes.label(which).ok_or_else(unsupported)?.color)
            },
            Property::TextColor(i) => {
                StyleValue::Color(self.texts.get(i).ok_or_else(missing)?.color)
            },
            Property::LegendTextColor(i) => {
                StyleValue::Color(self.legends.get(i).ok_or_else(missing)?.text_color)
            },
            Property::LegendColor(i) => {
                StyleValue::Color(self.legends.get(i).ok_or_else(missing)?.color)
            },
            Property::LegendFaceColor(i)
            | Property::LegendFaceEdge(i)
            | Property::LegendFaceFill(i) => {
                let legend = self.legends.get(i).ok_or_else(missing)?;
                let face = legend.face.as_ref().ok_or_else(unsupported)?;
                match prop {
                    Property::LegendFaceColor(_) => StyleValue::Color(face.color),
                    Property::LegendFaceEdge(_) => StyleValue::Paint(face.edge),
                    _ => StyleValue::Fill(face.fill_mode),
                }
            },
            Property::ColorbarLabelColor(i) => {
                let colorbar = self.colorbars.get(i).ok_or_else(missing)?;
                StyleValue::Color(colorbar.label.as_ref().ok_or_else(unsupported)?.color)
            },
        };

        Ok(value)
    }

    /// Write one property. The figure is unchanged on error.
    pub fn write(&mut self, prop: Property, value: StyleValue) -> PropResult<()> {
        let missing = || PropertyError::MissingElement(prop);
        let unsupported = || PropertyError::Unsupported(prop);
        let mismatch = || PropertyError::TypeMismatch { property: prop, value };

        match (prop, value) {
            (Property::FigureColor, StyleValue::Color(c)) => self.color = c,
            (Property::InvertHardcopy, StyleValue::Flag(on)) => self.invert_hardcopy = on,
            (Property::AxesColor(i), StyleValue::Color(c)) => {
                self.axes.get_mut(i).ok_or_else(missing)?.color = c;
            },
            (Property::AxesTickColor(i, dim), StyleValue::Color(c)) => {
                let axes = self.axes.get_mut(i).ok_or_else(missing)?;
                *axes.tick_colors.get_mut(dim).ok_or_else(unsupported)? = c;
            },
            (Property::AxesLabelColor(i, which), StyleValue::Color(c)) => {
                let axes = self.axes.get_mut(i).ok_or_else(missing)?;
                axes.label_mut(which).ok_or_else(unsupported)?.color = c;
            },
            (Property::TextColor(i), StyleValue::Color(c)) => {
                self.texts.get_mut(i).ok_or_else(missing)?.color = c;
            },
            (Property::LegendTextColor(i), StyleValue::Color(c)) => {
                self.legends.get_mut(i).ok_or_else(missing)?.text_color = c;
            },
            (Property::LegendColor(i), StyleValue::Color(c)) => {
                self.legends.get_mut(i).ok_or_else(missing)?.color = c;
            },
            (Property::LegendFaceColor(i), StyleValue::Color(c)) => {
                let legend = self.legends.get_mut(i).ok_or_else(missing)?;
                legend.face.as_mut().ok_or_else(unsupported)?.color = c;
            },
            (Property::LegendFaceEdge(i), StyleValue::Paint(p)) => {
                let legend = self.legends.get_mut(i).ok_or_else(missing)?;
                legend.face.as_mut().ok_or_else(unsupported)?.edge = p;
            },
            (Property::LegendFaceFill(i), StyleValue::Fill(mode)) => {
                let legend = self.legends.get_mut(i).ok_or_else(missing)?;
                legend.face.as_mut().ok_or_else(unsupported)?.fill_mode = mode;
            },
            (Property::ColorbarLabelColor(i), StyleValue::Color(c)) => {
                let colorbar = self.colorbars.get_mut(i).ok_or_else(missing)?;
                colorbar.label.as_mut().ok_or_else(unsupported)?.color = c;
            },
            _ => return Err(mismatch()),
        }

        Ok(())
    }
}

//! Figure model.
//!
//! This module describes open figures as a containment tree (figure → axes,
//! texts, legends, colorbars) and exposes their readability-relevant colors
//! as addressable properties.

mod color;
mod element;
mod property;
mod session;

pub use color::{Color, FillMode, Paint, ParseColorError};
pub use element::{
    Axes, AxesLabel, Colorbar, Dim, Figure, Label, Legend, LegendFace, Series, TextLabel,
    TickColors,
};
pub use property::{Property, PropertyError, StyleValue};
pub use session::Session;

//! Figure and its visual sub-elements.

use super::color::{Color, FillMode, Paint};
use serde::{Deserialize, Serialize};

fn default_figure_color() -> Color {
    Color::rgb(240, 240, 240)
}

fn default_true() -> bool {
    true
}

fn default_size() -> [f32; 2] {
    [560.0, 420.0]
}

fn default_axes_position() -> [f32; 4] {
    [0.13, 0.11, 0.775, 0.815]
}

/// An open figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Figure number.
    pub id: u32,
    /// Display name, possibly empty.
    #[serde(default)]
    pub name: String,
    /// Figure background color.
    #[serde(default = "default_figure_color")]
    pub color: Color,
    /// Whether printing swaps dark backgrounds for white ones.
    #[serde(default = "default_true")]
    pub invert_hardcopy: bool,
    /// Page size in points (width, height).
    #[serde(default = "default_size")]
    pub size: [f32; 2],
    /// Plotting regions.
    #[serde(default)]
    pub axes: Vec<Axes>,
    /// Free-standing labels.
    #[serde(default)]
    pub texts: Vec<TextLabel>,
    /// Legends.
    #[serde(default)]
    pub legends: Vec<Legend>,
    /// Colorbars.
    #[serde(default)]
    pub colorbars: Vec<Colorbar>,
}

impl Figure {
    /// Create an empty figure.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: default_figure_color(),
            invert_hardcopy: true,
            size: default_size(),
            axes: Vec::new(),
            texts: Vec::new(),
            legends: Vec::new(),
            colorbars: Vec::new(),
        }
    }

    /// Display name used in log lines.
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Figure {}", self.id)
        } else {
            format!("Figure {} ({})", self.id, self.name.trim())
        }
    }
}

/// Axis dimension for tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
    /// Depth axis (3-D axes only).
    Z,
}

/// Tick-label colors per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickColors {
    /// X tick-label color.
    pub x: Color,
    /// Y tick-label color.
    pub y: Color,
    /// Z tick-label color, absent on 2-D axes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Color>,
}

impl Default for TickColors {
    fn default() -> Self {
        Self {
            x: Color::rgb(38, 38, 38),
            y: Color::rgb(38, 38, 38),
            z: None,
        }
    }
}

impl TickColors {
    /// Color slot for a dimension, `None` when the dimension does not exist.
    pub fn get(&self, dim: Dim) -> Option<Color> {
        match dim {
            Dim::X => Some(self.x),
            Dim::Y => Some(self.y),
            Dim::Z => self.z,
        }
    }

    /// Mutable slot for a dimension.
    pub(crate) fn get_mut(&mut self, dim: Dim) -> Option<&mut Color> {
        match dim {
            Dim::X => Some(&mut self.x),
            Dim::Y => Some(&mut self.y),
            Dim::Z => self.z.as_mut(),
        }
    }
}

/// A text sub-element with its own color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label string.
    pub text: String,
    /// Label color.
    #[serde(default = "Label::default_color")]
    pub color: Color,
}

impl Label {
    fn default_color() -> Color {
        Color::BLACK
    }

    /// Create a label.
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Which label of an axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxesLabel {
    /// Axes title.
    Title,
    /// X axis label.
    X,
    /// Y axis label.
    Y,
    /// Z axis label.
    Z,
}

/// A plotted data series. Its color is data and is never restyled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name.
    #[serde(default)]
    pub label: String,
    /// Line color.
    pub color: Color,
    /// Data points.
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
}

/// A plotting region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    /// Background color.
    #[serde(default = "Axes::default_color")]
    pub color: Color,
    /// Tick-label colors.
    #[serde(default)]
    pub tick_colors: TickColors,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Label>,
    /// X axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<Label>,
    /// Y axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<Label>,
    /// Z axis label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zlabel: Option<Label>,
    /// Position in normalized figure units (left, bottom, width, height).
    #[serde(default = "default_axes_position")]
    pub position: [f32; 4],
    /// Plotted data.
    #[serde(default)]
    pub series: Vec<Series>,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            color: Self::default_color(),
            tick_colors: TickColors::default(),
            title: None,
            xlabel: None,
            ylabel: None,
            zlabel: None,
            position: default_axes_position(),
            series: Vec::new(),
        }
    }
}

impl Axes {
    fn default_color() -> Color {
        Color::WHITE
    }

    /// The label slot for `which`.
    pub fn label(&self, which: AxesLabel) -> Option<&Label> {
        match which {
            AxesLabel::Title => self.title.as_ref(),
            AxesLabel::X => self.xlabel.as_ref(),
            AxesLabel::Y => self.ylabel.as_ref(),
            AxesLabel::Z => self.zlabel.as_ref(),
        }
    }

    pub(crate) fn label_mut(&mut self, which: AxesLabel) -> Option<&mut Label> {
        match which {
            AxesLabel::Title => self.title.as_mut(),
            AxesLabel::X => self.xlabel.as_mut(),
            AxesLabel::Y => self.ylabel.as_mut(),
            AxesLabel::Z => self.zlabel.as_mut(),
        }
    }

    /// Data bounds as `(xmin, xmax, ymin, ymax)`, `None` without points.
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p[0].is_finite() && p[1].is_finite());
        let first = points.next()?;
        let init = (first[0], first[0], first[1], first[1]);
        Some(points.fold(init, |(x0, x1, y0, y1), p| {
            (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1]))
        }))
    }
}

/// A free-standing text annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Position in normalized figure units.
    #[serde(default)]
    pub position: [f32; 2],
}

/// The background fill of a legend box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendFace {
    /// Fill color.
    pub color: Color,
    /// Edge stroke.
    #[serde(default)]
    pub edge: Paint,
    /// Fill mode.
    #[serde(default)]
    pub fill_mode: FillMode,
}

/// A legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Entry text color.
    pub text_color: Color,
    /// Background color.
    pub color: Color,
    /// Box face, only exposed by some renderers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<LegendFace>,
    /// Entry strings.
    #[serde(default)]
    pub entries: Vec<String>,
    /// Position in normalized figure units.
    #[serde(default = "Legend::default_position")]
    pub position: [f32; 2],
}

impl Legend {
    fn default_position() -> [f32; 2] {
        [0.7, 0.8]
    }
}

/// A colorbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    /// Colorbar label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Position in normalized figure units (left, bottom, width, height).
    #[serde(default = "Colorbar::default_position")]
    pub position: [f32; 4],
}

impl Colorbar {
    fn default_position() -> [f32; 4] {
        [0.92, 0.11, 0.03, 0.815]
    }
}

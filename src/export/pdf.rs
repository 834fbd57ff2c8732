//! PDF rendering with `pdf-writer`.

use super::ExportBackend;
use crate::error::{FigExportError, Result};
use crate::figure::{Axes, Color, Colorbar, Figure, FillMode, Legend, TextLabel};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::path::Path;

const FONT: Name<'static> = Name(b"F1");
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 11.0;
const LEGEND_ROW: f32 = 14.0;

/// How much of the figure the renderer reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fidelity {
    /// Full vector output: backgrounds, legend boxes, frames, data and text.
    Vector,
    /// Plain print output: frames, data and text on an unpainted page.
    Print,
}

/// Renders a figure to a single-page PDF.
#[derive(Debug, Clone)]
pub struct PdfBackend {
    fidelity: Fidelity,
    available: bool,
}

impl PdfBackend {
    /// Create a backend with the given fidelity.
    pub fn new(fidelity: Fidelity) -> Self {
        Self {
            fidelity,
            available: true,
        }
    }

    /// Mark the backend (un)available.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Render `figure` to PDF bytes.
    pub fn render(&self, figure: &Figure) -> Result<Vec<u8>> {
        let [width, height] = figure.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FigExportError::export(format!(
                "figure {} has invalid size {}x{}",
                figure.id, width, height
            )));
        }

        if !figure.axes.iter().all(has_plottable_range) {
            return Err(FigExportError::export(format!(
                "figure {} has unplottable data range",
                figure.id
            )));
        }

        let mut canvas = Canvas::new(self.fidelity, width, height);
        canvas.draw_figure(figure);
        let Canvas {
            content, alphas, ..
        } = canvas;

        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let tree_id = alloc.bump();
        let page_id = alloc.bump();
        let font_id = alloc.bump();
        let content_id = alloc.bump();
        let info_id = alloc.bump();
        let gs_ids: Vec<Ref> = alphas.iter().map(|_| alloc.bump()).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height));
        page.parent(tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources.fonts().pair(FONT, font_id);
        if !alphas.is_empty() {
            let mut states = resources.ext_g_states();
            for ((name, _), id) in alphas.iter().zip(&gs_ids) {
                states.pair(Name(name.as_bytes()), *id);
            }
            states.finish();
        }
        resources.finish();
        page.finish();

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        for ((_, alpha), id) in alphas.iter().zip(&gs_ids) {
            pdf.ext_graphics(*id).non_stroking_alpha(*alpha);
        }
        pdf.stream(content_id, &content.finish());

        let title = figure.label();
        pdf.document_info(info_id)
            .title(TextStr(&title))
            .creator(TextStr("figexport"));

        Ok(pdf.finish())
    }
}

impl ExportBackend for PdfBackend {
    fn name(&self) -> &str {
        match self.fidelity {
            Fidelity::Vector => "pdf-vector",
            Fidelity::Print => "pdf-print",
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn export(&self, figure: &Figure, path: &Path) -> Result<()> {
        let bytes = self.render(figure)?;
        std::fs::write(path, bytes).map_err(|e| FigExportError::write(path.to_path_buf(), e))
    }
}

/// Type1 Helvetica without an explicit encoding only covers ASCII.
fn pdf_text(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

fn approx_text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * 0.5
}

struct Canvas {
    content: Content,
    alphas: Vec<(String, f32)>,
    fidelity: Fidelity,
    width: f32,
    height: f32,
}

impl Canvas {
    fn new(fidelity: Fidelity, width: f32, height: f32) -> Self {
        Self {
            content: Content::new(),
            alphas: Vec::new(),
            fidelity,
            width,
            height,
        }
    }

    fn paints_backgrounds(&self) -> bool {
        self.fidelity == Fidelity::Vector
    }

    fn draw_figure(&mut self, figure: &Figure) {
        if self.paints_backgrounds() {
            self.fill_rect(figure.color, 0.0, 0.0, self.width, self.height);
        }
        for axes in &figure.axes {
            self.draw_axes(axes);
        }
        for colorbar in &figure.colorbars {
            self.draw_colorbar(colorbar);
        }
        for text in &figure.texts {
            self.draw_text_label(text);
        }
        for legend in &figure.legends {
            self.draw_legend(legend);
        }
    }

    fn to_page_rect(&self, pos: [f32; 4]) -> (f32, f32, f32, f32) {
        (
            pos[0] * self.width,
            pos[1] * self.height,
            pos[2] * self.width,
            pos[3] * self.height,
        )
    }

    fn draw_axes(&mut self, axes: &Axes) {
        let (x, y, w, h) = self.to_page_rect(axes.position);
        if self.paints_backgrounds() {
            self.fill_rect(axes.color, x, y, w, h);
        }
        self.stroke_rect(axes.tick_colors.x, x, y, w, h);

        if let Some((x0, x1, y0, y1)) = axes.data_bounds() {
            let (x0, x1) = widen(x0, x1);
            let (y0, y1) = widen(y0, y1);
            let map = |p: &[f64; 2]| {
                (
                    x + ((p[0] - x0) / (x1 - x0)) as f32 * w,
                    y + ((p[1] - y0) / (y1 - y0)) as f32 * h,
                )
            };

            for series in &axes.series {
                let points: Vec<(f32, f32)> = series
                    .points
                    .iter()
                    .filter(|p| p[0].is_finite() && p[1].is_finite())
                    .map(|p| map(p))
                    .collect();
                self.polyline(series.color, &points);
            }

            let ticks = &axes.tick_colors;
            self.text(ticks.x, FONT_SIZE, x, y - 12.0, &format_tick(x0));

            let last = format_tick(x1);
            let last_x = x + w - approx_text_width(&last, FONT_SIZE);
            self.text(ticks.x, FONT_SIZE, last_x, y - 12.0, &last);

            let first = format_tick(y0);
            let first_x = x - approx_text_width(&first, FONT_SIZE) - 4.0;
            self.text(ticks.y, FONT_SIZE, first_x, y, &first);

            let top = format_tick(y1);
            let top_x = x - approx_text_width(&top, FONT_SIZE) - 4.0;
            self.text(ticks.y, FONT_SIZE, top_x, y + h - FONT_SIZE, &top);
        }

        if let Some(title) = &axes.title {
            let tx = x + (w - approx_text_width(&title.text, TITLE_SIZE)) / 2.0;
            self.text(title.color, TITLE_SIZE, tx, y + h + 6.0, &title.text);
        }
        if let Some(label) = &axes.xlabel {
            let lx = x + (w - approx_text_width(&label.text, FONT_SIZE)) / 2.0;
            self.text(label.color, FONT_SIZE, lx, y - 26.0, &label.text);
        }
        if let Some(label) = &axes.ylabel {
            let ly = y + (h - approx_text_width(&label.text, FONT_SIZE)) / 2.0;
            self.vertical_text(label.color, FONT_SIZE, x - 32.0, ly, &label.text);
        }
        if let Some(label) = &axes.zlabel {
            self.text(label.color, FONT_SIZE, x + w + 4.0, y + h / 2.0, &label.text);
        }
    }

    fn draw_colorbar(&mut self, colorbar: &Colorbar) {
        let (x, y, w, h) = self.to_page_rect(colorbar.position);
        let frame = colorbar
            .label
            .as_ref()
            .map(|l| l.color)
            .unwrap_or(Color::BLACK);
        self.stroke_rect(frame, x, y, w, h);
        if let Some(label) = &colorbar.label {
            let ly = y + (h - approx_text_width(&label.text, FONT_SIZE)) / 2.0;
            self.vertical_text(label.color, FONT_SIZE, x + w + 14.0, ly, &label.text);
        }
    }

    fn draw_text_label(&mut self, label: &TextLabel) {
        let x = label.position[0] * self.width;
        let y = label.position[1] * self.height;
        self.text(label.color, FONT_SIZE, x, y, &label.text);
    }

    fn draw_legend(&mut self, legend: &Legend) {
        let widest = legend
            .entries
            .iter()
            .map(|e| approx_text_width(e, FONT_SIZE))
            .fold(0.0_f32, f32::max);
        let w = widest + 16.0;
        let h = legend.entries.len().max(1) as f32 * LEGEND_ROW + 6.0;
        let x = legend.position[0] * self.width;
        let y = legend.position[1] * self.height - h;

        if self.paints_backgrounds() {
            match &legend.face {
                Some(face) => {
                    let alpha = match face.fill_mode {
                        FillMode::Alpha if !face.color.is_opaque() => {
                            Some(f32::from(face.color.a) / 255.0)
                        },
                        _ => None,
                    };
                    self.content.save_state();
                    if let Some(alpha) = alpha {
                        let name = format!("GS{}", self.alphas.len());
                        self.content.set_parameters(Name(name.as_bytes()));
                        self.alphas.push((name, alpha));
                    }
                    self.fill_rect(face.color, x, y, w, h);
                    self.content.restore_state();
                    if let Some(edge) = face.edge.color() {
                        self.stroke_rect(edge, x, y, w, h);
                    }
                },
                None => {
                    self.fill_rect(legend.color, x, y, w, h);
                    self.stroke_rect(legend.text_color, x, y, w, h);
                },
            }
        }

        for (row, entry) in legend.entries.iter().enumerate() {
            let ey = y + h - (row as f32 + 1.0) * LEGEND_ROW;
            self.text(legend.text_color, FONT_SIZE, x + 8.0, ey, entry);
        }
    }

    fn fill_rect(&mut self, color: Color, x: f32, y: f32, w: f32, h: f32) {
        let (r, g, b) = color.to_unit_rgb();
        self.content.set_fill_rgb(r, g, b);
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
    }

    fn stroke_rect(&mut self, color: Color, x: f32, y: f32, w: f32, h: f32) {
        let (r, g, b) = color.to_unit_rgb();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(0.5);
        self.content.rect(x, y, w, h);
        self.content.stroke();
    }

    fn polyline(&mut self, color: Color, points: &[(f32, f32)]) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let (r, g, b) = color.to_unit_rgb();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(1.0);
        self.content.move_to(x0, y0);
        for &(x, y) in rest {
            self.content.line_to(x, y);
        }
        self.content.stroke();
    }

    fn text(&mut self, color: Color, size: f32, x: f32, y: f32, s: &str) {
        self.text_with_matrix(color, size, [1.0, 0.0, 0.0, 1.0, x, y], s);
    }

    fn vertical_text(&mut self, color: Color, size: f32, x: f32, y: f32, s: &str) {
        self.text_with_matrix(color, size, [0.0, 1.0, -1.0, 0.0, x, y], s);
    }

    fn text_with_matrix(&mut self, color: Color, size: f32, matrix: [f32; 6], s: &str) {
        if s.is_empty() {
            return;
        }
        let (r, g, b) = color.to_unit_rgb();
        let bytes = pdf_text(s);
        self.content.set_fill_rgb(r, g, b);
        self.content.begin_text();
        self.content.set_font(FONT, size);
        self.content.set_text_matrix(matrix);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }
}

/// Whether the data span of `axes` fits in an `f64`.
fn has_plottable_range(axes: &Axes) -> bool {
    match axes.data_bounds() {
        Some((x0, x1, y0, y1)) => {
            let (x0, x1) = widen(x0, x1);
            let (y0, y1) = widen(y0, y1);
            (x1 - x0).is_finite() && (y1 - y0).is_finite()
        },
        None => true,
    }
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        format!("{:.3}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Label, LegendFace, Paint, Series};

    fn sample() -> Figure {
        let mut fig = Figure::new(1, "Loss Curve");
        fig.axes.push(Axes {
            title: Some(Label::new("Loss", Color::BLACK)),
            xlabel: Some(Label::new("epoch", Color::BLACK)),
            ylabel: Some(Label::new("loss", Color::BLACK)),
            series: vec![Series {
                label: "train".into(),
                color: Color::rgb(0, 114, 189),
                points: vec![[0.0, 1.0], [1.0, 0.5], [2.0, 0.25]],
            }],
            ..Axes::default()
        });
        fig.legends.push(Legend {
            text_color: Color::BLACK,
            color: Color::WHITE,
            face: Some(LegendFace {
                color: Color::new(0, 0, 255, 128),
                edge: Paint::None,
                fill_mode: FillMode::Alpha,
            }),
            entries: vec!["train".into()],
            position: [0.7, 0.8],
        });
        fig
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = PdfBackend::new(Fidelity::Vector).render(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"Helvetica"));
        assert!(contains(&bytes, b"(Loss)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let backend = PdfBackend::new(Fidelity::Vector);
        assert_eq!(backend.render(&sample()).unwrap(), backend.render(&sample()).unwrap());
    }

    #[test]
    fn translucent_face_gets_a_graphics_state() {
        let bytes = PdfBackend::new(Fidelity::Vector).render(&sample()).unwrap();
        assert!(contains(&bytes, b"/GS0"));

        let print = PdfBackend::new(Fidelity::Print).render(&sample()).unwrap();
        assert!(!contains(&print, b"/GS0"));
    }

    #[test]
    fn non_ascii_text_is_replaced() {
        assert_eq!(pdf_text("Δt"), b"?t".to_vec());
    }

    #[test]
    fn rejects_degenerate_page_size() {
        let mut fig = sample();
        fig.size = [0.0, 100.0];
        let err = PdfBackend::new(Fidelity::Print).render(&fig).unwrap_err();
        assert!(matches!(err, FigExportError::Export(_)));
    }

    #[test]
    fn rejects_data_span_that_overflows() {
        let mut fig = sample();
        fig.axes[0].series[0].points = vec![[-1e308, 0.0], [1e308, 1.0]];
        let err = PdfBackend::new(Fidelity::Vector).render(&fig).unwrap_err();
        assert!(matches!(err, FigExportError::Export(ref m) if m.contains("unplottable")));

        fig.axes[0].series[0].points = vec![[0.0, -1e308], [1.0, 1e308]];
        assert!(PdfBackend::new(Fidelity::Print).render(&fig).is_err());
    }

    #[test]
    fn large_but_finite_spans_render_without_nan() {
        let mut fig = sample();
        fig.axes[0].series[0].points = vec![[-1e300, 0.0], [1e300, 1.0]];
        let bytes = PdfBackend::new(Fidelity::Vector).render(&fig).unwrap();
        assert!(!contains(&bytes, b"NaN"));
    }

    #[test]
    fn single_value_ranges_are_widened() {
        assert_eq!(widen(2.0, 2.0), (1.5, 2.5));
        assert_eq!(widen(0.0, 1.0), (0.0, 1.0));
    }
}

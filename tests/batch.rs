use figexport::batch::{Level, NOTHING_TO_EXPORT};
use figexport::export::{ExportBackend, Exporter, Fidelity, PdfBackend};
use figexport::figure::{
    Axes, Color, Colorbar, FillMode, Label, Legend, LegendFace, Paint, Series, TextLabel,
};
use figexport::{export_open_figures, export_open_figures_with, ExportOptions, FigExportError};
use figexport::{Figure, Session};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

fn dark_figure(id: u32, name: &str) -> Figure {
    let grey = Color::rgb(204, 204, 204);
    let mut fig = Figure::new(id, name);
    fig.color = Color::rgb(30, 30, 30);
    fig.axes.push(Axes {
        color: Color::BLACK,
        title: Some(Label::new("title", Color::WHITE)),
        xlabel: Some(Label::new("x", grey)),
        series: vec![Series {
            label: "data".into(),
            color: Color::rgb(0, 114, 189),
            points: vec![[0.0, 0.0], [1.0, 2.0], [2.0, 1.0]],
        }],
        ..Axes::default()
    });
    fig.axes[0].tick_colors.x = grey;
    fig.axes[0].tick_colors.y = grey;
    fig.texts.push(TextLabel {
        text: "note".into(),
        color: grey,
        position: [0.2, 0.9],
    });
    fig.legends.push(Legend {
        text_color: Color::WHITE,
        color: Color::rgb(40, 40, 40),
        face: Some(LegendFace {
            color: Color::new(0, 0, 255, 128),
            edge: Paint::Color(Color::WHITE),
            fill_mode: FillMode::Alpha,
        }),
        entries: vec!["data".into()],
        position: [0.7, 0.8],
    });
    fig.colorbars.push(Colorbar {
        label: Some(Label::new("units", grey)),
        position: [0.92, 0.11, 0.03, 0.8],
    });
    fig
}

fn pdf_files(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

/// Writes through the vector renderer, except for one figure, and records
/// the figure background seen at export time.
#[derive(Debug)]
struct FailingFor {
    id: u32,
    seen: Rc<RefCell<Vec<(u32, Color)>>>,
}

impl ExportBackend for FailingFor {
    fn name(&self) -> &str {
        "failing"
    }

    fn export(&self, figure: &Figure, path: &Path) -> figexport::Result<()> {
        self.seen.borrow_mut().push((figure.id, figure.color));
        if figure.id == self.id {
            return Err(FigExportError::export("disk full"));
        }
        PdfBackend::new(Fidelity::Vector).export(figure, path)
    }
}

fn failing_exporter(id: u32) -> (Exporter, Rc<RefCell<Vec<(u32, Color)>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let exporter = Exporter::new(
        Box::new(FailingFor {
            id,
            seen: seen.clone(),
        }),
        Box::new(PdfBackend::new(Fidelity::Print)),
    );
    (exporter, seen)
}

#[test]
fn exports_named_and_unnamed_figures() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Figures");
    let mut session = Session::with_figures(vec![
        dark_figure(1, "Loss Curve"),
        Figure::new(2, ""),
    ]);

    let report = export_open_figures(&mut session, &ExportOptions::with_output_dir(&dir)).unwrap();

    assert_eq!(
        report.exported,
        vec![dir.join("Fig001_Loss_Curve.pdf"), dir.join("Fig002_Figure2.pdf")]
    );
    assert!(report.is_success());
    assert_eq!(report.lines.len(), 2);
    assert!(report.lines.iter().all(|l| l.level == Level::Info));
    assert!(report.lines[0].message.contains("Fig001_Loss_Curve.pdf"));

    let bytes = std::fs::read(dir.join("Fig001_Loss_Curve.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn empty_session_only_creates_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("nested").join("Figures");
    let mut session = Session::new();

    let report = export_open_figures(&mut session, &ExportOptions::with_output_dir(&dir)).unwrap();

    assert!(dir.is_dir());
    assert!(pdf_files(&dir).is_empty());
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].level, Level::Info);
    assert_eq!(report.lines[0].message, NOTHING_TO_EXPORT);
}

#[test]
fn rerun_overwrites_instead_of_accumulating() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_path_buf();
    let mut session =
        Session::with_figures(vec![dark_figure(1, "A/B:C"), dark_figure(12, "  spaced  ")]);
    let options = ExportOptions::with_output_dir(&dir);

    export_open_figures(&mut session, &options).unwrap();
    let first = pdf_files(&dir);
    std::fs::write(dir.join("Fig001_A_B_C.pdf"), b"stale").unwrap();

    export_open_figures(&mut session, &options).unwrap();
    let second = pdf_files(&dir);

    assert_eq!(first, second);
    assert_eq!(
        second,
        BTreeSet::from(["Fig001_A_B_C.pdf".to_string(), "Fig012_spaced.pdf".to_string()])
    );
    let refreshed = std::fs::read(dir.join("Fig001_A_B_C.pdf")).unwrap();
    assert!(refreshed.starts_with(b"%PDF-"));
}

#[test]
fn style_is_restored_after_successful_export() {
    let tmp = TempDir::new().unwrap();
    let original = dark_figure(4, "dark");
    let mut session = Session::with_figures(vec![original.clone()]);

    export_open_figures(&mut session, &ExportOptions::with_output_dir(tmp.path())).unwrap();

    assert_eq!(session.figures[0], original);
}

#[test]
fn failing_figure_is_isolated_and_all_styles_restored() {
    let tmp = TempDir::new().unwrap();
    let originals = vec![
        dark_figure(1, "first"),
        dark_figure(2, "second"),
        dark_figure(3, "third"),
    ];
    let mut session = Session::with_figures(originals.clone());
    let (exporter, seen) = failing_exporter(2);

    let report = export_open_figures_with(&mut session, tmp.path(), &exporter).unwrap();

    assert_eq!(
        pdf_files(tmp.path()),
        BTreeSet::from(["Fig001_first.pdf".to_string(), "Fig003_third.pdf".to_string()])
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, 2);
    assert_eq!(report.failed[0].path, tmp.path().join("Fig002_second.pdf"));

    let warnings: Vec<_> = report.lines.iter().filter(|l| l.level == Level::Warn).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("figure 2"));
    assert!(warnings[0].message.contains("disk full"));

    assert_eq!(session.figures, originals);

    // Every figure, failing or not, was exported in the print palette.
    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|&(_, color)| color == Color::WHITE));
}

#[test]
fn translucent_legend_face_is_bit_identical_after_failure() {
    let tmp = TempDir::new().unwrap();
    let mut session = Session::with_figures(vec![dark_figure(9, "legend")]);
    let before = session.figures[0].legends[0].face.clone().unwrap();
    let (exporter, _) = failing_exporter(9);

    let report = export_open_figures_with(&mut session, tmp.path(), &exporter).unwrap();

    assert!(!report.is_success());
    let after = session.figures[0].legends[0].face.clone().unwrap();
    assert_eq!(after, before);
    assert_eq!(after.color, Color::new(0, 0, 255, 128));
    assert_eq!(after.edge, Paint::Color(Color::WHITE));
    assert_eq!(after.fill_mode, FillMode::Alpha);
}

#[test]
fn print_fallback_still_writes_files() {
    let tmp = TempDir::new().unwrap();
    let mut session = Session::with_figures(vec![dark_figure(5, "fallback")]);
    let options = ExportOptions {
        output_dir: Some(tmp.path().to_path_buf()),
        force_print: true,
    };

    let report = export_open_figures(&mut session, &options).unwrap();

    assert_eq!(report.exported, vec![tmp.path().join("Fig005_fallback.pdf")]);
    assert!(std::fs::read(&report.exported[0]).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn directory_creation_failure_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let mut session = Session::with_figures(vec![dark_figure(1, "x")]);

    let err = export_open_figures(
        &mut session,
        &ExportOptions::with_output_dir(blocker.join("Figures")),
    )
    .unwrap_err();

    assert!(matches!(err, FigExportError::DirectoryCreation { .. }));
}

#[test]
fn unwritable_target_becomes_a_warning() {
    let tmp = TempDir::new().unwrap();
    // A directory squatting on the output file name makes the write fail.
    std::fs::create_dir(tmp.path().join("Fig001_busy.pdf")).unwrap();
    let original = dark_figure(1, "busy");
    let mut session = Session::with_figures(vec![original.clone(), dark_figure(2, "free")]);

    let report =
        export_open_figures(&mut session, &ExportOptions::with_output_dir(tmp.path())).unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.exported, vec![tmp.path().join("Fig002_free.pdf")]);
    assert_eq!(session.figures[0], original);
}

/// Renders normally but panics for one figure.
#[derive(Debug)]
struct PanicsFor(u32);

impl ExportBackend for PanicsFor {
    fn name(&self) -> &str {
        "panicking"
    }

    fn export(&self, figure: &Figure, path: &Path) -> figexport::Result<()> {
        if figure.id == self.0 {
            panic!("renderer crashed on figure {}", figure.id);
        }
        PdfBackend::new(Fidelity::Vector).export(figure, path)
    }
}

#[test]
fn panicking_backend_only_fails_its_figure() {
    let tmp = TempDir::new().unwrap();
    let originals: Vec<_> = (1..=3).map(|id| dark_figure(id, "fig")).collect();
    let mut session = Session::with_figures(originals.clone());
    let exporter = Exporter::new(
        Box::new(PanicsFor(2)),
        Box::new(PdfBackend::new(Fidelity::Print)),
    );

    let report = export_open_figures_with(&mut session, tmp.path(), &exporter).unwrap();

    assert_eq!(
        pdf_files(tmp.path()),
        BTreeSet::from(["Fig001_fig.pdf".to_string(), "Fig003_fig.pdf".to_string()])
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, 2);
    assert!(report.failed[0].reason.contains("renderer crashed on figure 2"));

    let warnings: Vec<_> = report.lines.iter().filter(|l| l.level == Level::Warn).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("figure 2"));

    assert_eq!(session.figures, originals);
}

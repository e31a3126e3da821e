use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use pdf_report::backend::DocumentBackend;
use pdf_report::fonts::bundled_fonts_source_dir;
use pdf_report::{
    app, default_alignments, CellSpec, Dataset, DatasetError, FaultKind, FontSpec, FontStyle,
    ImageSource, PageSetup, PdfBackend, RenderSession, ReportBuilder, ReportError, ReportLayout,
    TtfFamily,
};

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse generated pdf")
        .get_pages()
        .len()
}

fn embedded_font_files(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse generated pdf")
        .objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| dict.has(b"FontFile2"))
        .count()
}

fn bundled_family() -> TtfFamily {
    TtfFamily::load(bundled_fonts_source_dir(), "DejaVuSans").expect("load bundled DejaVuSans")
}

/// Copies the bundled family into `dir` under the family name `name`.
fn copy_family(dir: &std::path::Path, name: &str) {
    for suffix in ["Regular", "Bold", "Italic", "BoldItalic"] {
        let source = bundled_fonts_source_dir().join(format!("DejaVuSans-{suffix}.ttf"));
        std::fs::copy(&source, dir.join(format!("{name}-{suffix}.ttf"))).expect("copy font");
    }
}

fn png_bytes() -> Vec<u8> {
    let image = RgbaImage::from_fn(16, 8, |x, _| {
        if x < 8 {
            Rgba([200, 30, 30, 255])
        } else {
            Rgba([30, 30, 200, 128])
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

fn layout(columns: usize) -> ReportLayout {
    ReportLayout::default()
        .with_alignments(default_alignments(columns))
        .with_date_line("Tue Jan 16, 2018")
}

#[test]
fn renders_single_page_pdf() {
    let data = Dataset::from_reader(
        "Date,Qty,Item,Price\n2018-01-16,3,Widget,9.99\n2018-01-16,1,Gadget,24.50\n".as_bytes(),
    )
    .expect("csv");
    let bytes = ReportBuilder::new(layout(4))
        .render_pdf(&data, PageSetup::default())
        .expect("render pdf");
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn long_tables_produce_several_pages() {
    let mut rows = vec![vec!["Item".to_owned(), "Qty".to_owned(), "Price".to_owned()]];
    rows.extend(
        (0..80).map(|index| vec![format!("item {index}"), index.to_string(), "1.00".to_owned()]),
    );
    let data = Dataset::from_rows(rows).expect("dataset");
    let bytes = ReportBuilder::new(layout(3))
        .render_pdf(&data, PageSetup::default())
        .expect("render pdf");
    assert!(page_count(&bytes) > 1);
}

#[test]
fn embeds_corner_image() {
    let data = Dataset::from_rows([["A", "B"], ["1", "2"]]).expect("dataset");
    let with_image = ReportBuilder::new(layout(2).with_corner_image(ImageSource::from_bytes(png_bytes())))
        .render_pdf(&data, PageSetup::default())
        .expect("render with image");
    let without_image = ReportBuilder::new(layout(2))
        .render_pdf(&data, PageSetup::default())
        .expect("render without image");
    assert!(with_image.len() > without_image.len());
}

#[test]
fn undecodable_image_is_an_image_fault() {
    let data = Dataset::from_rows([["A"], ["1"]]).expect("dataset");
    let result = ReportBuilder::new(
        layout(1).with_corner_image(ImageSource::from_bytes(b"not an image".to_vec())),
    )
    .render_pdf(&data, PageSetup::default());
    match result {
        Err(ReportError::Render(fault)) => assert_eq!(fault.kind(), FaultKind::Image),
        other => panic!("expected image fault, got {other:?}"),
    }
}

#[test]
fn unknown_font_fails_the_document() {
    let mut session = RenderSession::new(PdfBackend::new("fonts"), PageSetup::default());
    session.add_page();
    session.set_font(pdf_report::FontSpec::regular("Papyrus", 12.0));
    match session.finish() {
        Err(fault) => assert_eq!(fault.kind(), FaultKind::UnknownFont),
        Ok(_) => panic!("expected unknown font fault"),
    }
}

#[test]
fn loads_csv_and_saves_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("orders.csv");
    std::fs::write(&input, "Date,Qty\n2018-01-16,3\n").expect("write csv");

    let data = Dataset::load(&input).expect("load csv");
    let bytes = ReportBuilder::new(layout(2))
        .render_pdf(&data, PageSetup::default())
        .expect("render");
    let output = dir.path().join("report.pdf");
    pdf_report::save_pdf(&bytes, &output).expect("save");
    assert_eq!(page_count(&std::fs::read(&output).expect("read back")), 1);
}

#[test]
fn missing_input_is_reported_before_rendering() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("report.pdf");
    let result = app::run(dir.path().join("absent.csv"), &output);
    assert!(matches!(
        result,
        Err(ReportError::Dataset(DatasetError::Open { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn truetype_family_is_measured_and_embedded() {
    let data = Dataset::from_rows([["Item", "Price"], ["Widget", "9.99"]]).expect("dataset");
    let layout = layout(2)
        .with_title_font(FontSpec::bold("DejaVuSans", 28.0))
        .with_date_font(FontSpec::regular("DejaVuSans", 20.0))
        .with_header_font(FontSpec::bold("DejaVuSans", 16.0))
        .with_body_font(FontSpec::regular("DejaVuSans", 16.0));

    let backend = PdfBackend::new("truetype").with_font_family(bundled_family());
    let font = FontSpec::regular("dejavusans", 16.0);
    let expected = bundled_family().text_width(FontStyle::Regular, 16.0, "Widget");
    assert!((backend.text_width(&font, "Widget") - expected).abs() < 1e-9);
    assert!(expected > 0.0);

    let mut session = RenderSession::new(backend, PageSetup::default());
    ReportBuilder::new(layout)
        .render(&mut session, &data)
        .expect("alignments match");
    let bytes = session.finish().expect("finish");

    assert_eq!(page_count(&bytes), 1);
    // Regular and bold faces are embedded once each.
    assert_eq!(embedded_font_files(&bytes), 2);
}

#[test]
fn builtin_fonts_embed_no_font_files() {
    let data = Dataset::from_rows([["Item"], ["Widget"]]).expect("dataset");
    let bytes = ReportBuilder::new(layout(1))
        .render_pdf(&data, PageSetup::default())
        .expect("render pdf");
    assert_eq!(embedded_font_files(&bytes), 0);
}

#[test]
fn font_selected_before_first_page_fails_when_unloadable() {
    let dir = tempfile::tempdir().expect("tempdir");
    copy_family(dir.path(), "Fam");
    let family = TtfFamily::load(dir.path(), "Fam").expect("load copied family");

    let mut session = RenderSession::new(
        PdfBackend::new("fonts").with_font_family(family),
        PageSetup::default(),
    );
    session.set_font(FontSpec::regular("Fam", 12.0));
    assert!(!session.is_faulted());

    for suffix in ["Regular", "Bold", "Italic", "BoldItalic"] {
        std::fs::remove_file(dir.path().join(format!("Fam-{suffix}.ttf"))).expect("remove font");
    }
    session.add_page();
    session.draw_cell(&CellSpec::new(40.0, 10.0).with_text("never drawn"));

    match session.finish() {
        Err(fault) => {
            assert_eq!(fault.kind(), FaultKind::InvalidStyle);
            assert!(fault.message().contains("Fam-Regular.ttf"));
        }
        Ok(_) => panic!("text without its font must not finish successfully"),
    }
}

#[test]
fn font_selected_before_first_page_is_embedded() {
    let dir = tempfile::tempdir().expect("tempdir");
    copy_family(dir.path(), "Fam");
    let family = TtfFamily::load(dir.path(), "Fam").expect("load copied family");

    let mut session = RenderSession::new(
        PdfBackend::new("fonts").with_font_family(family),
        PageSetup::default(),
    );
    session.set_font(FontSpec::regular("Fam", 12.0));
    session.add_page();
    session.draw_cell(&CellSpec::new(40.0, 10.0).with_text("drawn"));
    let bytes = session.finish().expect("finish");
    assert_eq!(embedded_font_files(&bytes), 1);
}

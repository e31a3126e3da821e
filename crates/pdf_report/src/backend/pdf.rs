//! PDF backend built on `printpdf`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};

use image::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Image, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use super::metrics::StandardFamily;
use super::{BackendError, DocumentBackend};
use crate::fonts::TtfFamily;
use crate::geometry::{Rect, PT_TO_MM};
use crate::imaging::{self, ImageSource};
use crate::style::{FontSpec, FontStyle, Rgb};

const LAYER_NAME: &str = "Layer 1";
const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

type FontKey = (String, FontStyle);

enum Resolved<'a> {
    Standard(StandardFamily),
    TrueType(&'a TtfFamily),
}

fn builtin_font(family: StandardFamily, style: FontStyle) -> BuiltinFont {
    match (family, style) {
        (StandardFamily::Times, FontStyle::Regular) => BuiltinFont::TimesRoman,
        (StandardFamily::Times, FontStyle::Bold) => BuiltinFont::TimesBold,
        (StandardFamily::Times, FontStyle::Italic) => BuiltinFont::TimesItalic,
        (StandardFamily::Times, FontStyle::BoldItalic) => BuiltinFont::TimesBoldItalic,
        (StandardFamily::Helvetica, FontStyle::Regular) => BuiltinFont::Helvetica,
        (StandardFamily::Helvetica, FontStyle::Bold) => BuiltinFont::HelveticaBold,
        (StandardFamily::Helvetica, FontStyle::Italic) => BuiltinFont::HelveticaOblique,
        (StandardFamily::Helvetica, FontStyle::BoldItalic) => BuiltinFont::HelveticaBoldOblique,
        (StandardFamily::Courier, FontStyle::Regular) => BuiltinFont::Courier,
        (StandardFamily::Courier, FontStyle::Bold) => BuiltinFont::CourierBold,
        (StandardFamily::Courier, FontStyle::Italic) => BuiltinFont::CourierOblique,
        (StandardFamily::Courier, FontStyle::BoldItalic) => BuiltinFont::CourierBoldOblique,
    }
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn font_key(font: &FontSpec) -> FontKey {
    (font.family().trim().to_ascii_lowercase(), font.style())
}

/// Writes PDF documents through `printpdf`.
///
/// The standard Times, Helvetica and Courier families are always available.  Additional
/// TrueType families are registered with [`PdfBackend::with_font_family`] and embedded on first
/// use.  The document itself is created lazily by the first [`DocumentBackend::begin_page`] so
/// its first page gets the requested size.
pub struct PdfBackend {
    title: String,
    doc: Option<PdfDocumentReference>,
    layer: Option<PdfLayerReference>,
    page_height: f64,
    pages: usize,
    fonts: HashMap<FontKey, IndirectFontRef>,
    families: Vec<TtfFamily>,
}

impl PdfBackend {
    /// Creates a backend for a document titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            doc: None,
            layer: None,
            page_height: 0.0,
            pages: 0,
            fonts: HashMap::new(),
            families: Vec::new(),
        }
    }

    /// Registers a TrueType family under its own name.
    pub fn with_font_family(mut self, family: TtfFamily) -> Self {
        self.families.push(family);
        self
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn resolve(&self, family: &str) -> Option<Resolved<'_>> {
        let wanted = family.trim();
        self.families
            .iter()
            .find(|candidate| candidate.name().eq_ignore_ascii_case(wanted))
            .map(Resolved::TrueType)
            .or_else(|| StandardFamily::resolve(wanted).map(Resolved::Standard))
    }

    fn load_font(&mut self, font: &FontSpec) -> Result<IndirectFontRef, BackendError> {
        let key = font_key(font);
        if let Some(loaded) = self.fonts.get(&key) {
            return Ok(loaded.clone());
        }

        let load_error = |message: String| BackendError::FontLoad {
            font: font.to_string(),
            message,
        };
        let Some(doc) = self.doc.as_ref() else {
            return Err(load_error("no document page has been started".to_owned()));
        };

        let loaded = match self.resolve(font.family()) {
            Some(Resolved::Standard(family)) => doc
                .add_builtin_font(builtin_font(family, font.style()))
                .map_err(|err| load_error(err.to_string()))?,
            Some(Resolved::TrueType(family)) => {
                let path = family.file(font.style());
                let file = File::open(&path)
                    .map_err(|err| load_error(format!("{}: {}", path.display(), err)))?;
                doc.add_external_font(BufReader::new(file))
                    .map_err(|err| load_error(err.to_string()))?
            }
            None => {
                return Err(BackendError::UnknownFont {
                    family: font.family().to_owned(),
                })
            }
        };

        log::debug!("embedded font {}", font);
        self.fonts.insert(key, loaded.clone());
        Ok(loaded)
    }

    fn points(&self, rect: Rect) -> Vec<(Point, bool)> {
        let top = self.page_height - rect.y;
        let bottom = self.page_height - rect.bottom();
        [
            (rect.x, top),
            (rect.right(), top),
            (rect.right(), bottom),
            (rect.x, bottom),
        ]
        .iter()
        .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
        .collect()
    }

    fn shape(&self, rect: Rect, has_fill: bool, has_stroke: bool) -> Line {
        Line {
            points: self.points(rect),
            is_closed: true,
            has_fill,
            has_stroke,
            is_clipping_path: false,
        }
    }
}

impl DocumentBackend for PdfBackend {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), BackendError> {
        let layer = match self.doc.as_ref() {
            Some(doc) => {
                let (page, layer) = doc.add_page(Mm(width), Mm(height), LAYER_NAME);
                doc.get_page(page).get_layer(layer)
            }
            None => {
                let (doc, page, layer) =
                    PdfDocument::new(self.title.as_str(), Mm(width), Mm(height), LAYER_NAME);
                let layer = doc.get_page(page).get_layer(layer);
                self.doc = Some(doc);
                layer
            }
        };

        self.layer = Some(layer);
        self.page_height = height;
        self.pages += 1;
        Ok(())
    }

    fn select_font(&mut self, font: &FontSpec) -> Result<(), BackendError> {
        if self.resolve(font.family()).is_none() {
            return Err(BackendError::UnknownFont {
                family: font.family().to_owned(),
            });
        }
        // Fonts selected before the first page are embedded when text is first drawn.
        if self.doc.is_some() {
            self.load_font(font)?;
        }
        Ok(())
    }

    fn text_width(&self, font: &FontSpec, text: &str) -> f64 {
        match self.resolve(font.family()) {
            Some(Resolved::Standard(family)) => family.text_width(font.style(), font.size(), text),
            Some(Resolved::TrueType(family)) => family.text_width(font.style(), font.size(), text),
            None => 0.0,
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let Some(layer) = self.layer.as_ref() else {
            return;
        };
        layer.set_fill_color(pdf_color(color));
        layer.add_shape(self.shape(rect, true, false));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f64) {
        let Some(layer) = self.layer.as_ref() else {
            return;
        };
        layer.set_outline_color(pdf_color(color));
        layer.set_outline_thickness(line_width / PT_TO_MM);
        layer.add_shape(self.shape(rect, false, true));
    }

    fn draw_text(&mut self, x: f64, baseline: f64, font: &FontSpec, color: Rgb, text: &str) {
        let font_ref = match self.load_font(font) {
            Ok(font_ref) => font_ref,
            Err(err) => {
                log::warn!("skipping text '{}': {}", text, err);
                return;
            }
        };
        let Some(layer) = self.layer.as_ref() else {
            return;
        };
        layer.set_fill_color(pdf_color(color));
        layer.use_text(
            text,
            font.size(),
            Mm(x),
            Mm(self.page_height - baseline),
            &font_ref,
        );
    }

    fn place_image(&mut self, image: &ImageSource, rect: Rect) -> Result<(), BackendError> {
        let Some(layer) = self.layer.clone() else {
            return Err(BackendError::Page {
                page: self.pages,
                message: "no page has been started".to_owned(),
            });
        };

        let decoded = image.decode().map_err(|source| BackendError::Image {
            image: image.to_string(),
            source,
        })?;
        let (px_width, px_height) = decoded.dimensions();
        if px_width == 0 || px_height == 0 || rect.is_degenerate() {
            log::warn!("skipping empty image placement for {}", image);
            return Ok(());
        }

        let natural_width = f64::from(px_width) * MM_PER_INCH / DEFAULT_IMAGE_DPI;
        let natural_height = f64::from(px_height) * MM_PER_INCH / DEFAULT_IMAGE_DPI;
        let flattened = DynamicImage::ImageRgb8(imaging::flatten_to_rgb(&decoded));

        Image::from_dynamic_image(&flattened).add_to_layer(
            layer,
            Some(Mm(rect.x)),
            Some(Mm(self.page_height - rect.bottom())),
            None,
            Some(rect.width / natural_width),
            Some(rect.height / natural_height),
            Some(DEFAULT_IMAGE_DPI),
        );
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>, BackendError> {
        let Some(doc) = self.doc else {
            return Err(BackendError::Finalize {
                message: "document has no pages".to_owned(),
            });
        };

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer).map_err(|err| BackendError::Finalize {
            message: err.to_string(),
        })?;
        writer.into_inner().map_err(|err| BackendError::Finalize {
            message: err.to_string(),
        })
    }
}

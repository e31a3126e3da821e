//! TrueType font families for the PDF backend.
//!
//! A family is a directory entry set named `<Name>-Regular.ttf`, `<Name>-Bold.ttf`,
//! `<Name>-Italic.ttf` and `<Name>-BoldItalic.ttf`.  Glyph metrics come from a `genpdf` font
//! cache; the same files are embedded into the document by [`PdfBackend`][crate::backend::PdfBackend].
//!
//! Directories are searched in this order:
//!
//! 1. the directory named by the `PDF_REPORT_FONTS_DIR` environment variable,
//! 2. `assets/fonts` next to the running executable,
//! 3. `assets/fonts` inside this crate's source tree.

use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{self, FontCache};
use genpdf::Mm;

use crate::style::FontStyle;

/// Environment variable that points at an additional font directory.
pub const FONTS_DIR_ENV: &str = "PDF_REPORT_FONTS_DIR";

/// Font size used for measuring; widths scale linearly from it.
const MEASURE_SIZE: u8 = 100;

const STYLE_SUFFIXES: [(FontStyle, &str); 4] = [
    (FontStyle::Regular, "Regular"),
    (FontStyle::Bold, "Bold"),
    (FontStyle::Italic, "Italic"),
    (FontStyle::BoldItalic, "BoldItalic"),
];

/// Errors raised while locating or loading a TrueType family.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("unable to locate font family '{name}'; checked: {attempts}")]
    NotFound { name: String, attempts: String },
    #[error("failed to load font family '{name}' from {}", directory.display())]
    Load {
        name: String,
        directory: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Returns the crate's own font directory.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

/// Directories searched for font families, in priority order.
pub fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn family_file(directory: &Path, name: &str, suffix: &str) -> PathBuf {
    directory.join(format!("{name}-{suffix}.ttf"))
}

fn missing_font_files(directory: &Path, name: &str) -> Vec<PathBuf> {
    STYLE_SUFFIXES
        .iter()
        .map(|(_, suffix)| family_file(directory, name, suffix))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

/// Finds the first candidate directory that holds all four files of `name`.
pub fn resolve_font_directory(name: &str) -> Result<PathBuf, FontError> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, name);
        if missing.is_empty() {
            return Ok(candidate);
        }

        let missing_list = missing
            .iter()
            .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
            .collect::<Vec<_>>()
            .join(", ");
        attempts.push(format!("{} (missing files [{}])", candidate.display(), missing_list));
    }

    let attempts = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(FontError::NotFound {
        name: name.to_owned(),
        attempts,
    })
}

/// Indicates whether the family `name` can be found in any search directory.
pub fn family_available(name: &str) -> bool {
    resolve_font_directory(name).is_ok()
}

/// A loaded TrueType family: file locations plus a metrics cache.
pub struct TtfFamily {
    name: String,
    directory: PathBuf,
    cache: FontCache,
}

impl TtfFamily {
    /// Loads the family `name` from `directory`.
    pub fn load(directory: impl AsRef<Path>, name: &str) -> Result<Self, FontError> {
        let directory = directory.as_ref().to_path_buf();
        let data = fonts::from_files(&directory, name, None).map_err(|source| FontError::Load {
            name: name.to_owned(),
            directory: directory.clone(),
            source,
        })?;
        log::debug!("loaded font family '{}' from {}", name, directory.display());

        Ok(Self {
            name: name.to_owned(),
            directory,
            cache: FontCache::new(data),
        })
    }

    /// Searches the candidate directories for `name` and loads it.
    pub fn discover(name: &str) -> Result<Self, FontError> {
        let directory = resolve_font_directory(name)?;
        Self::load(directory, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the file holding `style`.
    pub fn file(&self, style: FontStyle) -> PathBuf {
        let suffix = STYLE_SUFFIXES
            .iter()
            .find(|(candidate, _)| *candidate == style)
            .map_or("Regular", |(_, suffix)| suffix);
        family_file(&self.directory, &self.name, suffix)
    }

    /// Width of `text` in millimetres at `size` points.
    pub fn text_width(&self, style: FontStyle, size: f64, text: &str) -> f64 {
        let mut measure = genpdf::style::Style::new().with_font_size(MEASURE_SIZE);
        if style.is_bold() {
            measure.set_bold();
        }
        if style.is_italic() {
            measure.set_italic();
        }
        let width = mm_to_f64(measure.str_width(&self.cache, text));
        width * size / f64::from(MEASURE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        bundled_fonts_source_dir, family_available, resolve_font_directory, FontError, TtfFamily,
    };
    use crate::style::FontStyle;

    #[test]
    fn unknown_family_lists_attempts() {
        match resolve_font_directory("NoSuchFamilyAnywhere") {
            Err(FontError::NotFound { attempts, .. }) => assert!(!attempts.is_empty()),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!family_available("NoSuchFamilyAnywhere"));
    }

    #[test]
    fn discovers_bundled_family() {
        assert!(family_available("DejaVuSans"));
        let family = TtfFamily::discover("DejaVuSans").expect("load DejaVuSans");
        assert_eq!(family.name(), "DejaVuSans");
        assert!(family.file(FontStyle::Bold).ends_with("DejaVuSans-Bold.ttf"));
        assert!(family.file(FontStyle::BoldItalic).is_file());
    }

    #[test]
    fn measures_bundled_family() {
        let family = TtfFamily::load(bundled_fonts_source_dir(), "DejaVuSans").expect("load");
        let narrow = family.text_width(FontStyle::Regular, 12.0, "iii");
        let wide = family.text_width(FontStyle::Regular, 12.0, "WWW");
        assert!(narrow > 0.0);
        assert!(wide > narrow);

        // Widths scale linearly with the point size.
        let doubled = family.text_width(FontStyle::Regular, 24.0, "WWW");
        assert!((doubled - 2.0 * wide).abs() < 1e-6);
        assert!(family.text_width(FontStyle::Bold, 12.0, "WWW") > 0.0);
    }
}

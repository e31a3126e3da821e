//! Image sources and decoding helpers.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, Rgba, RgbImage};

/// Where image data comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Encoded image bytes held in memory.
    Bytes(Vec<u8>),
    /// Encoded image stored on disk.
    Path(PathBuf),
}

impl ImageSource {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Decodes the source into pixels.
    pub fn decode(&self) -> Result<DynamicImage, ImageLoadError> {
        match self {
            Self::Bytes(bytes) => decode_image_from_bytes(bytes),
            Self::Path(path) => decode_image_from_path(path),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Failure to read or decode an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("image file {path} does not exist")]
    Missing { path: PathBuf },
    #[error("failed to open image file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {origin}")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decodes an image from in-memory bytes.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<DynamicImage, ImageLoadError> {
    let bytes = bytes.as_ref();
    image::load_from_memory(bytes).map_err(|source| ImageLoadError::Decode {
        origin: format!("<{} bytes in memory>", bytes.len()),
        source,
    })
}

/// Decodes the image stored at `path`, guessing the format from its content.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<DynamicImage, ImageLoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ImageLoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let reader = image::io::Reader::open(path).map_err(|source| ImageLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = reader
        .with_guessed_format()
        .map_err(|source| ImageLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    reader.decode().map_err(|source| ImageLoadError::Decode {
        origin: path.display().to_string(),
        source,
    })
}

/// Composites any alpha channel onto a white background.
pub fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = f32::from(a) / 255.0;
        let blend = |channel: u8| (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgba};

    use super::{flatten_to_rgb, ImageLoadError, ImageSource};

    fn png_bytes() -> Vec<u8> {
        let buffer = ImageBuffer::from_fn(4, 2, |x, _| {
            Rgba([200u8, 10, 10, if x < 2 { 255 } else { 0 }])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_in_memory_png() {
        let image = ImageSource::from_bytes(png_bytes()).decode().expect("decode");
        let rgb = flatten_to_rgb(&image);
        assert_eq!(rgb.dimensions(), (4, 2));
        assert_eq!(rgb.get_pixel(0, 0).0, [200, 10, 10]);
        assert_eq!(rgb.get_pixel(3, 1).0, [255, 255, 255]);
    }

    #[test]
    fn missing_file_is_reported() {
        let result = ImageSource::from_path("/definitely/not/here.png").decode();
        assert!(matches!(result, Err(ImageLoadError::Missing { .. })));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = ImageSource::from_bytes(vec![1, 2, 3]).decode();
        assert!(matches!(result, Err(ImageLoadError::Decode { .. })));
    }
}

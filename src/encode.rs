//! Output encoding, inferred from the output path's extension.
//!
//! `.png` encodes lossless PNG; `.jpg`/`.jpeg` encodes JPEG at the encoder's
//! default quality, with the RGBA canvas flattened to RGB first (JPEG has no
//! alpha channel). Any other extension is a configuration error. Validation
//! happens here at the encode boundary, not before composition.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported output format: {0:?} (use .png, .jpg, or .jpeg)")]
    UnsupportedFormat(String),
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Write the composited poster to `path` in the format its extension names.
pub fn save_poster(img: &RgbaImage, path: &Path) -> Result<(), EncodeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "png" => img
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string())),
        "jpg" | "jpeg" => {
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
        }
        other => Err(EncodeError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn fixture(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
        })
    }

    #[test]
    fn png_roundtrips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("poster.png");
        save_poster(&fixture(100, 35), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 35));
    }

    #[test]
    fn jpeg_flattens_alpha_and_saves() {
        let tmp = tempfile::TempDir::new().unwrap();
        for name in ["poster.jpg", "poster.jpeg", "POSTER.JPG"] {
            let path = tmp.path().join(name);
            save_poster(&fixture(64, 32), &path).unwrap();

            let decoded = image::open(&path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (64, 32));
        }
    }

    #[test]
    fn unknown_extension_is_a_configuration_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = save_poster(&fixture(8, 8), &tmp.path().join("poster.gif"));
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedFormat(ext)) if ext == "gif"
        ));
    }

    #[test]
    fn missing_extension_is_a_configuration_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = save_poster(&fixture(8, 8), &tmp.path().join("poster"));
        assert!(matches!(result, Err(EncodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn unwritable_path_surfaces_the_encoder_error() {
        let result = save_poster(&fixture(8, 8), Path::new("/nonexistent/dir/poster.png"));
        assert!(result.is_err());
    }
}

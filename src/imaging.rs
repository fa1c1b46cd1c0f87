//! # Image I/O
//!
//! Loads image files into [`PixelArray`]s and writes them back. Only lossless
//! output formats are allowed, since extraction trusts every sample value.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use log::{debug, info};

use crate::error::{Result, StegoError};
use crate::processing::PixelArray;

/// Output formats that store 8-bit RGB samples exactly.
const LOSSLESS_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Pnm,
    ImageFormat::Tga,
];

/// Decode an image file (any format the `image` crate reads).
///
/// # Errors
/// - [`StegoError::InvalidImage`]: missing, unreadable, or undecodable file
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelArray> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|e| StegoError::InvalidImage(format!("{}: {}", path.display(), e)))?;
    let pixels = PixelArray::from_dynamic(&img)?;
    debug!(
        "Loaded {} ({} rows x {} cols)",
        path.display(),
        pixels.rows(),
        pixels.cols()
    );
    Ok(pixels)
}

/// Decode an in-memory image.
pub fn load_image_bytes(bytes: &[u8]) -> Result<PixelArray> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StegoError::InvalidImage(e.to_string()))?;
    PixelArray::from_dynamic(&img)
}

/// Resolve the format implied by `path`'s extension, refusing lossy ones.
///
/// # Errors
/// - [`StegoError::LossyFormat`]: recognized format that is not lossless
/// - [`StegoError::ImageSave`]: extension missing or unknown
pub fn lossless_format_for<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|e| {
        StegoError::ImageSave(format!("{}: {}", path.display(), e))
    })?;

    if LOSSLESS_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(StegoError::LossyFormat(format!(
            "{} ({:?})",
            path.display(),
            format
        )))
    }
}

/// Write `pixels` to `path` in the lossless format named by its extension.
pub fn save_image<P: AsRef<Path>>(pixels: &PixelArray, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = lossless_format_for(path)?;
    let rgb = pixels.to_rgb_image()?;

    rgb.save_with_format(path, format)
        .map_err(|e| StegoError::ImageSave(format!("{}: {}", path.display(), e)))?;

    info!("Saved image to {}", path.display());
    Ok(())
}

/// Encode `pixels` as PNG bytes.
pub fn encode_png(pixels: &PixelArray) -> Result<Vec<u8>> {
    let rgb = pixels.to_rgb_image()?;
    let mut output_bytes = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .map_err(|e| StegoError::ImageSave(e.to_string()))?;
    Ok(output_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{embed, extract};
    use tempfile::tempdir;

    fn gradient(rows: usize, cols: usize) -> PixelArray {
        let samples = (0..rows * cols * 3).map(|i| (i % 251) as u8).collect();
        PixelArray::from_raw(rows, cols, 3, samples).unwrap()
    }

    #[test]
    fn test_lossless_format_selection() {
        assert_eq!(lossless_format_for("out.png").unwrap(), ImageFormat::Png);
        assert_eq!(lossless_format_for("out.BMP").unwrap(), ImageFormat::Bmp);
        assert!(matches!(
            lossless_format_for("out.jpg").unwrap_err(),
            StegoError::LossyFormat(_)
        ));
        assert!(matches!(
            lossless_format_for("out.webp").unwrap_err(),
            StegoError::LossyFormat(_)
        ));
        assert!(matches!(
            lossless_format_for("out").unwrap_err(),
            StegoError::ImageSave(_)
        ));
    }

    #[test]
    fn test_save_and_load_preserve_samples() {
        let dir = tempdir().unwrap();
        let mut pixels = gradient(12, 9);
        embed(&mut pixels, "lossless").unwrap();

        for name in ["a.png", "a.bmp", "a.tiff"] {
            let path = dir.path().join(name);
            save_image(&pixels, &path).unwrap();
            let loaded = load_image(&path).unwrap();
            assert_eq!(loaded, pixels, "{name}");
            assert_eq!(extract(&loaded, 8).unwrap(), "lossless");
        }
    }

    #[test]
    fn test_save_refuses_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpeg");
        let err = save_image(&gradient(2, 2), &path).unwrap_err();
        assert!(matches!(err, StegoError::LossyFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_or_garbage_is_invalid_image() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(matches!(
            load_image(&missing).unwrap_err(),
            StegoError::InvalidImage(_)
        ));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"not an image").unwrap();
        assert!(matches!(
            load_image(&garbage).unwrap_err(),
            StegoError::InvalidImage(_)
        ));
        assert!(matches!(
            load_image_bytes(b"junk").unwrap_err(),
            StegoError::InvalidImage(_)
        ));
    }

    #[test]
    fn test_encode_png_round_trip() {
        let pixels = gradient(5, 7);
        let bytes = encode_png(&pixels).unwrap();
        assert_eq!(load_image_bytes(&bytes).unwrap(), pixels);
    }
}

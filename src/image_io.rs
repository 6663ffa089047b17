//! Loading and saving of the searched image, the mask and the annotated output

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{MaskSearchError, MaskSearchResult};

/// Decode any supported format into 8-bit RGBA. Images without an alpha
/// channel come back fully opaque, so pure black/white mask pixels compare
/// equal to the mask sentinels.
pub fn load_rgba(path: impl AsRef<Path>) -> MaskSearchResult<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| MaskSearchError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "📂 Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgba8())
}

/// Encode `image` in the format implied by the file extension. Formats
/// without an alpha channel (JPEG) get the RGB channels only.
pub fn save(path: impl AsRef<Path>, image: &RgbaImage) -> MaskSearchResult<()> {
    let path = path.as_ref();
    let saved = match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .save_with_format(path, ImageFormat::Jpeg),
        _ => image.save(path),
    };
    saved.map_err(|source| MaskSearchError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("💾 Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mask-search-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_rgb_png_loads_opaque() {
        let path = scratch_path("rgb.png");
        let mut rgb = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 1, Rgb([0, 0, 0]));
        rgb.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(*loaded.get_pixel(1, 1), Rgba([0, 0, 0, 255]));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([255, 255, 255, 255]));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load_preserves_outline_color() {
        let path = scratch_path("outline.png");
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        image.put_pixel(2, 3, Rgba([255, 0, 0, 255]));

        save(&path, &image).unwrap();
        assert_eq!(load_rgba(&path).unwrap(), image);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_jpeg_output_drops_alpha() {
        for name in ["marked.jpg", "marked.jpeg"] {
            let path = scratch_path(name);
            let mut image = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
            image.put_pixel(12, 12, Rgba([255, 0, 0, 128]));

            save(&path, &image).unwrap();
            let loaded = load_rgba(&path).unwrap();
            assert_eq!(loaded.dimensions(), (16, 16));
            // Lossy, but a flat corner stays near black and comes back opaque
            let corner = loaded.get_pixel(0, 0);
            assert!(corner.0[..3].iter().all(|&c| c < 16), "corner {corner:?}");
            assert_eq!(corner.0[3], 255);

            let _ = std::fs::remove_file(&path);
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = scratch_path("does-not-exist.png");
        match load_rgba(&path) {
            Err(MaskSearchError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected ImageLoad error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_extension_fails_to_save() {
        let path = scratch_path("output.not-an-image-format");
        let image = RgbaImage::new(1, 1);
        assert!(matches!(
            save(&path, &image),
            Err(MaskSearchError::ImageSave { .. })
        ));
    }
}

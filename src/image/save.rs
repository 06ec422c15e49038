//! Image saving utilities.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};

/// Save an image to disk, choosing the format from the file extension.
///
/// JPEG output drops the alpha channel and is encoded at `quality` (1-100).
/// Other formats are written with the encoder defaults and `quality` is ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn save_image<P: AsRef<Path>>(image: &DynamicImage, path: P, quality: u8) -> Result<()> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => {
            let output = BufWriter::new(File::create(path)?);
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(output, quality);
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|source| Error::ImageSave {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            image.save(path).map_err(|source| Error::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 200, 30, 128])));

        save_image(&img, &path, 90).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (8, 6));
        assert!(!reloaded.color().has_alpha());
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4])));

        save_image(&img, &path, 90).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
    }
}

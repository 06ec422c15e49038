//! Opaque pixel coverage.

use image::RgbaImage;

/// Fraction of pixels that are fully opaque (alpha 255).
///
/// Empty images have a ratio of 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pixel_ratio(image: &RgbaImage) -> f64 {
    let total = u64::from(image.width()) * u64::from(image.height());
    if total == 0 {
        return 0.0;
    }

    let opaque = image.pixels().filter(|p| p[3] == u8::MAX).count() as u64;
    opaque as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fully_opaque() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        assert!((pixel_ratio(&img) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_alpha_does_not_count() {
        let mut img = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 254]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));

        assert!((pixel_ratio(&img) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty() {
        assert!(pixel_ratio(&RgbaImage::new(0, 5)).abs() < f64::EPSILON);
    }
}

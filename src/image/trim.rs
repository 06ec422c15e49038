//! Border trimming by difference from the corner pixel.

use image::{imageops, Rgba, RgbaImage};

use super::geometry::Region;

/// A channel must differ from the corner pixel by more than this to count as content.
const TRIM_THRESHOLD: u8 = 100;

/// Crop away the uniform border around an image.
///
/// The border colour is taken from the top-left pixel. If every pixel matches
/// it the image is returned unchanged.
#[must_use]
pub fn trim(image: &RgbaImage) -> RgbaImage {
    match content_bounds(image) {
        Some(region) => {
            imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
        }
        None => image.clone(),
    }
}

/// Smallest region containing every pixel that differs from the top-left pixel.
///
/// Returns `None` for empty or uniform images.
#[must_use]
pub fn content_bounds(image: &RgbaImage) -> Option<Region> {
    if image.width() == 0 || image.height() == 0 {
        return None;
    }

    let corner = *image.get_pixel(0, 0);
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0, 0);

    for (x, y, pixel) in image.enumerate_pixels() {
        if differs(pixel, &corner) {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    (min_x <= max_x).then(|| Region {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

fn differs(pixel: &Rgba<u8>, corner: &Rgba<u8>) -> bool {
    pixel
        .0
        .iter()
        .zip(corner.0.iter())
        .any(|(&a, &b)| a.abs_diff(b) > TRIM_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const FACE: Rgba<u8> = Rgba([200, 150, 120, 255]);

    fn cutout() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(20, 16, CLEAR);
        for y in 4..12 {
            for x in 5..9 {
                img.put_pixel(x, y, FACE);
            }
        }
        img
    }

    #[test]
    fn test_bounds_of_cutout() {
        let region = content_bounds(&cutout()).unwrap();

        assert_eq!(
            region,
            Region {
                x: 5,
                y: 4,
                width: 4,
                height: 8
            }
        );
    }

    #[test]
    fn test_trim_crops_to_content() {
        let trimmed = trim(&cutout());

        assert_eq!(trimmed.dimensions(), (4, 8));
        assert!(trimmed.pixels().all(|p| *p == FACE));
    }

    #[test]
    fn test_trim_uniform_image_unchanged() {
        let img = RgbaImage::from_pixel(7, 5, FACE);

        assert!(content_bounds(&img).is_none());
        assert_eq!(trim(&img), img);
    }

    #[test]
    fn test_small_differences_ignored() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([100, 100, 100, 255]));
        // Within threshold: treated as border
        img.put_pixel(1, 1, Rgba([200, 100, 100, 255]));
        // Beyond threshold: content
        img.put_pixel(6, 7, Rgba([100, 100, 100, 154]));

        let region = content_bounds(&img).unwrap();

        assert_eq!((region.x, region.y, region.width, region.height), (6, 7, 1, 1));
    }

    #[test]
    fn test_empty_image() {
        let img = RgbaImage::new(0, 0);

        assert!(content_bounds(&img).is_none());
        assert_eq!(trim(&img).dimensions(), (0, 0));
    }
}

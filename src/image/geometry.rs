//! Sizing and cropping helpers shared by the normalizer and the compositor.

use image::{imageops, ImageBuffer, Pixel};

/// Rectangular region within an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Scale `(width, height)` down to fit within `(max_width, max_height)`,
/// preserving the aspect ratio.
///
/// Sizes that already fit are returned unchanged; nothing is ever upscaled.
/// Scaled sides are rounded and never drop below one pixel.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless
)]
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );

    // Safe: scale <= 1, so the products stay within the original u32 sides
    let scaled_w = (f64::from(width) * scale).round() as u32;
    let scaled_h = (f64::from(height) * scale).round() as u32;

    (
        scaled_w.clamp(1, max_width.max(1)),
        scaled_h.clamp(1, max_height.max(1)),
    )
}

/// Crop a `width` x `height` window whose top-left corner sits at
/// `(left, top)` in `image` coordinates.
///
/// The window may extend past any edge of the image (negative offsets
/// included); pixels outside the source are zero, which is transparent for
/// RGBA and black for RGB.
#[must_use]
pub fn crop_extended<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    left: i64,
    top: i64,
    width: u32,
    height: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut canvas = ImageBuffer::new(width, height);
    imageops::replace(&mut canvas, image, -left, -top);
    canvas
}

//! Masked paste of a foreground canvas onto a background.

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};

/// Paste `src` onto `dst`, using the alpha channel of `src` as the mask.
///
/// Every channel of `dst`, alpha included, becomes
/// `dst * (255 - a) / 255 + src * a / 255`.
///
/// # Errors
///
/// Returns an error if the two images differ in size.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage) -> Result<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(Error::SizeMismatch {
            expected: dst.dimensions(),
            actual: src.dimensions(),
        });
    }

    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        *d = Rgba(paste_pixel(d.0, s.0));
    }

    Ok(())
}

/// Blend a single pixel; see [`paste_masked`].
#[must_use]
fn paste_pixel(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let mask = u16::from(src[3]);
    match mask {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255 - mask;
    let mut out = [0u8; 4];
    for i in 0..4 {
        let sc = mul_div255(u16::from(src[i]), mask);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn mul_div255(x: u16, y: u16) -> u8 {
    // Safe: x, y <= 255 so the quotient is <= 255
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_src_is_noop() {
        let dst = [10, 20, 30, 255];
        assert_eq!(paste_pixel(dst, [255, 255, 255, 0]), dst);
    }

    #[test]
    fn test_opaque_src_replaces_dst() {
        let src = [255, 0, 0, 255];
        assert_eq!(paste_pixel([0, 0, 255, 255], src), src);
    }

    #[test]
    fn test_half_mask_mixes() {
        let out = paste_pixel([0, 0, 0, 255], [254, 254, 254, 128]);

        // 254 * 128 / 255 ~= 127.5, rounded
        assert_eq!(out[0], 127);
        assert_eq!(out[3], 191);
    }

    #[test]
    fn test_size_mismatch() {
        let mut dst = RgbaImage::new(4, 4);
        let src = RgbaImage::new(4, 5);

        let err = paste_masked(&mut dst, &src).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: (4, 4),
                actual: (4, 5)
            }
        ));
    }
}

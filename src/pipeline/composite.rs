//! Placement of a foreground cutout on a background.

use image::{imageops, imageops::FilterType, RgbaImage};

use crate::error::{Error, Result};
use crate::image::{crop_extended, fit_within, paste_masked, pixel_ratio, trim};

/// A composited stimulus.
#[derive(Debug, Clone)]
pub struct Composite {
    /// Background with the foreground pasted on; same size as the background.
    pub image: RgbaImage,
    /// Fraction of the image covered by fully opaque foreground pixels.
    pub ratio: f64,
}

/// Composite `foreground` onto `background`.
///
/// The foreground is trimmed, shrunk to fit the background, then centred
/// horizontally and aligned to the bottom edge. With a `target_ratio` the
/// foreground is additionally shrunk so its opaque pixels cover roughly that
/// fraction of the background. The returned ratio is measured after
/// placement, so it can differ slightly from the target through rounding.
///
/// # Errors
///
/// Returns [`Error::InfeasibleRatio`] if the target is larger than the
/// coverage the foreground reaches at its largest fitting size, and
/// [`Error::InvalidParameter`] if the target is outside `(0, 1]`.
pub fn composite(
    foreground: &RgbaImage,
    background: &RgbaImage,
    target_ratio: Option<f64>,
) -> Result<Composite> {
    let (width, height) = background.dimensions();

    let trimmed = trim(foreground);
    let mut fg = shrink(trimmed, width, height);

    if let Some(target) = target_ratio {
        fg = scale_to_ratio(fg, width, height, target)?;
    }

    let placed = place(&fg, width, height);

    let mut image = background.clone();
    paste_masked(&mut image, &placed)?;

    Ok(Composite {
        ratio: pixel_ratio(&placed),
        image,
    })
}

/// Lay `foreground` out on a transparent `width` x `height` canvas,
/// centred horizontally and touching the bottom edge.
#[must_use]
pub fn place(foreground: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let left = (i64::from(width) - i64::from(foreground.width())) / 2;
    let top = i64::from(height) - i64::from(foreground.height());
    crop_extended(foreground, -left, -top, width, height)
}

fn shrink(foreground: RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (w, h) = fit_within(
        foreground.width(),
        foreground.height(),
        max_width,
        max_height,
    );
    resize(foreground, w, h)
}

fn resize(foreground: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if foreground.dimensions() == (width, height) {
        foreground
    } else {
        imageops::resize(&foreground, width, height, FilterType::CatmullRom)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_to_ratio(foreground: RgbaImage, width: u32, height: u32, target: f64) -> Result<RgbaImage> {
    if !(target > 0.0 && target <= 1.0) {
        return Err(Error::InvalidParameter {
            name: "target_ratio".to_string(),
            reason: format!("must be in (0, 1], got {target}"),
        });
    }

    let current = pixel_ratio(&place(&foreground, width, height));
    if target > current {
        return Err(Error::InfeasibleRatio {
            requested: target,
            achievable: current,
        });
    }

    // Coverage scales with area, so each side scales with the square root
    let factor = (target / current).sqrt();
    // Safe: factor is in (0, 1], so the products fit the current sides
    let new_w = ((f64::from(foreground.width()) * factor).round() as u32).max(1);
    let new_h = ((f64::from(foreground.height()) * factor).round() as u32).max(1);

    tracing::debug!(
        "Scaling foreground {}x{} -> {new_w}x{new_h} (coverage {current:.4} -> {target:.4})",
        foreground.width(),
        foreground.height()
    );

    Ok(resize(foreground, new_w, new_h))
}

//! Background normalization.
//!
//! Backgrounds are shrunk to the narrowest input width, then cut to the
//! shortest input height. Each background yields one output per
//! [`CropVariant`], so the same scene can be shown with different framing.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};

use crate::error::{Error, Result};
use crate::image::{
    crop_extended, file_stem, fit_within, list_images, load_dimensions, load_rgb, save_image,
    BACKGROUND_EXTENSIONS,
};

use super::ensure_dir;

/// Where the excess height of a background is removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CropVariant {
    /// Keep the top of the image, cut the excess from the bottom.
    Bottom,
    /// Keep the bottom of the image, cut the excess from the top.
    Top,
    /// Cut half the excess from each side.
    Both,
}

impl CropVariant {
    /// Every variant, in output order.
    pub const ALL: [Self; 3] = [Self::Bottom, Self::Top, Self::Both];

    /// Suffix appended to the background's file stem.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Bottom => "_cropped_bottom",
            Self::Top => "_cropped_top",
            Self::Both => "_cropped_both",
        }
    }

    /// Rows skipped at the top for an image `excess` rows taller than the target.
    ///
    /// A negative excess yields a negative offset, which pads instead of cropping.
    #[must_use]
    pub const fn top_offset(self, excess: i64) -> i64 {
        match self {
            Self::Bottom => 0,
            Self::Top => excess,
            Self::Both => excess / 2,
        }
    }
}

impl fmt::Display for CropVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Both => "both",
        })
    }
}

impl FromStr for CropVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bottom" => Ok(Self::Bottom),
            "top" => Ok(Self::Top),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown crop variant `{other}` (expected bottom, top, or both)"
            )),
        }
    }
}

/// Common geometry of a set of backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    /// Narrowest input width; every output has this width.
    pub width: u32,
    /// Shortest input height; every output has this height.
    pub height: u32,
    /// Tallest input height, used only as the thumbnail bound.
    pub max_height: u32,
}

impl TargetSize {
    /// Derive the target from the `(width, height)` of every input.
    ///
    /// Returns `None` when there are no inputs.
    #[must_use]
    pub fn from_dimensions(dims: &[(u32, u32)]) -> Option<Self> {
        let width = dims.iter().map(|&(w, _)| w).min()?;
        let height = dims.iter().map(|&(_, h)| h).min()?;
        let max_height = dims.iter().map(|&(_, h)| h).max()?;
        Some(Self {
            width,
            height,
            max_height,
        })
    }
}

/// Backgrounds written by [`normalize_backgrounds`].
#[derive(Debug, Clone)]
pub struct NormalizedSet {
    /// `(width, height)` shared by every file.
    pub size: (u32, u32),
    /// Written files, grouped by source background in variant order.
    pub files: Vec<PathBuf>,
}

/// Normalize every JPEG in `input_dir` and write the variants to `output_dir`.
///
/// Outputs are named `<stem><suffix>.jpg` and encoded at `quality`.
///
/// # Errors
///
/// Returns an error if `input_dir` holds no JPEGs, if two inputs share a file
/// stem, or if any image cannot be read or written.
pub fn normalize_backgrounds(
    input_dir: &Path,
    output_dir: &Path,
    variants: &[CropVariant],
    quality: u8,
) -> Result<NormalizedSet> {
    let inputs = list_images(input_dir, BACKGROUND_EXTENSIONS)?;
    check_unique_stems(&inputs)?;

    let dims = inputs
        .iter()
        .map(load_dimensions)
        .collect::<Result<Vec<_>>>()?;
    let target = TargetSize::from_dimensions(&dims).ok_or_else(|| Error::NoImages {
        kind: "background",
        path: input_dir.to_path_buf(),
    })?;

    tracing::info!(
        "Normalizing {} backgrounds to {}x{}",
        inputs.len(),
        target.width,
        target.height
    );

    ensure_dir(output_dir)?;

    let mut files = Vec::with_capacity(inputs.len() * variants.len());
    for path in &inputs {
        let image = load_rgb(path)?;
        let stem = file_stem(path);

        for (variant, cropped) in normalize_image(&image, target, variants) {
            let out = output_dir.join(format!("{stem}{}.jpg", variant.suffix()));
            tracing::debug!("Saving normalized background: {}", out.display());
            save_image(&DynamicImage::ImageRgb8(cropped), &out, quality)?;
            files.push(out);
        }
    }

    Ok(NormalizedSet {
        size: (target.width, target.height),
        files,
    })
}

/// Reject inputs whose outputs would overwrite each other.
///
/// Stems are compared case-insensitively so `park.jpg` and `PARK.jpeg` also
/// collide on case-insensitive filesystems. Runs before anything is written.
fn check_unique_stems(inputs: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(inputs.len());
    for path in inputs {
        let stem = file_stem(path);
        if let Some(first) = seen.insert(stem.to_lowercase(), path) {
            return Err(Error::DuplicateStem {
                stem,
                first: first.clone(),
                second: path.clone(),
            });
        }
    }
    Ok(())
}

/// Produce the requested crop variants of one background.
///
/// The image is first shrunk (Lanczos3) to fit within
/// `target.width` x `target.max_height`; every variant is then exactly
/// `target.width` x `target.height`.
#[must_use]
pub fn normalize_image(
    image: &RgbImage,
    target: TargetSize,
    variants: &[CropVariant],
) -> Vec<(CropVariant, RgbImage)> {
    let (width, height) = fit_within(
        image.width(),
        image.height(),
        target.width,
        target.max_height,
    );
    let thumb = if (width, height) == image.dimensions() {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Lanczos3)
    };

    let excess = i64::from(thumb.height()) - i64::from(target.height);

    variants
        .iter()
        .map(|&variant| {
            let top = variant.top_offset(excess);
            (
                variant,
                crop_extended(&thumb, 0, top, target.width, target.height),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Image whose row `y` is filled with grey level `y * 40`.
    fn striped(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |_, y| {
            let level = u8::try_from(y * 40).unwrap();
            Rgb([level, level, level])
        })
    }

    fn top_row(img: &RgbImage) -> u8 {
        img.get_pixel(0, 0)[0]
    }

    #[test]
    fn test_target_size() {
        let target = TargetSize::from_dimensions(&[(640, 480), (800, 400), (700, 520)]).unwrap();

        assert_eq!(
            target,
            TargetSize {
                width: 640,
                height: 400,
                max_height: 520
            }
        );
        assert!(TargetSize::from_dimensions(&[]).is_none());
    }

    #[test]
    fn test_variants_remove_excess() {
        let target = TargetSize {
            width: 4,
            height: 4,
            max_height: 6,
        };
        let out = normalize_image(&striped(4, 6), target, &CropVariant::ALL);

        let tops: Vec<u8> = out.iter().map(|(_, img)| top_row(img)).collect();
        assert_eq!(tops, vec![0, 80, 40]);
        assert!(out.iter().all(|(_, img)| img.dimensions() == (4, 4)));
    }

    #[test]
    fn test_odd_excess_keeps_height() {
        let target = TargetSize {
            width: 4,
            height: 4,
            max_height: 7,
        };
        let out = normalize_image(&striped(4, 7), target, &[CropVariant::Both]);

        assert_eq!(out[0].1.dimensions(), (4, 4));
        assert_eq!(top_row(&out[0].1), 40);
    }

    #[test]
    fn test_zero_excess_is_identity() {
        let img = striped(4, 4);
        let target = TargetSize {
            width: 4,
            height: 4,
            max_height: 6,
        };

        for (_, out) in normalize_image(&img, target, &CropVariant::ALL) {
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_short_image_is_padded() {
        let target = TargetSize {
            width: 4,
            height: 4,
            max_height: 6,
        };
        let out = normalize_image(&striped(4, 3), target, &[CropVariant::Bottom, CropVariant::Top]);

        let bottom = &out[0].1;
        assert_eq!(bottom.dimensions(), (4, 4));
        assert_eq!(bottom.get_pixel(0, 2), &Rgb([80, 80, 80]));
        assert_eq!(bottom.get_pixel(0, 3), &Rgb([0, 0, 0]));

        let top = &out[1].1;
        assert_eq!(top.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(top.get_pixel(0, 3), &Rgb([80, 80, 80]));
    }

    #[test]
    fn test_wide_image_is_shrunk_to_target() {
        let target = TargetSize {
            width: 60,
            height: 40,
            max_height: 50,
        };
        let img = RgbImage::from_pixel(80, 50, Rgb([30, 60, 90]));

        for (_, out) in normalize_image(&img, target, &CropVariant::ALL) {
            assert_eq!(out.dimensions(), (60, 40));
        }
    }

    #[test]
    fn test_unique_stems_accepted() {
        let inputs = [PathBuf::from("bg/park.jpg"), PathBuf::from("bg/beach.jpeg")];

        assert!(check_unique_stems(&inputs).is_ok());
    }

    #[test]
    fn test_shared_stem_rejected() {
        let inputs = [PathBuf::from("bg/PARK.jpeg"), PathBuf::from("bg/park.jpg")];

        match check_unique_stems(&inputs).unwrap_err() {
            Error::DuplicateStem {
                stem,
                first,
                second,
            } => {
                assert_eq!(stem, "park");
                assert_eq!(first, inputs[0]);
                assert_eq!(second, inputs[1]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_variant_parse_and_display() {
        for variant in CropVariant::ALL {
            assert_eq!(variant.to_string().parse::<CropVariant>(), Ok(variant));
        }
        assert_eq!("BOTH".parse::<CropVariant>(), Ok(CropVariant::Both));
        assert!("left".parse::<CropVariant>().is_err());
    }
}

//! Pipeline driver: every foreground on every normalized background.

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::image::{file_stem, identifier, list_images, load_rgba, save_image, FOREGROUND_EXTENSIONS};
use crate::manifest::{Manifest, Record};

use super::composite::{composite, Composite};
use super::ensure_dir;
use super::normalize::{normalize_backgrounds, CropVariant};

/// Configuration for the stimulus generation pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of source background JPEGs.
    pub background_dir: PathBuf,

    /// Directory of foreground PNG cutouts.
    pub foreground_dir: PathBuf,

    /// Directory receiving the normalized backgrounds.
    pub normalized_dir: PathBuf,

    /// Directory receiving the composites and the manifest.
    pub output_dir: PathBuf,

    /// Desired foreground/background pixel ratio. None keeps the fitted size.
    pub target_ratio: Option<f64>,

    /// Crop variants generated per background.
    pub crop_variants: Vec<CropVariant>,

    /// JPEG quality (1-100) for every written image.
    pub output_quality: u8,

    /// File name of the manifest inside `output_dir`.
    pub manifest_name: String,

    /// Draw a progress bar while compositing.
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background_dir: PathBuf::from("backgrounds"),
            foreground_dir: PathBuf::from("foregrounds"),
            normalized_dir: PathBuf::from("backgrounds_cropped"),
            output_dir: PathBuf::from("stimuli"),
            target_ratio: Some(0.25),
            crop_variants: CropVariant::ALL.to_vec(),
            output_quality: 75,
            manifest_name: "stimuli.csv".to_string(),
            show_progress: true,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if let Some(ratio) = self.target_ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(Error::InvalidParameter {
                    name: "target_ratio".to_string(),
                    reason: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }

        if self.crop_variants.is_empty() {
            return Err(Error::InvalidParameter {
                name: "crop_variants".to_string(),
                reason: "at least one variant is required".to_string(),
            });
        }

        if !(1..=100).contains(&self.output_quality) {
            return Err(Error::InvalidParameter {
                name: "output_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        if self.manifest_name.is_empty() {
            return Err(Error::InvalidParameter {
                name: "manifest_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// `(width, height)` of every normalized background and composite.
    pub background_size: (u32, u32),
    /// Number of normalized backgrounds written.
    pub backgrounds: usize,
    /// Number of foregrounds found.
    pub foregrounds: usize,
    /// Number of composites written (one manifest row each).
    pub composites: usize,
    /// Where the manifest was written.
    pub manifest_path: PathBuf,
}

/// Generates one stimulus per foreground and normalized background.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing pipeline with config: {config:?}");

        Ok(Self { config })
    }

    /// Normalize the backgrounds, composite every foreground onto each of
    /// them, and write the manifest.
    ///
    /// Existing outputs are overwritten; nothing is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any image cannot be read or written, or if the
    /// target ratio is infeasible for any pair. The run stops at the first error.
    pub fn run(&self) -> Result<RunSummary> {
        let config = &self.config;

        tracing::info!(
            "Normalizing backgrounds: {} -> {}",
            config.background_dir.display(),
            config.normalized_dir.display()
        );
        let normalized = normalize_backgrounds(
            &config.background_dir,
            &config.normalized_dir,
            &config.crop_variants,
            config.output_quality,
        )?;

        let foregrounds = list_images(&config.foreground_dir, FOREGROUND_EXTENSIONS)?;
        if foregrounds.is_empty() {
            tracing::warn!(
                "No foreground images found in {}",
                config.foreground_dir.display()
            );
        }

        ensure_dir(&config.output_dir)?;

        tracing::info!(
            "Compositing {} foregrounds onto {} backgrounds",
            foregrounds.len(),
            normalized.files.len()
        );

        let pb = self.progress_bar(foregrounds.len() * normalized.files.len());
        let mut manifest = Manifest::new();

        for fg_path in &foregrounds {
            let foreground = load_rgba(fg_path)?;
            for bg_path in &normalized.files {
                let record = self.compose_pair(&foreground, fg_path, bg_path)?;
                manifest.push(record);
                pb.inc(1);
            }
        }

        pb.finish_with_message("Compositing complete");

        let manifest_path = config.output_dir.join(&config.manifest_name);
        tracing::info!("Writing manifest to: {}", manifest_path.display());
        manifest.write_csv(&manifest_path)?;

        Ok(RunSummary {
            background_size: normalized.size,
            backgrounds: normalized.files.len(),
            foregrounds: foregrounds.len(),
            composites: manifest.len(),
            manifest_path,
        })
    }

    /// Composite one pair, save it, and describe it for the manifest.
    fn compose_pair(
        &self,
        foreground: &RgbaImage,
        fg_path: &Path,
        bg_path: &Path,
    ) -> Result<Record> {
        let background = load_rgba(bg_path)?;
        let Composite { image, ratio } =
            composite(foreground, &background, self.config.target_ratio)?;

        let bg_stem = file_stem(bg_path);
        let save_dir = self.config.output_dir.join(&bg_stem);
        ensure_dir(&save_dir)?;

        let filename = format!("{bg_stem}_{}.jpg", file_stem(fg_path));
        let save_path = save_dir.join(&filename);

        tracing::debug!("Saving: {} (ratio {ratio:.4})", save_path.display());
        save_image(
            &DynamicImage::ImageRgba8(image),
            &save_path,
            self.config.output_quality,
        )?;

        Ok(Record {
            background: identifier(bg_path),
            foreground: identifier(fg_path),
            ratio,
            filename,
        })
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Compositing [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.target_ratio, Some(0.25));
        assert_eq!(config.crop_variants, CropVariant::ALL.to_vec());
    }

    #[test]
    fn test_no_target_ratio_is_valid() {
        let config = Config {
            target_ratio: None,
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let bad = [
            Config {
                target_ratio: Some(0.0),
                ..Config::default()
            },
            Config {
                target_ratio: Some(1.5),
                ..Config::default()
            },
            Config {
                crop_variants: Vec::new(),
                ..Config::default()
            },
            Config {
                output_quality: 0,
                ..Config::default()
            },
            Config {
                manifest_name: String::new(),
                ..Config::default()
            },
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter { .. })),
                "accepted {config:?}"
            );
        }
    }
}

//! `stimgen` CLI - Composite foreground cutouts onto normalized backgrounds.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stimgen::{Config, CropVariant, Pipeline};

/// Create stimuli by placing foreground cutouts on normalized backgrounds.
#[derive(Parser, Debug)]
#[command(name = "stimgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// Desired pixel ratio for foreground/background (0.0-1.0].
    #[arg(short, long, default_value = "0.25", value_name = "FLOAT")]
    ratio: f64,

    /// Keep the fitted foreground size instead of targeting a pixel ratio.
    #[arg(long, conflicts_with = "ratio")]
    no_resize: bool,

    /// Directory of background JPEGs.
    #[arg(long, default_value = "backgrounds", value_name = "DIR")]
    backgrounds: PathBuf,

    /// Directory of foreground PNG cutouts.
    #[arg(long, default_value = "foregrounds", value_name = "DIR")]
    foregrounds: PathBuf,

    /// Directory for the normalized backgrounds.
    #[arg(long, default_value = "backgrounds_cropped", value_name = "DIR")]
    normalized: PathBuf,

    /// Directory for the stimuli and the manifest.
    #[arg(short, long, default_value = "stimuli", value_name = "DIR")]
    output: PathBuf,

    /// Crop variants to generate per background: bottom, top, both.
    #[arg(long = "crop", value_name = "VARIANT", num_args = 1.., default_values_t = CropVariant::ALL)]
    crop: Vec<CropVariant>,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "75", value_name = "INT")]
    quality: u8,

    /// Manifest file name, written inside the output directory.
    #[arg(long, default_value = "stimuli.csv", value_name = "NAME")]
    manifest: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stimgen={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    if !args.backgrounds.is_dir() {
        anyhow::bail!(
            "Background directory does not exist: {}",
            args.backgrounds.display()
        );
    }

    let mut crop_variants = args.crop;
    crop_variants.sort_unstable();
    crop_variants.dedup();

    let config = Config {
        background_dir: args.backgrounds,
        foreground_dir: args.foregrounds,
        normalized_dir: args.normalized,
        output_dir: args.output,
        target_ratio: (!args.no_resize).then_some(args.ratio),
        crop_variants,
        output_quality: args.quality,
        manifest_name: args.manifest,
        ..Config::default()
    };

    let pipeline = Pipeline::new(config).context("Failed to initialize pipeline")?;

    let summary = pipeline.run().context("Failed to create stimuli")?;

    println!(
        "Created {} stimuli ({} foregrounds x {} backgrounds at {}x{}); manifest: {}",
        summary.composites,
        summary.foregrounds,
        summary.backgrounds,
        summary.background_size.0,
        summary.background_size.1,
        summary.manifest_path.display()
    );

    Ok(())
}

//! # stimgen
//!
//! Generates visual stimuli by compositing foreground cutouts (PNGs with
//! transparency, such as face cutouts) onto a set of normalized background
//! photographs.
//!
//! Backgrounds are first brought to one common size. Each foreground is then
//! trimmed, scaled so its opaque pixels cover a chosen fraction of the
//! background, centred horizontally and rested on the bottom edge. Every
//! composite is written as a JPEG and recorded in a CSV manifest.
//!
//! ## Example
//!
//! ```no_run
//! use stimgen::{Config, Pipeline};
//!
//! # fn main() -> stimgen::Result<()> {
//! let config = Config {
//!     target_ratio: Some(0.2),
//!     ..Config::default()
//! };
//! let pipeline = Pipeline::new(config)?;
//!
//! let summary = pipeline.run()?;
//! println!("{} stimuli written", summary.composites);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod manifest;
pub mod pipeline;

pub use error::{Error, Result};
pub use manifest::{Manifest, Record};
pub use pipeline::{composite, Composite, Config, CropVariant, Pipeline, RunSummary};

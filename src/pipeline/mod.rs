//! Stimulus generation pipeline: normalize backgrounds, composite foregrounds.

mod composite;
mod driver;
mod normalize;

pub use composite::{composite, place, Composite};
pub use driver::{Config, Pipeline, RunSummary};
pub use normalize::{normalize_backgrounds, normalize_image, CropVariant, NormalizedSet, TargetSize};

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Create `path` and its parents; an existing directory is not an error.
fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

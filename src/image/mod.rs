//! Image loading, geometry, compositing, and saving utilities.

mod blend;
mod coverage;
mod geometry;
mod load;
mod save;
mod trim;

pub use blend::paste_masked;
pub use coverage::pixel_ratio;
pub use geometry::{crop_extended, fit_within, Region};
pub use load::{file_stem, identifier, list_images, load_dimensions, load_rgb, load_rgba};
pub use save::save_image;
pub use trim::{content_bounds, trim};

/// File extensions accepted for background photographs.
pub const BACKGROUND_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// File extensions accepted for foreground cutouts.
pub const FOREGROUND_EXTENSIONS: &[&str] = &["png"];

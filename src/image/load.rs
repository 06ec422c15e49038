//! Image loading and input discovery.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};

/// Load an image from disk as 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if the image cannot be opened or decoded.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    open(path.as_ref()).map(|img| img.to_rgba8())
}

/// Load an image from disk as 8-bit RGB, dropping any alpha channel.
///
/// # Errors
///
/// Returns an error if the image cannot be opened or decoded.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    open(path.as_ref()).map(|img| img.to_rgb8())
}

/// Read the dimensions of an image without decoding its pixels.
///
/// # Errors
///
/// Returns an error if the image header cannot be read.
pub fn load_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32)> {
    let path = path.as_ref();
    image::image_dimensions(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

fn open(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// List the files in `dir` whose extension matches one of `extensions`.
///
/// Matching is case-insensitive. Subdirectories are not descended into.
/// The result is sorted so runs are reproducible.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_images<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_dir_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
}

/// File name without directory or extension, used to name derived outputs.
#[must_use]
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Source path with its extension removed, as recorded in the manifest.
#[must_use]
pub fn identifier(path: &Path) -> String {
    path.with_extension("").display().to_string()
}

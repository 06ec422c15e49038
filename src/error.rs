//! Custom error types for stimgen.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the stimgen library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to list an input directory.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input directory holds no images of the expected kind.
    #[error("no {kind} images found in {path}")]
    NoImages { kind: &'static str, path: PathBuf },

    /// Two inputs would write to the same output names.
    #[error("{first} and {second} share the file stem `{stem}`; their outputs would overwrite each other")]
    DuplicateStem {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The requested pixel ratio cannot be reached by shrinking the foreground.
    #[error(
        "pixel ratio {requested} means the foreground is taller/wider than the background \
         (at most {achievable:.4} is reachable)"
    )]
    InfeasibleRatio { requested: f64, achievable: f64 },

    /// Two images that must share a size do not.
    #[error("image size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Failed to write the manifest table.
    #[error("failed to write manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for stimgen operations.
pub type Result<T> = std::result::Result<T, Error>;

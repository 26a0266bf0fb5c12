//! # Error standards
//!
//! This module provides a standardised error enum and result type for this crate.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::PathBuf;

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the disparity crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The image source could not provide an image.
    #[error("Could not read input image {path:?}: {source}")]
    InputUnreadable {
        path: PathBuf,
        source: image::ImageError
    },

    /// The left and right images of a stereo pair are not the same size, given as
    /// `(width, height)`.
    #[error("Images are not the same size (left {left:?}, right {right:?})")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize)
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Could not read configuration file {path:?}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("Could not parse configuration: {0}")]
    ConfigInvalid(#[from] toml::de::Error),

    #[error("Could not write output image {path:?}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        source: image::ImageError
    }
}

//! # Pre filtering
//!
//! Grayscale conversion and global histogram equalization, applied independently to each image
//! of a stereo pair to reduce illumination mismatch between the two cameras.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::{map::map_colors, stats::cumulative_histogram};

use crate::error::*;
use crate::frame::{GrayFloatImage, StereoFrame};

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Convert an image to single channel 8-bit and equalize its histogram.
pub fn preprocess(img: &DynamicImage) -> GrayImage {
    equalize(&img.to_luma8())
}

/// Global histogram equalization stretched over the full [0, 255] range.
///
/// Each level `v` maps to `round((cdf(v) - cdf_min) * 255 / (N - cdf_min))`, where `cdf_min` is
/// the cumulative count of the darkest level present, so the darkest level always becomes 0 and
/// the brightest 255. Images holding a single level are returned unchanged.
pub fn equalize(img: &GrayImage) -> GrayImage {
    let cdf = cumulative_histogram(img).channels[0];
    let total = cdf[255] as u64;
    let cdf_min = cdf.iter().cloned().find(|&c| c > 0).unwrap_or(0) as u64;

    if total == cdf_min {
        return img.clone();
    }

    let range = total - cdf_min;
    let mut lut = [0u8; 256];
    for (level, out) in lut.iter_mut().enumerate() {
        let above = (cdf[level] as u64).saturating_sub(cdf_min);
        *out = ((above * 255 + range / 2) / range).min(255) as u8;
    }

    map_colors(img, |p| Luma([lut[p[0] as usize]]))
}

/// Read the image at `path` and preprocess it.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source
    })?;

    log::debug!(
        "Loaded {:?} ({}x{})",
        path,
        img.width(),
        img.height()
    );

    Ok(preprocess(&img))
}

/// Read and preprocess both images of a stereo pair.
pub fn load_frame<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<StereoFrame> {
    let left = load(left)?;
    let right = load(right)?;

    StereoFrame::new(
        GrayFloatImage::from_luma(&left),
        GrayFloatImage::from_luma(&right)
    )
}

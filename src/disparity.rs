//! # General disparity objects
//!
//! This module provides generic disparity traits and structures for use by different algorithms.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;
use serde::Deserialize;

use crate::error::*;
use crate::frame::{GrayFloatImage, StereoFrame};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A generic floating point disparity map.
#[derive(Clone, Debug)]
pub struct DisparityMap {
    data: GrayFloatImage,
    scale: DisparityScale,
    pub max_disp: Option<f32>,
    pub min_disp: Option<f32>
}

/// Parameters shared by the block matching algorithms.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Number of horizontal shifts searched, `0..num_disparities`.
    pub num_disparities: usize,

    /// Side length of the matching window. Must be odd and at least 3.
    pub block: usize,

    pub window: WindowGeometry
}

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Meaning of the values stored in a [`DisparityMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisparityScale {
    /// Values are the winning horizontal shift in pixels.
    ShiftIndex,

    /// Values were normalised and equalized into [0, 255] for display and no longer map
    /// linearly onto pixel shifts.
    Display
}

/// How the iterative matcher lays its window over each pixel.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindowGeometry {
    /// A `block x block` window centred on the pixel, with a `block / 2` zero border.
    Centered,

    /// Reproduces the historical output: a `2 * block` sided window anchored at the pixel's
    /// padded coordinate, with a `block / 2 - 1` zero border. Pixels whose window leaves the
    /// padded image keep disparity 0.
    Legacy
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DisparityAlgorithm {
    /// Compute the disparity map of the given stereo frame, in the algorithm's output scale.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap>;

    /// Compute a disparity map whose values are raw horizontal shifts.
    ///
    /// Algorithms whose `compute` output is already in [`DisparityScale::ShiftIndex`] can rely
    /// on the default.
    fn compute_shift_indices(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        self.compute(frame)
    }
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            num_disparities: 64,
            block: 15,
            window: WindowGeometry::Centered
        }
    }
}

impl Params {
    /// Check the parameters describe a searchable range and a window with a centre pixel.
    pub fn validate(&self) -> Result<()> {
        if self.num_disparities == 0 {
            return Err(Error::InvalidConfiguration(
                "num_disparities must be positive".into()
            ));
        }

        if self.block < 3 || self.block % 2 == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "block must be odd and at least 3, got {}",
                self.block
            )));
        }

        Ok(())
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        WindowGeometry::Centered
    }
}

impl WindowGeometry {
    /// Width of the zero border added around both images.
    pub fn padding(&self, block: usize) -> usize {
        match self {
            WindowGeometry::Centered => block / 2,
            WindowGeometry::Legacy => (block / 2).saturating_sub(1)
        }
    }

    /// Side length of the window actually summed.
    pub fn side(&self, block: usize) -> usize {
        match self {
            WindowGeometry::Centered => block,
            WindowGeometry::Legacy => 2 * block
        }
    }

    /// Number of output positions along an axis whose window gets scored, given the padded
    /// length of that axis.
    ///
    /// Centred windows cover every pixel. Legacy windows are only scored for padded positions
    /// in `block..padded_len - block`.
    pub fn scored_extent(&self, block: usize, padded_len: usize) -> usize {
        match self {
            WindowGeometry::Centered => (padded_len + 1).saturating_sub(self.side(block)),
            WindowGeometry::Legacy => padded_len.saturating_sub(self.side(block))
        }
    }
}

impl DisparityMap {
    pub fn new(width: usize, height: usize, scale: DisparityScale) -> Self {
        DisparityMap {
            data: GrayFloatImage::new(width, height),
            scale,
            min_disp: None,
            max_disp: None
        }
    }

    /// Wrap an existing image, recording the observed disparity range.
    pub fn from_image(data: GrayFloatImage, scale: DisparityScale) -> Self {
        let mut map = DisparityMap {
            data,
            scale,
            min_disp: None,
            max_disp: None
        };
        map.update_range();

        map
    }

    pub fn put(&mut self, x: usize, y: usize, val: f32) {
        self.data.put(x, y, val)
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data.get(x, y)
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn scale(&self) -> DisparityScale {
        self.scale
    }

    pub fn as_image(&self) -> &GrayFloatImage {
        &self.data
    }

    /// Recompute `min_disp` and `max_disp` from the stored values.
    pub fn update_range(&mut self) {
        let values = self.data.as_slice();
        if values.is_empty() {
            self.min_disp = None;
            self.max_disp = None;
            return;
        }

        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });

        self.min_disp = Some(min);
        self.max_disp = Some(max);
    }

    /// Converts the image into a dynamic Luma8 image.
    pub fn to_luma(&self) -> GrayImage {
        self.data.to_luma()
    }

    /// Converts the image to a normalised GrayImage.
    ///
    /// Normalises by the maximum observed disparity in the map. If the maximum disparity is not
    /// set, or is zero, then the function is equivalent to `.to_luma()`.
    pub fn to_luma_normalised(&self) -> GrayImage {
        let mult = match self.max_disp {
            Some(d) if d > 0.0 => 255.0 / d,
            _ => 1.0
        };

        let mut new = GrayImage::new(self.width() as u32, self.height() as u32);

        for (dst, &val) in new.iter_mut().zip(self.data.as_slice().iter()) {
            *dst = (val * mult).max(0.0).min(255.0) as u8;
        }

        new
    }
}

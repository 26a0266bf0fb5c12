//! # Depth from disparity
//!
//! Triangulates metric depth from a disparity map and the stereo rig's camera parameters:
//!
//! ```text
//! depth = (focal_length_px * baseline) / (depth_unit * disparity)
//! ```
//!
//! Pixels with zero disparity have parallel rays and no triangulated depth; they are set to 0.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;
use serde::Deserialize;

use crate::disparity::{DisparityMap, DisparityScale};
use crate::error::*;
use crate::frame::GrayFloatImage;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Camera parameters of a rectified stereo rig.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CameraParams {
    /// Distance between the two optical centres.
    pub baseline: f64,

    /// Size of one depth unit in meters.
    pub depth_unit: f64,

    /// Focal length in pixels.
    pub focal_length_px: f64
}

/// A floating point depth map. Every value is finite and non-negative, 0 marks pixels without a
/// depth.
#[derive(Clone, Debug)]
pub struct DepthMap {
    data: GrayFloatImage,
    pub max_depth: Option<f32>
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            baseline: 54.8,
            depth_unit: 0.001,
            focal_length_px: 942.8
        }
    }
}

impl CameraParams {
    /// Check all parameters are finite and strictly positive, which guarantees non-negative
    /// depths.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("baseline", self.baseline),
            ("depth_unit", self.depth_unit),
            ("focal_length_px", self.focal_length_px)
        ];

        for (name, val) in fields.iter() {
            if !val.is_finite() || *val <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "{} must be finite and positive, got {}",
                    name, val
                )));
            }
        }

        Ok(())
    }

    /// Depth of a single disparity value, 0 where no depth can be triangulated.
    pub fn depth(&self, disparity: f64) -> f64 {
        if disparity <= 0.0 {
            return 0.0;
        }

        let depth = (self.focal_length_px * self.baseline) / (self.depth_unit * disparity);

        if depth.is_finite() && depth >= 0.0 {
            depth
        }
        else {
            0.0
        }
    }
}

impl DepthMap {
    /// Convert a disparity map into depth.
    ///
    /// The map should hold raw shifts. A display-scaled map is still converted but the depths
    /// will not be metric.
    pub fn from_disparity(disparity: &DisparityMap, camera: &CameraParams) -> Self {
        if disparity.scale() == DisparityScale::Display {
            log::warn!("Converting a display-scaled disparity map to depth, values are not metric");
        }

        let src = disparity.as_image();
        let data = GrayFloatImage::from_fn(src.width(), src.height(), |x, y| {
            let depth = camera.depth(src.get(x, y) as f64) as f32;
            if depth.is_finite() { depth } else { 0.0 }
        });

        let max_depth = data.as_slice().iter().cloned().fold(None, |max: Option<f32>, v| {
            Some(max.map_or(v, |m| m.max(v)))
        });

        Self { data, max_depth }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data.get(x, y)
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn as_image(&self) -> &GrayFloatImage {
        &self.data
    }

    /// Converts the depth map to a GrayImage normalised by the maximum depth, for viewing.
    pub fn to_luma_normalised(&self) -> GrayImage {
        let mult = match self.max_depth {
            Some(d) if d > 0.0 => 255.0 / d,
            _ => 0.0
        };

        let mut new = GrayImage::new(self.width() as u32, self.height() as u32);

        for (dst, &val) in new.iter_mut().zip(self.data.as_slice().iter()) {
            *dst = (val * mult).round().max(0.0).min(255.0) as u8;
        }

        new
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Convert a disparity map into a depth map. See [`DepthMap::from_disparity`].
pub fn disparity_to_depth(disparity: &DisparityMap, camera: &CameraParams) -> DepthMap {
    DepthMap::from_disparity(disparity, camera)
}

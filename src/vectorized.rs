//! # Vectorized block matching
//!
//! Solves the same correspondence problem as the [`iterative`](crate::iterative) matcher with
//! whole-image operations: for each shift the right image is translated, differenced against
//! the left image and box filtered, and the disparity is the arg-min over the resulting stack of
//! cost planes.
//!
//! [`DisparityAlgorithm::compute`] returns the map in [`DisparityScale::Display`], i.e.
//! normalised with `round(d * 255 / num_disparities)` and then histogram equalized. Those values
//! cannot be compared with the iterative matcher's output;
//! [`DisparityAlgorithm::compute_shift_indices`] returns the raw shifts for that purpose.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::GrayImage;

use crate::disparity::{DisparityAlgorithm, DisparityMap, DisparityScale, Params};
use crate::error::*;
use crate::frame::{GrayFloatImage, StereoFrame};
use crate::ops;
use crate::preprocess;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct VectorizedMatcher {
    params: Params
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl VectorizedMatcher {
    /// Create a new instance of the algorithm with the given parameters.
    ///
    /// The window geometry setting only affects the iterative matcher; this one always uses a
    /// centred `block x block` kernel.
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mean absolute difference around every pixel for a single shift `d`.
    fn cost_plane(&self, frame: &StereoFrame, d: usize) -> GrayFloatImage {
        log::trace!("Cost plane for shift {}", d);

        let shifted = frame.right().shift_right(d);
        let diff = ops::abs_diff(frame.left(), &shifted);

        ops::box_filter_mean(&diff, self.params.block)
    }
}

impl DisparityAlgorithm for VectorizedMatcher {
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        let raw = self.compute_shift_indices(frame)?;

        Ok(normalise_for_display(&raw, self.params.num_disparities))
    }

    fn compute_shift_indices(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        log::debug!(
            "Vectorized SAD over {}x{}, {} disparities, block {}",
            frame.width(),
            frame.height(),
            self.params.num_disparities,
            self.params.block
        );

        // Planes may be computed in any order, the reduction below fixes the tie-break.
        let this = &*self;
        let planes = ops::map_shifts(this.params.num_disparities, |d| this.cost_plane(frame, d));
        let disparity = ops::argmin_over_shifts(&planes);

        Ok(DisparityMap::from_image(disparity, DisparityScale::ShiftIndex))
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Map raw shifts onto [0, 255] with `round(d * 255 / num_disparities)` and equalize the result.
///
/// Maps that are already in [`DisparityScale::Display`] are returned unchanged.
pub fn normalise_for_display(raw: &DisparityMap, num_disparities: usize) -> DisparityMap {
    if raw.scale() == DisparityScale::Display {
        return raw.clone();
    }

    let n = num_disparities.max(1) as f32;
    let mut scaled = GrayImage::new(raw.width() as u32, raw.height() as u32);

    for (dst, &d) in scaled.iter_mut().zip(raw.as_image().as_slice().iter()) {
        *dst = (d * 255.0 / n).round().max(0.0).min(255.0) as u8;
    }

    let equalized = preprocess::equalize(&scaled);

    DisparityMap::from_image(GrayFloatImage::from_luma(&equalized), DisparityScale::Display)
}

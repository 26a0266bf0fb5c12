//! # Iterative block matching
//!
//! Brute force sum of absolute differences (SAD) search. Every pixel is scored against every
//! candidate shift with an explicit window loop, which makes this the slow reference the
//! [`vectorized`](crate::vectorized) matcher is checked against.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::disparity::{DisparityAlgorithm, DisparityMap, DisparityScale, Params};
use crate::error::*;
use crate::frame::{GrayFloatImage, StereoFrame};
use crate::ops;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct IterativeMatcher {
    params: Params
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl IterativeMatcher {
    /// Create a new instance of the algorithm with the given parameters.
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// SAD between the window at `(x, y)` in the padded left image and the same window in the
    /// padded right image translated `d` pixels to the right.
    ///
    /// `(x, y)` is the window's top left corner in padded coordinates. Columns of the translated
    /// image left of `d` are zero.
    fn get_criterion(
        left: &GrayFloatImage,
        right: &GrayFloatImage,
        x: usize,
        y: usize,
        side: usize,
        d: usize
    ) -> f32 {
        let mut acc = 0.0f32;

        for j in y..y + side {
            for i in x..x + side {
                let shifted = if i >= d { right.get(i - d, j) } else { 0.0 };
                acc += (left.get(i, j) - shifted).abs();
            }
        }

        acc
    }
}

impl DisparityAlgorithm for IterativeMatcher {
    /// Compute the disparity map for the given frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        let Params {
            num_disparities,
            block,
            window
        } = self.params;

        let (width, height) = (frame.width(), frame.height());
        let padding = window.padding(block);
        let side = window.side(block);

        log::debug!(
            "Iterative SAD over {}x{}, {} disparities, {:?} window of side {}, padding {}",
            width,
            height,
            num_disparities,
            window,
            side,
            padding
        );

        // ---- PAD ----

        let left = frame.left().pad_constant(padding, 0.0);
        let right = frame.right().pad_constant(padding, 0.0);

        // ---- STEREO CORRELATION ----

        // Output pixel (x, y) owns the window whose top left corner is padded (x, y). Pixels
        // outside the scored extent keep disparity 0.
        let extent_x = window.scored_extent(block, left.width());
        let extent_y = window.scored_extent(block, left.height());
        let mut disparity = GrayFloatImage::new(width, height);

        ops::for_each_row(disparity.as_mut_slice(), width, |y, row| {
            if y >= extent_y {
                return;
            }

            for (x, out) in row.iter_mut().enumerate().take(extent_x) {
                // Running minimum, only replaced by a strictly lower SAD so the smallest shift
                // wins ties.
                let mut min_sad = f32::INFINITY;
                let mut best = 0usize;

                for d in 0..num_disparities {
                    let sad = Self::get_criterion(&left, &right, x, y, side, d);
                    if sad < min_sad {
                        min_sad = sad;
                        best = d;
                    }
                }

                *out = best as f32;
            }

            log::trace!("Row {} done", y);
        });

        Ok(DisparityMap::from_image(disparity, DisparityScale::ShiftIndex))
    }
}

//! # Disparity to depth pipeline
//!
//! Runs the full chain for a pair of image files: load and preprocess both images, match them
//! with the configured algorithm and triangulate depth.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::GrayImage;

use crate::config::{Config, Method};
use crate::depth::DepthMap;
use crate::disparity::{DisparityAlgorithm, DisparityMap};
use crate::error::*;
use crate::frame::StereoFrame;
use crate::iterative::IterativeMatcher;
use crate::preprocess;
use crate::vectorized::{self, VectorizedMatcher};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct Pipeline {
    config: Config,
    matcher: Box<dyn DisparityAlgorithm>
}

/// Everything produced by one pipeline run.
pub struct PipelineOutput {
    /// Disparity as raw horizontal shifts.
    pub disparity: DisparityMap,

    /// Disparity rendered for viewing. For the vectorized method this is the normalised and
    /// equalized map, for the iterative method the map normalised by its maximum.
    pub display: GrayImage,

    pub depth: DepthMap
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let matcher: Box<dyn DisparityAlgorithm> = match config.method {
            Method::Iterative => Box::new(IterativeMatcher::new(config.matcher)?),
            Method::Vectorized => Box::new(VectorizedMatcher::new(config.matcher)?)
        };

        Ok(Self { config, matcher })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load, preprocess and process the stereo pair at the given paths.
    pub fn run<P, Q>(&mut self, left: P, right: Q) -> Result<PipelineOutput>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>
    {
        let frame = preprocess::load_frame(left, right)?;

        self.run_frame(&frame)
    }

    /// Process an already preprocessed stereo frame.
    pub fn run_frame(&mut self, frame: &StereoFrame) -> Result<PipelineOutput> {
        log::info!(
            "Matching {}x{} frame with {:?} method",
            frame.width(),
            frame.height(),
            self.config.method
        );

        let disparity = self.matcher.compute_shift_indices(frame)?;

        let display = match self.config.method {
            Method::Vectorized => {
                vectorized::normalise_for_display(&disparity, self.config.matcher.num_disparities)
                    .to_luma()
            }
            Method::Iterative => disparity.to_luma_normalised()
        };

        log::info!(
            "Disparity range {:?}..{:?}, converting to depth",
            disparity.min_disp,
            disparity.max_disp
        );

        let depth = DepthMap::from_disparity(&disparity, &self.config.camera);

        Ok(PipelineOutput {
            disparity,
            display,
            depth
        })
    }
}

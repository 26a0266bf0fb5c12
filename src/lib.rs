//! # Block matching disparity
//!
//! This crate computes disparity maps from rectified stereo image pairs using windowed sum of
//! absolute differences (SAD) block matching, and converts them into metric depth.
//!
//! Two matchers implement [`DisparityAlgorithm`](disparity::DisparityAlgorithm):
//!
//! - [`iterative::IterativeMatcher`] scans every pixel and shift with an explicit window loop.
//! - [`vectorized::VectorizedMatcher`] box filters whole difference images per shift and takes
//!   the arg-min over shifts.
//!
//! # Features
//!
//! - `rayon`: matchers split their work over image rows or shifts on the rayon thread pool.
//!   Output is identical to the single threaded build.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod config;
pub mod depth;
pub mod disparity;
mod error;
pub mod frame;
pub mod iterative;
mod ops;
pub mod pipeline;
pub mod preprocess;
pub mod vectorized;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::config::{Config, Method};
    pub use crate::depth::{CameraParams, DepthMap};
    pub use crate::disparity::{
        DisparityAlgorithm, DisparityMap, DisparityScale, Params, WindowGeometry
    };
    pub use crate::error::{Error, Result};
    pub use crate::frame::{GrayFloatImage, StereoFrame};
}

//! Synthetic stereo scenes shared by the integration tests.

#![allow(dead_code)]

use bm_disparity::prelude::*;

/// Deterministic pseudo-random texture in [0, 255].
pub fn texture(x: usize, y: usize) -> f32 {
    let mut h = (x as u32).wrapping_mul(0x9e37_79b1) ^ (y as u32).wrapping_mul(0x85eb_ca77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297a_2d39);
    h ^= h >> 15;

    (h & 0xff) as f32
}

/// Build a pair where the left image is the right image moved `shift(y)` pixels to the right.
/// Columns of the left image with no counterpart are filled with unrelated texture.
pub fn shifted_pair<F: Fn(usize) -> usize>(
    width: usize,
    height: usize,
    shift: F
) -> StereoFrame {
    let right = GrayFloatImage::from_fn(width, height, texture);
    let left = GrayFloatImage::from_fn(width, height, |x, y| {
        let s = shift(y);
        if x >= s {
            texture(x - s, y)
        }
        else {
            texture(x + 10_000, y + 10_000)
        }
    });

    StereoFrame::new(left, right).expect("images have equal size")
}

/// A pair of identical textured images.
pub fn identical_pair(width: usize, height: usize) -> StereoFrame {
    let img = GrayFloatImage::from_fn(width, height, texture);

    StereoFrame::new(img.clone(), img).expect("images have equal size")
}

/// Values of a map inside a border of `margin` pixels.
pub fn interior(map: &DisparityMap, margin: usize) -> Vec<f32> {
    let mut out = Vec::new();
    for y in margin..map.height() - margin {
        for x in margin..map.width() - margin {
            out.push(map.get(x, y));
        }
    }

    out
}

/// Pearson correlation of two equally long samples.
pub fn correlation(a: &[f32], b: &[f32]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().map(|&v| v as f64).sum::<f64>() / n;
    let mean_b = b.iter().map(|&v| v as f64).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&va, &vb) in a.iter().zip(b.iter()) {
        let da = va as f64 - mean_a;
        let db = vb as f64 - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    cov / (var_a.sqrt() * var_b.sqrt())
}

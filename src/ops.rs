//! # Shared image kernels
//!
//! Box filtering, arg-min reduction over shift planes, and the work partitioning helpers used
//! by both matchers. With the `rayon` feature the partitioned work runs on the rayon thread
//! pool; results are identical either way.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::Luma;
use imageproc::{definitions::Image, filter::separable_filter_equal};

use crate::frame::GrayFloatImage;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Run `f(y, row)` over every `width` long row of `data`. Rows are disjoint so workers never
/// share output cells.
#[cfg(feature = "rayon")]
pub(crate) fn for_each_row<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send
{
    if width == 0 {
        return;
    }

    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn for_each_row<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send
{
    for_each_row_serial(data, width, f)
}

/// Single threaded [`for_each_row`].
#[cfg_attr(feature = "rayon", allow(dead_code))]
pub(crate) fn for_each_row_serial<T, F>(data: &mut [T], width: usize, f: F)
where
    F: Fn(usize, &mut [T])
{
    if width == 0 {
        return;
    }

    data.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Evaluate `f(d)` for every shift `d` in `0..num_disparities`, returned in shift order.
#[cfg(feature = "rayon")]
pub(crate) fn map_shifts<T, F>(num_disparities: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send
{
    (0..num_disparities).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn map_shifts<T, F>(num_disparities: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send
{
    map_shifts_serial(num_disparities, f)
}

/// Single threaded [`map_shifts`].
#[cfg_attr(feature = "rayon", allow(dead_code))]
pub(crate) fn map_shifts_serial<T, F>(num_disparities: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T
{
    (0..num_disparities).map(f).collect()
}

/// Per-pixel absolute difference of two equally sized images.
pub(crate) fn abs_diff(a: &GrayFloatImage, b: &GrayFloatImage) -> GrayFloatImage {
    GrayFloatImage::from_fn(a.width(), a.height(), |x, y| (a.get(x, y) - b.get(x, y)).abs())
}

/// Convolve with a normalised `block x block` averaging kernel.
///
/// Runs `imageproc`'s separable filter with unit weights and divides once at the end, so integer
/// valued inputs give exact window sums. Outside the image the filter repeats the nearest edge
/// pixel.
pub(crate) fn box_filter_mean(img: &GrayFloatImage, block: usize) -> GrayFloatImage {
    let norm = (block * block) as f32;
    let kernel = vec![1.0f32; block];

    let sums: Image<Luma<f32>> = separable_filter_equal(&img.to_buffer(), &kernel);
    let mut mean = GrayFloatImage::from_buffer(sums);
    for v in mean.as_mut_slice() {
        *v /= norm;
    }

    mean
}

/// Index of the plane holding the smallest value at every pixel.
///
/// Planes are scanned in ascending order and only a strictly smaller value replaces the current
/// best, so ties resolve to the smallest shift whatever order the planes were computed in.
pub(crate) fn argmin_over_shifts(planes: &[GrayFloatImage]) -> GrayFloatImage {
    let (width, height) = match planes.first() {
        Some(p) => p.dimensions(),
        None => return GrayFloatImage::new(0, 0)
    };

    let mut best = vec![f32::INFINITY; width * height];
    let mut index = GrayFloatImage::new(width, height);

    for (d, plane) in planes.iter().enumerate() {
        for ((cost, min), idx) in plane
            .as_slice()
            .iter()
            .zip(best.iter_mut())
            .zip(index.as_mut_slice().iter_mut())
        {
            if *cost < *min {
                *min = *cost;
                *idx = d as f32;
            }
        }
    }

    index
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_filter_of_constant_image_is_constant_up_to_the_edges() {
        let img = GrayFloatImage::from_fn(9, 9, |_, _| 10.0);
        let out = box_filter_mean(&img, 3);

        for v in out.as_slice() {
            assert!((v - 10.0).abs() < 1e-5, "{}", v);
        }
    }

    #[test]
    fn box_filter_repeats_edge_pixels() {
        // A bright first column: the corner window sees it twice per row (the column and its
        // replica) on each of its three rows.
        let img = GrayFloatImage::from_fn(6, 6, |x, _| if x == 0 { 9.0 } else { 0.0 });
        let out = box_filter_mean(&img, 3);

        assert_eq!(out.get(0, 0), 9.0 * 2.0 * 3.0 / 9.0);
        assert_eq!(out.get(1, 3), 9.0 * 3.0 / 9.0);
        assert_eq!(out.get(2, 3), 0.0);
    }

    #[test]
    fn box_filter_of_impulse_spreads_evenly() {
        let mut img = GrayFloatImage::new(7, 7);
        img.put(3, 3, 25.0);
        let out = box_filter_mean(&img, 5);

        for y in 0..7 {
            for x in 0..7 {
                let inside = (1..=5).contains(&x) && (1..=5).contains(&y);
                let expected = if inside { 1.0 } else { 0.0 };
                assert_eq!(out.get(x, y), expected, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn argmin_prefers_first_plane_on_ties() {
        let a = GrayFloatImage::from_vec(3, 1, vec![1.0, 2.0, 0.0]).unwrap();
        let b = GrayFloatImage::from_vec(3, 1, vec![1.0, 1.0, 0.0]).unwrap();
        let c = GrayFloatImage::from_vec(3, 1, vec![0.5, 1.0, 0.0]).unwrap();

        let idx = argmin_over_shifts(&[a, b, c]);

        assert_eq!(idx.as_slice(), &[2.0, 1.0, 0.0]);
    }

    #[test]
    fn map_shifts_keeps_shift_order() {
        let out = map_shifts(16, |d| d * 2);
        assert_eq!(out, (0..16).map(|d| d * 2).collect::<Vec<_>>());
    }

    #[test]
    fn partitioned_work_matches_serial_reference() {
        let f = |y: usize, row: &mut [u64]| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = (x as u64 + 1) * 1_000 + y as u64;
            }
        };

        let mut serial = vec![0u64; 37 * 23];
        let mut partitioned = vec![0u64; 37 * 23];
        for_each_row_serial(&mut serial, 37, f);
        for_each_row(&mut partitioned, 37, f);
        assert_eq!(serial, partitioned);

        let g = |d: usize| d * d + 7;
        assert_eq!(map_shifts_serial(64, g), map_shifts(64, g));
    }

    #[test]
    fn for_each_row_visits_every_row_once() {
        let mut data = vec![0usize; 4 * 5];
        for_each_row(&mut data, 4, |y, row| {
            for v in row.iter_mut() {
                *v += y + 1;
            }
        });

        for (i, v) in data.iter().enumerate() {
            assert_eq!(*v, i / 4 + 1);
        }
    }
}

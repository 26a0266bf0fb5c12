//! Image loading and histogram equalization

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use bm_disparity::{prelude::*, preprocess};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[test]
fn equalizes_to_full_range() {
    // Low contrast ramp squeezed into 100..=131.
    let img = GrayImage::from_fn(64, 16, |x, _| Luma([100 + (x / 2) as u8]));

    let out = preprocess::preprocess(&DynamicImage::ImageLuma8(img));

    assert_eq!(out.dimensions(), (64, 16));
    assert_eq!(out.iter().max(), Some(&255));
    assert_eq!(out.iter().min(), Some(&0));
}

#[test]
fn two_levels_map_to_the_extremes() {
    let img = GrayImage::from_fn(32, 8, |x, _| Luma([if x < 16 { 100 } else { 150 }]));

    let out = preprocess::equalize(&img);

    for (x, _, p) in out.enumerate_pixels() {
        assert_eq!(p[0], if x < 16 { 0 } else { 255 });
    }
}

#[test]
fn single_level_image_is_unchanged() {
    let img = GrayImage::from_pixel(12, 9, Luma([77]));

    assert_eq!(preprocess::equalize(&img), img);
}

#[test]
fn converts_colour_to_single_channel() {
    let img = RgbImage::from_fn(20, 10, |x, y| Rgb([(x * 12) as u8, (y * 25) as u8, 80]));

    let out = preprocess::preprocess(&DynamicImage::ImageRgb8(img));

    assert_eq!(out.dimensions(), (20, 10));
}

#[test]
fn preprocessing_is_idempotent() {
    let img = GrayImage::from_fn(50, 40, |x, y| Luma([((x * 7 + y * 13) % 97 + 40) as u8]));

    let once = preprocess::preprocess(&DynamicImage::ImageLuma8(img));
    let twice = preprocess::preprocess(&DynamicImage::ImageLuma8(once.clone()));

    for (a, b) in once.iter().zip(twice.iter()) {
        assert!((*a as i16 - *b as i16).abs() <= 1, "{} vs {}", a, b);
    }
}

#[test]
fn missing_file_is_unreadable_input() {
    match preprocess::load("this/path/does/not/exist.png") {
        Err(Error::InputUnreadable { path, .. }) => {
            assert_eq!(path, std::path::PathBuf::from("this/path/does/not/exist.png"))
        }
        other => panic!("expected InputUnreadable, got {:?}", other)
    }
}

#[test]
fn mismatched_pair_is_rejected() {
    let left = GrayImage::new(32, 24);
    let right = GrayImage::new(30, 24);

    match StereoFrame::from_luma(&left, &right) {
        Err(Error::DimensionMismatch { left, right }) => {
            assert_eq!(left, (32, 24));
            assert_eq!(right, (30, 24));
        }
        other => panic!("expected DimensionMismatch, got {:?}", other)
    }
}

//! Iterative SAD matcher on synthetic stereo pairs

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

mod common;

use bm_disparity::{iterative::IterativeMatcher, prelude::*};

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[test]
fn recovers_constant_shift() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let frame = common::shifted_pair(48, 32, |_| 5);

    let mut disp = IterativeMatcher::new(Params {
        num_disparities: 10,
        block: 5,
        window: WindowGeometry::Centered
    })?;

    let map = disp.compute(&frame)?;

    assert_eq!(map.scale(), DisparityScale::ShiftIndex);
    assert_eq!((map.width(), map.height()), (48, 32));
    for v in common::interior(&map, 10) {
        assert_eq!(v, 5.0);
    }

    Ok(())
}

#[test]
fn legacy_window_recovers_constant_shift() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let frame = common::shifted_pair(48, 32, |_| 5);

    let mut disp = IterativeMatcher::new(Params {
        num_disparities: 10,
        block: 5,
        window: WindowGeometry::Legacy
    })?;

    let map = disp.compute(&frame)?;

    assert_eq!((map.width(), map.height()), (48, 32));
    for v in common::interior(&map, 10) {
        assert_eq!(v, 5.0);
    }

    Ok(())
}

#[test]
fn legacy_window_leaves_unscored_border_at_zero() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let frame = common::shifted_pair(40, 30, |_| 5);

    // block 5 pads by 1 and scores padded positions 5..(w + 2 - 5), so only output columns and
    // rows below `len - 8` get a disparity.
    let mut disp = IterativeMatcher::new(Params {
        num_disparities: 10,
        block: 5,
        window: WindowGeometry::Legacy
    })?;

    let map = disp.compute(&frame)?;

    for y in 0..30 {
        for x in 0..40 {
            if x >= 32 || y >= 22 {
                assert_eq!(map.get(x, y), 0.0, "at ({}, {})", x, y);
            }
        }
    }

    Ok(())
}

#[test]
fn identical_images_give_zero_disparity() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let frame = common::identical_pair(32, 24);

    for window in [WindowGeometry::Centered, WindowGeometry::Legacy].iter() {
        let mut disp = IterativeMatcher::new(Params {
            num_disparities: 8,
            block: 3,
            window: *window
        })?;

        let map = disp.compute(&frame)?;

        assert!(map.as_image().as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(map.max_disp, Some(0.0));
    }

    Ok(())
}

#[test]
fn flat_images_tie_break_to_smallest_shift() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Every shift scores zero, the first one must win.
    let img = GrayFloatImage::from_fn(20, 20, |_, _| 0.0);
    let frame = StereoFrame::new(img.clone(), img)?;

    let mut disp = IterativeMatcher::new(Params {
        num_disparities: 6,
        block: 3,
        window: WindowGeometry::Centered
    })?;

    let map = disp.compute(&frame)?;

    assert!(map.as_image().as_slice().iter().all(|&v| v == 0.0));

    Ok(())
}

#[test]
fn rejects_invalid_parameters() {
    let bad = [
        Params { num_disparities: 0, ..Params::default() },
        Params { block: 4, ..Params::default() },
        Params { block: 1, ..Params::default() }
    ];

    for params in bad.iter() {
        match IterativeMatcher::new(*params) {
            Err(Error::InvalidConfiguration(_)) => (),
            other => panic!("expected InvalidConfiguration for {:?}, got {:?}", params, other.err())
        }
    }
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bm_disparity::{
    iterative::IterativeMatcher,
    prelude::*,
    vectorized::VectorizedMatcher
};

fn texture(x: usize, y: usize) -> f32 {
    let h = ((x as u32).wrapping_mul(0x9e37_79b1) ^ (y as u32).wrapping_mul(0x85eb_ca77))
        .wrapping_mul(0x2c1b_3c6d);
    ((h >> 16) & 0xff) as f32
}

fn build_frame() -> StereoFrame {
    let right = GrayFloatImage::from_fn(160, 120, texture);
    let left = GrayFloatImage::from_fn(160, 120, |x, y| {
        if x >= 8 { texture(x - 8, y) } else { 0.0 }
    });

    StereoFrame::new(left, right).unwrap()
}

fn matchers_bench(c: &mut Criterion) {
    // Build frame
    let frame = build_frame();

    let params = Params {
        num_disparities: 16,
        block: 7,
        ..Params::default()
    };

    // Build disparity algs
    let mut iterative = IterativeMatcher::new(params).unwrap();
    let mut vectorized = VectorizedMatcher::new(params).unwrap();

    // Benchmark compute functions
    c.bench_function("iterative 160x120", |b| {
        b.iter(|| iterative.compute(black_box(&frame)))
    });
    c.bench_function("vectorized 160x120", |b| {
        b.iter(|| vectorized.compute_shift_indices(black_box(&frame)))
    });
}

criterion_group!(benches, matchers_bench);
criterion_main!(benches);

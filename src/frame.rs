//! # Image and stereo frame containers
//!
//! Single channel floating point images and the left/right pair the matchers operate on.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A single channel image of `f32` samples stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayFloatImage {
    width: usize,
    height: usize,
    data: Vec<f32>
}

/// A pair of equally sized images from a rectified stereo rig.
///
/// The pair can only be built through [`StereoFrame::new`], so both images always share the
/// same dimensions.
#[derive(Clone, Debug)]
pub struct StereoFrame {
    left: GrayFloatImage,
    right: GrayFloatImage
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl GrayFloatImage {
    /// Create a new zeroed image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height]
        }
    }

    /// Build an image from a row-major buffer, returning `None` if the buffer length does not
    /// match the dimensions.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }

        Some(Self { width, height, data })
    }

    /// Build an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F: FnMut(usize, usize) -> f32>(width: usize, height: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self { width, height, data }
    }

    /// Copy an 8-bit grayscale image, keeping the [0, 255] range.
    pub fn from_luma(img: &GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.as_raw().iter().map(|&v| v as f32).collect()
        }
    }

    /// Take ownership of an `f32` image buffer, as produced by the `imageproc` filters.
    pub fn from_buffer(img: ImageBuffer<Luma<f32>, Vec<f32>>) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.into_raw()
        }
    }

    /// Copy into an `f32` image buffer.
    pub fn to_buffer(&self) -> ImageBuffer<Luma<f32>, Vec<f32>> {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            Luma([self.get(x as usize, y as usize)])
        })
    }

    /// Convert any image to grayscale without further processing.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        Self::from_luma(&img.to_luma8())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` of the image.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, val: f32) {
        self.data[y * self.width + x] = val;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Surround the image with a constant border `size` pixels wide on all four sides.
    pub fn pad_constant(&self, size: usize, value: f32) -> Self {
        let width = self.width + 2 * size;
        let height = self.height + 2 * size;
        let mut padded = Self {
            width,
            height,
            data: vec![value; width * height]
        };

        for y in 0..self.height {
            let src = &self.data[y * self.width..(y + 1) * self.width];
            let start = (y + size) * width + size;
            padded.data[start..start + self.width].copy_from_slice(src);
        }

        padded
    }

    /// Translate the image `shift` pixels to the right, filling vacated columns with zero.
    pub fn shift_right(&self, shift: usize) -> Self {
        let mut out = Self::new(self.width, self.height);
        if shift >= self.width {
            return out;
        }

        for y in 0..self.height {
            let row = y * self.width;
            out.data[row + shift..row + self.width]
                .copy_from_slice(&self.data[row..row + self.width - shift]);
        }

        out
    }

    /// Converts the image into an 8-bit grayscale image, clamping to [0, 255] and rounding.
    pub fn to_luma(&self) -> GrayImage {
        let mut new = GrayImage::new(self.width as u32, self.height as u32);

        for (dst, &val) in new.iter_mut().zip(self.data.iter()) {
            *dst = val.max(0.0).min(255.0).round() as u8;
        }

        new
    }
}

impl StereoFrame {
    /// Pair two images, failing if their dimensions differ.
    pub fn new(left: GrayFloatImage, right: GrayFloatImage) -> Result<Self> {
        if left.dimensions() != right.dimensions() {
            return Err(Error::DimensionMismatch {
                left: left.dimensions(),
                right: right.dimensions()
            });
        }

        Ok(Self { left, right })
    }

    /// Pair two 8-bit grayscale images.
    pub fn from_luma(left: &GrayImage, right: &GrayImage) -> Result<Self> {
        Self::new(GrayFloatImage::from_luma(left), GrayFloatImage::from_luma(right))
    }

    pub fn left(&self) -> &GrayFloatImage {
        &self.left
    }

    pub fn right(&self) -> &GrayFloatImage {
        &self.right
    }

    pub fn width(&self) -> usize {
        self.left.width()
    }

    pub fn height(&self) -> usize {
        self.left.height()
    }
}

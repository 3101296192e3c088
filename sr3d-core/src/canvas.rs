/// The pixel buffer every shader draws into
use crate::color::{self, Rgb, WHITE};

/// A row-major RGB frame, white when created.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![WHITE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` is outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// Panics if `(x, y)` is outside the canvas.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * self.width + x] = color;
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pack the frame as 8-bit RGB, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(color::to_rgb8).collect()
    }
}

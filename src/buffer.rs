//! Packed output buffer, one `u32` per grid cell.

use crate::color::{OPAQUE_BLACK, unpack};

/// Row-major buffer of packed colors (see [`crate::color`] for the layout)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Buffer filled with opaque black
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![OPAQUE_BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Unpacked `[r, g, b, a]` at `(x, y)`
    pub fn rgba(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        self.get(x, y).map(unpack)
    }

    pub fn set(&mut self, x: usize, y: usize, packed: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = packed;
                true
            }
            None => false,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The packed words as raw bytes. On little-endian targets this is
    /// RGBA8 per pixel, ready for an `Rgba8Unorm` texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Match the buffer to a grid size, reallocating only on change.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.pixels.clear();
            self.pixels.resize(width * height, OPAQUE_BLACK);
        }
    }
}

//! The in-memory image that rasterizers draw into, and its TGA writer.
//!
//! [`TgaImage`] owns a fixed `width × height` grid of [`Color`]s. Rows are
//! stored top to bottom in memory; the renderer draws with a bottom-left
//! origin and calls [`TgaImage::flip_vertically`] before writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::tga::TgaEncoder;
use image::{ColorType, ImageEncoder};
use log::info;

use crate::colors::Color;

/// Channel layout used when the image is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Grayscale,
    #[default]
    Rgb,
    Rgba,
}

impl ColorMode {
    /// Bytes per pixel in the encoded image.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorMode::Grayscale => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    fn color_type(self) -> ColorType {
        match self {
            ColorMode::Grayscale => ColorType::L8,
            ColorMode::Rgb => ColorType::Rgb8,
            ColorMode::Rgba => ColorType::Rgba8,
        }
    }
}

pub struct TgaImage {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
    mode: ColorMode,
}

impl TgaImage {
    /// Creates a transparent black image.
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        Self {
            pixels: vec![Color::default(); width as usize * height as usize],
            width,
            height,
            mode,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Writes a pixel. Returns `false` and leaves the image untouched if
    /// `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Row-major view of every pixel.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Reverses the row order, moving the origin between top-left and
    /// bottom-left.
    pub fn flip_vertically(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        for row in 0..height / 2 {
            let (top, bottom) = self.pixels.split_at_mut((height - 1 - row) * width);
            top[row * width..(row + 1) * width].swap_with_slice(&mut bottom[..width]);
        }
    }

    /// Packs the pixels into the byte layout of the image's [`ColorMode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * self.mode.bytes_per_pixel());
        for c in &self.pixels {
            match self.mode {
                ColorMode::Grayscale => bytes.push(c.luma()),
                ColorMode::Rgb => bytes.extend_from_slice(&[c.r, c.g, c.b]),
                ColorMode::Rgba => bytes.extend_from_slice(&[c.r, c.g, c.b, c.a]),
            }
        }
        bytes
    }

    /// Encodes the image as an uncompressed TGA file: image type 2 (truecolor)
    /// for RGB and RGBA, 3 for grayscale.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        TgaEncoder::new(&mut writer).disable_rle().write_image(
            &self.to_bytes(),
            self.width,
            self.height,
            self.mode.color_type().into(),
        )?;
        writer.flush()?;
        info!(
            "wrote {}x{} {:?} image to {}",
            self.width,
            self.height,
            self.mode,
            path.display()
        );
        Ok(())
    }
}

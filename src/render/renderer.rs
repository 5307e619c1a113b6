//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the image and depth buffer for
//! one frame and implements the basic drawing operations on top of them.

use std::path::Path;

use super::framebuffer::{DepthBuffer, FrameBuffer};
use super::line::draw_triangle_outline;
use super::rasterizer::Triangle;
use crate::colors::Color;
use crate::tga::{ColorMode, TgaImage};

pub struct Renderer {
    image: TgaImage,
    depth_buffer: DepthBuffer,
}

impl Renderer {
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Self {
        Self {
            image: TgaImage::new(width, height, mode),
            depth_buffer: DepthBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fills the image with `color` and resets the depth buffer.
    pub fn clear(&mut self, color: Color) {
        self.image.clear(color);
        self.depth_buffer.clear();
    }

    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: Color) {
        let [p0, p1, p2] = triangle.screen_points();
        draw_triangle_outline(p0, p1, p2, &mut self.image, color);
    }

    pub fn image(&self) -> &TgaImage {
        &self.image
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    /// Get a mutable FrameBuffer view into the image and depth buffer.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.image, &mut self.depth_buffer)
    }

    /// Flips the image so the origin is at the bottom-left and writes it.
    ///
    /// The flip is undone afterwards, leaving the in-memory frame unchanged.
    pub fn write<P: AsRef<Path>>(&mut self, path: P) -> Result<(), image::ImageError> {
        self.image.flip_vertically();
        let result = self.image.write(path);
        self.image.flip_vertically();
        result
    }
}

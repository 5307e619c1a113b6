//! Frame buffer abstraction for 2D pixel access.
//!
//! Pairs the color image with a per-pixel depth buffer so that depth-tested
//! fills can borrow both at once.

use crate::tga::TgaImage;

/// Per-pixel depth store for hidden surface removal.
///
/// Larger values win. Every entry starts at `f32::MIN`, so the first real
/// depth written to a pixel always passes the test.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    /// Value of an untouched pixel.
    pub const FAR: f32 = f32::MIN;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![Self::FAR; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets every pixel to [`DepthBuffer::FAR`].
    pub fn clear(&mut self) {
        self.depths.fill(Self::FAR);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Depth stored at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depths[idx])
    }

    /// Stores `depth` at (x, y) if it is strictly greater than the current
    /// value. Returns whether the test passed. Out-of-bounds always fails.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth > self.depths[idx] => {
                self.depths[idx] = depth;
                true
            }
            _ => false,
        }
    }
}

/// A view into color and depth buffers.
///
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily for the duration of a frame's fill calls.
pub struct FrameBuffer<'a> {
    pub image: &'a mut TgaImage,
    pub depth: &'a mut DepthBuffer,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view.
    ///
    /// # Panics
    /// Panics in debug builds if the two buffers disagree on dimensions.
    pub fn new(image: &'a mut TgaImage, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (image.width(), image.height()),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match image"
        );
        Self { image, depth }
    }
}

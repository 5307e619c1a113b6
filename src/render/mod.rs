//! Rendering internals: buffers, line drawing and triangle fills.

pub mod framebuffer;
pub mod line;
pub mod rasterizer;
mod renderer;

pub use framebuffer::{DepthBuffer, FrameBuffer};
pub use line::{draw_line, draw_triangle_outline};
pub use rasterizer::{
    BarycentricRasterizer, Rasterizer, RasterizerDispatcher, RasterizerType, SweepRasterizer,
    Triangle,
};
pub use renderer::Renderer;

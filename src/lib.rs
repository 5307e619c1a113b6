//! A minimal CPU rasterizer.
//!
//! Draws lines and filled triangles into an in-memory image and writes it as
//! TGA. Meshes loaded from OBJ files are rendered flat-shaded under a single
//! directional light, with a z-buffer resolving visibility.
//!
//! # Quick Start
//!
//! ```ignore
//! use tinyraster::prelude::*;
//!
//! let mesh = Mesh::from_obj("assets/cube.obj")?;
//! let mut engine = Engine::new(RenderConfig::default());
//! engine.render(Some(&mesh));
//! engine.write("output.tga")?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod render;
pub mod tga;

// Re-export commonly needed types at crate root for convenience
pub use config::{RenderConfig, Scene};
pub use engine::{Engine, FrameStats};
pub use mesh::{LoadError, Mesh};
pub use render::RasterizerType;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use tinyraster::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::{RenderConfig, Scene};
    pub use crate::engine::{Engine, FrameStats};

    // Geometry
    pub use crate::math::point2::Point2;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::mesh::{LoadError, Mesh};

    // Rendering
    pub use crate::colors::Color;
    pub use crate::light::DirectionalLight;
    pub use crate::render::{
        draw_line, draw_triangle_outline, DepthBuffer, FrameBuffer, Rasterizer, RasterizerType,
        Triangle,
    };
    pub use crate::render::rasterizer::{fill_triangle_barycentric, fill_triangle_sweep};
    pub use crate::tga::{ColorMode, TgaImage};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        BarycentricRasterizer, DepthBuffer, FrameBuffer, Rasterizer, SweepRasterizer, Triangle,
    };
}

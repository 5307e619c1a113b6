//! Small vector and point types used by the rasterizer.

pub mod point2;
pub mod vec2;
pub mod vec3;

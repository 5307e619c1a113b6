//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically; a zero vector falls
    /// back to pointing into the screen.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.try_normalize().unwrap_or(Vec3::BACK),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Calculate light intensity for flat shading.
    ///
    /// Returns intensity in [0.0, 1.0] range based on the angle between
    /// the surface normal and the light direction. Zero means the surface
    /// faces away from the light. `normal` must be unit length.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal).max(0.0)
    }
}

impl Default for DirectionalLight {
    /// Light travelling from the viewer into the screen.
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        // Light pointing toward -Z, normal facing +Z (toward the light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_illumination() {
        // Light pointing toward -Z, normal facing -Z (away from light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!(light.intensity(normal) == 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        // Light pointing straight down (-Y), normal at 45 degrees
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        // cos(45) ≈ 0.707
        assert_relative_eq!(light.intensity(normal), 0.707, epsilon = 0.01);
    }

    #[test]
    fn direction_is_normalized() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -7.0));
        assert_eq!(light.direction(), Vec3::BACK);
        assert_eq!(DirectionalLight::new(Vec3::ZERO), DirectionalLight::default());
    }
}

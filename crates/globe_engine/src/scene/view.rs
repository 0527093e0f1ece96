//! Per-pass camera snapshot

use crate::foundation::math::{Mat4, Point3};
use crate::scene::frustum::{Frustum, Sphere};

/// Camera state for one rendering pass
///
/// A snapshot the scene driver hands to every renderable through the draw
/// context: the eye point for distance computations, the modelview matrix
/// geometry is composed against, the view frustum for culling, and the
/// projection parameters needed to estimate an extent's screen footprint.
#[derive(Debug, Clone)]
pub struct View {
    /// Camera eye point in world coordinates
    pub eye_point: Point3,
    /// Camera modelview matrix
    pub modelview: Mat4,
    /// View frustum in world coordinates
    pub frustum: Frustum,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Vertical field of view in radians
    pub fov_y: f64,
}

impl View {
    /// Create a view snapshot
    pub fn new(
        eye_point: Point3,
        modelview: Mat4,
        frustum: Frustum,
        viewport_height: u32,
        fov_y: f64,
    ) -> Self {
        Self {
            eye_point,
            modelview,
            frustum,
            viewport_height,
            fov_y,
        }
    }

    /// Size in meters of one pixel at the given eye distance
    ///
    /// For a perspective projection the visible height at distance `d` is
    /// `2 d tan(fov_y / 2)`, spread over the viewport height.
    pub fn pixel_size_at_distance(&self, distance: f64) -> f64 {
        if self.viewport_height == 0 {
            return 0.0;
        }
        (2.0 * distance * (self.fov_y / 2.0).tan() / f64::from(self.viewport_height)).max(0.0)
    }

    /// Projected screen footprint of a sphere extent, in pixels
    pub fn extent_pixels(&self, extent: &Sphere) -> f64 {
        let distance = nalgebra::distance(&self.eye_point, &extent.center);
        let pixel_size = self.pixel_size_at_distance(distance);
        if pixel_size <= 0.0 {
            return f64::INFINITY; // Degenerate view; never cull by size.
        }
        extent.diameter() / pixel_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn view_at_origin() -> View {
        View::new(
            Point3::origin(),
            Mat4::identity(),
            Frustum::infinite(),
            1000,
            std::f64::consts::FRAC_PI_2,
        )
    }

    #[test]
    fn test_pixel_size_grows_with_distance() {
        let view = view_at_origin();
        // fov 90°: visible height at distance d is 2d, so one pixel is 2d/1000.
        assert_relative_eq!(view.pixel_size_at_distance(500.0), 1.0, epsilon = 1.0e-9);
        assert_relative_eq!(view.pixel_size_at_distance(1000.0), 2.0, epsilon = 1.0e-9);
    }

    #[test]
    fn test_extent_pixels() {
        let view = view_at_origin();
        // 10 m sphere 500 m ahead: 20 m diameter / 1 m per pixel.
        let extent = Sphere::new(Point3::new(0.0, 0.0, -500.0), 10.0);
        assert_relative_eq!(view.extent_pixels(&extent), 20.0, epsilon = 1.0e-9);
    }
}

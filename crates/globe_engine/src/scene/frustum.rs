//! Culling volumes: planes, frustums, and sphere extents

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (should be normalized)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f64,
}

impl Plane {
    /// Create a new plane from normal and distance
    pub fn new(normal: Vec3, distance: f64) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Calculate signed distance from plane to point (positive = in front)
    pub fn distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) + self.distance
    }
}

/// Bounding sphere extent
///
/// The bounding volume renderables use for culling: cheap to compute, cheap
/// to test, conservative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Sphere center in world coordinates
    pub center: Point3,
    /// Sphere radius in meters
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from center and radius
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Sphere diameter
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }
}

/// View frustum for visibility culling
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Six planes with inward-pointing normals
    /// (left, right, bottom, top, near, far)
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// A frustum that accepts every extent
    ///
    /// Degenerate zero planes sit at distance zero from everything, so no
    /// sphere is ever rejected. Useful for drivers that cull elsewhere and
    /// for tests.
    pub fn infinite() -> Self {
        let accept_all = Plane {
            normal: Vec3::zeros(),
            distance: 0.0,
        };
        Self {
            planes: [accept_all; 6],
        }
    }

    /// Extract frustum planes from a view-projection matrix
    ///
    /// Gribb & Hartmann method: each plane is a sum or difference of two
    /// rows of the combined matrix, then normalized. Works for perspective
    /// and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row = |i: usize| {
            [
                vp[(i, 0)],
                vp[(i, 1)],
                vp[(i, 2)],
                vp[(i, 3)],
            ]
        };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let combine = |a: [f64; 4], b: [f64; 4], sign: f64| {
            let coeffs = [
                a[0] + sign * b[0],
                a[1] + sign * b[1],
                a[2] + sign * b[2],
                a[3] + sign * b[3],
            ];
            let normal = Vec3::new(coeffs[0], coeffs[1], coeffs[2]);
            let len = normal.norm();
            if len > 0.0 {
                Plane {
                    normal: normal / len,
                    distance: coeffs[3] / len,
                }
            } else {
                Plane {
                    normal,
                    distance: coeffs[3],
                }
            }
        };

        Self {
            planes: [
                combine(r3, r0, 1.0),  // left:   row3 + row0
                combine(r3, r0, -1.0), // right:  row3 - row0
                combine(r3, r1, 1.0),  // bottom: row3 + row1
                combine(r3, r1, -1.0), // top:    row3 - row1
                combine(r3, r2, 1.0),  // near:   row3 + row2
                combine(r3, r2, -1.0), // far:    row3 - row2
            ],
        }
    }

    /// Test if a sphere intersects the frustum
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        for plane in &self.planes {
            if plane.distance_to_point(&sphere.center) < -sphere.radius {
                return false; // Sphere is completely outside this plane
            }
        }
        true // Sphere intersects or is inside the frustum
    }

    /// Test if a point is inside the frustum
    pub fn contains_point(&self, point: &Point3) -> bool {
        for plane in &self.planes {
            if plane.distance_to_point(point) < 0.0 {
                return false;
            }
        }
        true
    }
}

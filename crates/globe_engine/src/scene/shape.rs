//! Shape primitives as immutable face tables
//!
//! A solid is data: a vertex list plus face descriptors (a face normal and
//! an ordered ring of vertex indices). Emission walks the table and submits
//! one quad per face; substituting a different solid means substituting a
//! different table, not different code. The table knows nothing about the
//! scene, camera, or picking.

use crate::foundation::math::{Point3, Vec3};
use crate::render::{RenderDevice, RenderError};

/// Errors from shape and solid construction
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Shape size must be a positive, finite number of meters
    #[error("shape size {0} must be positive and finite")]
    InvalidSize(f64),

    /// A face references a vertex index past the end of the vertex list
    #[error("face vertex index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Number of vertices in the table
        vertex_count: usize,
    },
}

/// One face: a normal and an ordered ring of four vertex indices
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// Face normal in local coordinates
    pub normal: Vec3,
    /// Indices into the owning table's vertex list, wound as a closed quad
    pub indices: [usize; 4],
}

/// Immutable table of vertices and face descriptors for one solid
#[derive(Debug, Clone)]
pub struct ShapeTable {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
}

impl ShapeTable {
    /// Create a table, validating that every face index is in bounds
    ///
    /// # Errors
    /// Returns [`ShapeError::IndexOutOfBounds`] for a dangling face index.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Result<Self, ShapeError> {
        for face in &faces {
            for &index in &face.indices {
                if index >= vertices.len() {
                    return Err(ShapeError::IndexOutOfBounds {
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Unit cube centered on the origin, edge length 1
    ///
    /// Eight vertices, six quads, per-face normals. Scaled by a renderable's
    /// size at draw time.
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Point3::new(-0.5, 0.5, -0.5),
            Point3::new(-0.5, 0.5, 0.5),
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(0.5, 0.5, -0.5),
            Point3::new(-0.5, -0.5, 0.5),
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(0.5, -0.5, -0.5),
            Point3::new(-0.5, -0.5, -0.5),
        ];
        let faces = vec![
            Face { normal: Vec3::new(0.0, 1.0, 0.0), indices: [0, 1, 2, 3] },
            Face { normal: Vec3::new(1.0, 0.0, 0.0), indices: [2, 5, 6, 3] },
            Face { normal: Vec3::new(0.0, 0.0, 1.0), indices: [1, 4, 5, 2] },
            Face { normal: Vec3::new(-1.0, 0.0, 0.0), indices: [0, 7, 4, 1] },
            Face { normal: Vec3::new(0.0, 0.0, -1.0), indices: [0, 7, 6, 3] },
            Face { normal: Vec3::new(0.0, -1.0, 0.0), indices: [4, 7, 6, 5] },
        ];
        Self { vertices, faces }
    }

    /// The table's vertices
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// The table's face descriptors
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Emit the table's geometry: one quad per face, in table order
    ///
    /// # Errors
    /// Propagates the device's [`RenderError`] if emission fails partway.
    pub fn emit(&self, device: &mut dyn RenderDevice) -> Result<(), RenderError> {
        for face in &self.faces {
            let ring = [
                self.vertices[face.indices[0]],
                self.vertices[face.indices[1]],
                self.vertices[face.indices[2]],
                self.vertices[face.indices[3]],
            ];
            device.draw_quad(face.normal, ring)?;
        }
        Ok(())
    }
}

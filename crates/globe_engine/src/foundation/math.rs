//! Math utilities and types
//!
//! Provides fundamental math types for globe-scale 3D rendering. Scalars are
//! `f64`: positions are Cartesian offsets from a planetary center, measured
//! in meters, and single precision is not enough at that magnitude.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4D vector type
pub type Vec4 = Vector4<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

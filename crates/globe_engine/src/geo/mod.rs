//! Geographic positions and the globe collaborator interface
//!
//! The engine anchors renderables at geographic coordinates. Converting a
//! coordinate to a Cartesian point (and producing the local surface frame at
//! that point) is geodesy, which lives behind the [`Globe`] trait; the scene
//! driver supplies the implementation.

use crate::foundation::math::{Mat4, Point3};

/// Errors produced by geographic coordinate validation
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    /// Latitude outside [-90, 90] degrees
    #[error("latitude {0} is outside [-90, 90] degrees")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] degrees
    #[error("longitude {0} is outside [-180, 180] degrees")]
    LongitudeOutOfRange(f64),

    /// A coordinate component is NaN or infinite
    #[error("position component {0} is not finite")]
    NotFinite(&'static str),
}

/// Geographic position: latitude, longitude, and altitude above the surface
///
/// Angles are degrees, altitude is meters. Construction validates ranges so
/// malformed positions fail fast instead of producing garbage geometry at
/// draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl Position {
    /// Create a position from latitude/longitude degrees and altitude meters
    ///
    /// # Errors
    /// Returns [`PositionError`] if a component is non-finite or an angle is
    /// out of range.
    pub fn from_degrees(latitude: f64, longitude: f64, altitude: f64) -> Result<Self, PositionError> {
        if !latitude.is_finite() {
            return Err(PositionError::NotFinite("latitude"));
        }
        if !longitude.is_finite() {
            return Err(PositionError::NotFinite("longitude"));
        }
        if !altitude.is_finite() {
            return Err(PositionError::NotFinite("altitude"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PositionError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PositionError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude above the surface in meters
    pub fn altitude(&self) -> f64 {
        self.altitude
    }
}

/// Globe collaborator: geodesy supplied by the scene driver
///
/// Implementations convert geographic coordinates into the Cartesian frame
/// the scene renders in, and provide the local surface orientation used to
/// align a shape's axes with east/north/up at its anchor.
pub trait Globe {
    /// Convert a geographic position to a Cartesian point
    fn point_from_position(&self, position: &Position) -> Point3;

    /// Convert latitude/longitude degrees at an explicit elevation
    ///
    /// Used by flat (2D) globes, where a shape's altitude is ignored and the
    /// anchor is projected at zero elevation.
    fn point_at_elevation(&self, latitude: f64, longitude: f64, elevation: f64) -> Point3;

    /// Local surface orientation at a position
    ///
    /// The returned matrix maps a local frame (X east, Y north, Z up along
    /// the surface normal, origin at the position) into the globe's
    /// Cartesian frame.
    fn surface_orientation_at(&self, position: &Position) -> Mat4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_position() {
        let p = Position::from_degrees(40.0, 116.0, 3000.0).unwrap();
        assert_eq!(p.latitude(), 40.0);
        assert_eq!(p.longitude(), 116.0);
        assert_eq!(p.altitude(), 3000.0);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = Position::from_degrees(91.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, PositionError::LatitudeOutOfRange(91.0));
    }

    #[test]
    fn test_longitude_out_of_range() {
        let err = Position::from_degrees(0.0, -180.5, 0.0).unwrap_err();
        assert_eq!(err, PositionError::LongitudeOutOfRange(-180.5));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Position::from_degrees(f64::NAN, 0.0, 0.0).is_err());
        assert!(Position::from_degrees(0.0, 0.0, f64::INFINITY).is_err());
    }
}

//! Configuration system

use serde::de::DeserializeOwned;
pub use serde::{Deserialize, Serialize};

/// Configuration trait
///
/// Blanket load/save support for serde-derived config structs, from TOML or
/// RON files chosen by extension.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns [`ConfigError`] on I/O failure, parse failure, or an
    /// unrecognized file extension.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns [`ConfigError`] on serialization or I/O failure.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Scene-wide culling settings
///
/// Supplied by the scene driver through the draw context; renderables read
/// the thresholds, the driver owns the values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Test bounding extents against the active frustum set
    pub enable_frustum_culling: bool,

    /// Minimum projected screen footprint, in pixels, below which an object
    /// is skipped for the pass
    pub min_pixel_size: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            enable_frustum_culling: true,
            min_pixel_size: 1.0,
        }
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert!(config.enable_frustum_culling);
        assert_eq!(config.min_pixel_size, 1.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SceneConfig {
            enable_frustum_culling: false,
            min_pixel_size: 4.0,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SceneConfig = toml::from_str(&text).unwrap();
        assert!(!parsed.enable_frustum_culling);
        assert_eq!(parsed.min_pixel_size, 4.0);
    }

    #[test]
    fn test_file_round_trip_per_extension() {
        let dir = tempfile::tempdir().unwrap();
        let config = SceneConfig {
            enable_frustum_culling: false,
            min_pixel_size: 4.0,
        };

        for name in ["scene.toml", "scene.ron"] {
            let path = dir.path().join(name);
            let path = path.to_str().unwrap();
            config.save_to_file(path).unwrap();

            let loaded = SceneConfig::load_from_file(path).unwrap();
            assert!(!loaded.enable_frustum_culling);
            assert_eq!(loaded.min_pixel_size, 4.0);
        }
    }

    #[test]
    fn test_unrecognized_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.yaml");
        let path = path.to_str().unwrap();

        let config = SceneConfig::default();
        assert!(matches!(
            config.save_to_file(path),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        // Loading checks the extension too, even when the file exists.
        std::fs::write(path, "{}").unwrap();
        assert!(matches!(
            SceneConfig::load_from_file(path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        assert!(matches!(
            SceneConfig::load_from_file("/nonexistent/scene.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}

//! Engine configuration
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "house_system": "porphyry",
//!   "orbs": { "sextile": 4.0 },
//!   "kepler": { "tolerance": 1e-10, "max_iterations": 50 },
//!   "polar_latitude_limit": 60.0,
//!   "bodies": ["Sun", "Moon", "Venus"]
//! }
//! ```

use crate::aspects::{AspectKind, OrbTable};
use crate::houses::{HouseSystem, DEFAULT_POLAR_LIMIT};
use crate::planetlib::{Body, KeplerSolver};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source: err,
    }
}

/// Settings shared by every computation an engine performs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub house_system: HouseSystem,
    pub orbs: OrbTable,
    pub kepler: KeplerSolver,
    /// Absolute latitude (degrees) at which quadrant house systems are refused
    pub polar_latitude_limit: f64,
    /// Bodies placed in a chart, in output order
    pub bodies: Vec<Body>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            orbs: OrbTable::default(),
            kepler: KeplerSolver::default(),
            polar_latitude_limit: DEFAULT_POLAR_LIMIT,
            bodies: Body::CHART_BODIES.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading engine config from {:?}", path);

        let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_json_str(&text)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in AspectKind::ALL {
            let orb = self.orbs.orb(kind);
            if !orb.is_finite() || orb < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "orb for {} must be finite and non-negative, got {}",
                    kind, orb
                )));
            }
        }

        if !(self.kepler.tolerance.is_finite() && self.kepler.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "kepler.tolerance must be positive, got {}",
                self.kepler.tolerance
            )));
        }
        if self.kepler.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "kepler.max_iterations must be at least 1".to_string(),
            ));
        }

        let limit = self.polar_latitude_limit;
        if !(limit > 0.0 && limit <= 90.0) {
            return Err(ConfigError::Invalid(format!(
                "polar_latitude_limit must be in (0, 90], got {}",
                limit
            )));
        }

        if self.bodies.contains(&Body::Earth) {
            return Err(ConfigError::Invalid(
                "Earth cannot be placed in a geocentric chart".to_string(),
            ));
        }
        for (i, body) in self.bodies.iter().enumerate() {
            if self.bodies[..i].contains(body) {
                return Err(ConfigError::Invalid(format!(
                    "body {} is listed more than once",
                    body
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.house_system, HouseSystem::EqualTrisection);
        assert_eq!(config.kepler.max_iterations, 100);
        assert_eq!(config.bodies.len(), 9);
        assert_eq!(config.polar_latitude_limit, 66.5);
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_json_str(
            r#"{
                "house_system": "whole-sign",
                "orbs": { "sextile": 4.0 },
                "kepler": { "max_iterations": 30 },
                "bodies": ["Sun", "Moon", "Venus"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.house_system, HouseSystem::WholeSign);
        assert_eq!(config.orbs.sextile, 4.0);
        assert_eq!(config.orbs.square, 8.0);
        assert_eq!(config.kepler.max_iterations, 30);
        assert_eq!(config.kepler.tolerance, 1e-8);
        assert_eq!(config.bodies, vec![Body::Sun, Body::Moon, Body::Venus]);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"polar_latitude_limit": 60.0}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.polar_latitude_limit, 60.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match EngineConfig::from_file(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"house_system": "placidus"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation() {
        let cases = [
            r#"{"orbs": {"trine": -1.0}}"#,
            r#"{"kepler": {"tolerance": 0.0}}"#,
            r#"{"kepler": {"max_iterations": 0}}"#,
            r#"{"polar_latitude_limit": 0.0}"#,
            r#"{"polar_latitude_limit": 95.0}"#,
            r#"{"bodies": ["Sun", "Earth"]}"#,
            r#"{"bodies": ["Sun", "Moon", "Sun"]}"#,
        ];
        for json in cases {
            assert!(
                matches!(EngineConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{} should be rejected",
                json
            );
        }
    }

    #[test]
    fn test_duplicate_body_is_named() {
        let config = EngineConfig {
            bodies: vec![Body::Venus, Body::Mars, Body::Venus],
            ..EngineConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("Venus"), "{}", message),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}

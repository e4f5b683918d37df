//! Pipeline configuration model.
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_CAPACITY;

/// Configuration Error
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_enabled() -> bool {
    true
}

fn default_history_size() -> usize {
    DEFAULT_CAPACITY
}

/// One filter unit specification: which unit to build, whether it
/// starts enabled, where it runs in the chain, and its numeric
/// parameters. The type discriminator is matched by name so that an
/// unknown unit degrades to a warning instead of failing the whole
/// file (see [crate::filters::build]).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterSpec {
    /// Unit name: one of "SatelliteFilter", "SpeedFilter",
    /// "JumpFilter", "StopFilter", "SmoothingFilter".
    #[serde(rename = "type")]
    pub kind: String,

    /// Disabled units stay in the chain but always pass.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Chain position: lower priority runs earlier.
    #[serde(default)]
    pub priority: i32,

    /// Unit parameters, e.g. `minSatellites`, `maxSpeed`, `maxJump`,
    /// `useElapsedTime`, `threshold`, `minStopTime`,
    /// `cutoffFrequency`, `sampleRate`.
    #[serde(default)]
    pub params: HashMap<String, f64>,
}

impl FilterSpec {
    /// Builds a spec with no parameters, enabled, at `priority`.
    pub fn new(kind: &str, priority: i32) -> Self {
        Self {
            kind: kind.to_string(),
            enabled: true,
            priority,
            params: HashMap::new(),
        }
    }

    /// Adds one parameter (builder style).
    pub fn with_param(mut self, key: &str, value: f64) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    /// Parameter lookup with a fallback default.
    pub fn param_or(&self, key: &str, default: f64) -> f64 {
        self.params.get(key).copied().unwrap_or(default)
    }
}

/// On-disk pipeline configuration: a bounded history plus an ordered
/// list of filter unit specifications.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Number of accepted fixes the history retains.
    #[serde(rename = "historySize", default = "default_history_size")]
    pub history_size: usize,

    /// Filter chain specification. Order on disk is irrelevant:
    /// the chain sorts by priority.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            filters: Vec::new(),
        }
    }
}

impl Config {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod test {
    use super::{Config, FilterSpec};

    const EXAMPLE: &str = r#"{
        "historySize": 25,
        "filters": [
            {
                "type": "SatelliteFilter",
                "enabled": true,
                "priority": 1,
                "params": { "minSatellites": 5 }
            },
            {
                "type": "StopFilter",
                "priority": 4,
                "params": { "threshold": 2.5, "minStopTime": 30 }
            }
        ]
    }"#;

    #[test]
    fn parses_example_document() {
        let config = Config::from_json(EXAMPLE).unwrap();
        assert_eq!(config.history_size, 25);
        assert_eq!(config.filters.len(), 2);

        let satellite = &config.filters[0];
        assert_eq!(satellite.kind, "SatelliteFilter");
        assert!(satellite.enabled);
        assert_eq!(satellite.priority, 1);
        assert_eq!(satellite.param_or("minSatellites", 4.0), 5.0);

        let stop = &config.filters[1];
        // enabled defaults to true when omitted
        assert!(stop.enabled);
        assert_eq!(stop.param_or("minStopTime", 0.0), 30.0);
    }

    #[test]
    fn defaults_when_fields_missing() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.history_size, 10);
        assert!(config.filters.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json("{ not json").is_err());
        assert!(Config::from_json(r#"{"historySize": "ten"}"#).is_err());
    }

    #[test]
    fn json_round_trip() {
        let mut config = Config::default();
        config.history_size = 50;
        config
            .filters
            .push(FilterSpec::new("SpeedFilter", 2).with_param("maxSpeed", 250.0));

        let json = config.to_json().unwrap();
        let back = Config::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_file("/nonexistent/gps.json").is_err());
    }
}

use std::f64::consts::PI;
use std::path::Path;

use antcolony_common::Bounds;
use serde::{Deserialize, Serialize};

/// Amount subtracted from every pheromone each tick. Also the removal threshold.
pub const PHEROMONE_EVAPORATION: f64 = 0.001;
/// An empty-handed ant closer than this to a non-empty source picks up one unit.
pub const PICKUP_RADIUS: f64 = 10.0;
/// A carrying ant closer than this to its own colony delivers.
pub const DELIVERY_RADIUS: f64 = 20.0;
/// Food is never placed closer than this to a window edge.
pub const FOOD_MARGIN: f64 = 50.0;
/// Placement attempts per food source before it is left out.
pub const FOOD_PLACEMENT_ATTEMPTS: usize = 100;

/// Errors from building or loading an environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Construction parameters of the environment.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub window_width: f64,
    pub window_height: f64,
    pub max_ants_per_colony: u32,
    pub num_colonies: usize,
    pub max_food_sources: usize,
    pub max_food_per_source: u32,
    pub ant_speed: f64,
    pub ant_vision_range: f64,
    /// Stored for observers and policies; the kernel itself never reads it.
    pub ant_vision_angle: f64,
    pub turn_angle: f64,
    pub min_food_colony_distance: f64,
    /// Seed for the initial RNG stream. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            max_ants_per_colony: 50,
            num_colonies: 2,
            max_food_sources: 20,
            max_food_per_source: 100,
            ant_speed: 1.0,
            ant_vision_range: 50.0,
            ant_vision_angle: PI / 2.0,
            turn_angle: PI / 10.0,
            min_food_colony_distance: 100.0,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.window_width, self.window_height)
    }

    /// Reject configurations that would produce an empty or degenerate world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_colonies == 0 {
            return Err(ConfigError::invalid("num_colonies", "must be at least 1"));
        }
        if self.max_ants_per_colony == 0 {
            return Err(ConfigError::invalid(
                "max_ants_per_colony",
                "must be at least 1",
            ));
        }
        if self.max_food_sources == 0 {
            return Err(ConfigError::invalid("max_food_sources", "must be at least 1"));
        }
        if self.max_food_per_source == 0 {
            return Err(ConfigError::invalid(
                "max_food_per_source",
                "must be at least 1",
            ));
        }
        for (field, extent) in [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
        ] {
            if !extent.is_finite() || extent <= 2.0 * FOOD_MARGIN {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and greater than {}", 2.0 * FOOD_MARGIN),
                ));
            }
        }
        for (field, value) in [
            ("ant_speed", self.ant_speed),
            ("ant_vision_range", self.ant_vision_range),
            ("min_food_colony_distance", self.min_food_colony_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(field, "must be finite and non-negative"));
            }
        }
        for (field, value) in [
            ("turn_angle", self.turn_angle),
            ("ant_vision_angle", self.ant_vision_angle),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }
        Ok(())
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
    #[error("invalid constraints: {0}")]
    InvalidConstraints(String),
}

/// MCDA weight vector. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationWeights {
    pub fitness: f64,
    pub job_card: f64,
    pub branding: f64,
    pub mileage: f64,
    pub cleaning: f64,
    pub geometry: f64,
}

impl Default for OptimizationWeights {
    fn default() -> Self {
        Self {
            fitness: FITNESS_WEIGHT,
            job_card: JOB_CARD_WEIGHT,
            branding: BRANDING_WEIGHT,
            mileage: MILEAGE_WEIGHT,
            cleaning: CLEANING_WEIGHT,
            geometry: GEOMETRY_WEIGHT,
        }
    }
}

impl OptimizationWeights {
    pub fn as_array(&self) -> [(&'static str, f64); 6] {
        [
            ("fitness", self.fitness),
            ("jobCard", self.job_card),
            ("branding", self.branding),
            ("mileage", self.mileage),
            ("cleaning", self.cleaning),
            ("geometry", self.geometry),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in self.as_array() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must sum to 1.0, got {:.6}",
                sum
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InductionConstraints {
    pub min_service_trains: usize,
    pub max_service_trains: usize,
    pub max_maintenance_slots: usize,
    pub max_cleaning_slots: usize,
}

impl Default for InductionConstraints {
    fn default() -> Self {
        Self {
            min_service_trains: MIN_SERVICE_TRAINS,
            max_service_trains: MAX_SERVICE_TRAINS,
            max_maintenance_slots: MAX_MAINTENANCE_SLOTS,
            max_cleaning_slots: MAX_CLEANING_SLOTS,
        }
    }
}

impl InductionConstraints {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_service_trains > self.max_service_trains {
            return Err(ConfigError::InvalidConstraints(format!(
                "minServiceTrains ({}) exceeds maxServiceTrains ({})",
                self.min_service_trains, self.max_service_trains
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub fleet_size: usize,
    pub service_score_threshold: f64,
    pub weights: OptimizationWeights,
    pub constraints: InductionConstraints,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fleet_size: FLEET_SIZE,
            service_score_threshold: SERVICE_SCORE_THRESHOLD,
            weights: OptimizationWeights::default(),
            constraints: InductionConstraints::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.constraints.validate()?;
        if self.fleet_size == 0 {
            return Err(ConfigError::InvalidConstraints("fleetSize must be at least 1".to_string()));
        }
        if !self.service_score_threshold.is_finite() {
            return Err(ConfigError::InvalidConstraints(
                "serviceScoreThreshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config. Missing fields fall back to the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        info!(path = %path.as_ref().display(), "loaded engine config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = OptimizationWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let weights = OptimizationWeights { fitness: 0.5, ..OptimizationWeights::default() };
        assert!(matches!(weights.validate(), Err(ConfigError::InvalidWeights(_))));

        let negative = OptimizationWeights {
            fitness: -0.25,
            job_card: 0.7,
            ..OptimizationWeights::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::InvalidWeights(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "fleetSize": 30 }"#).unwrap();
        assert_eq!(config.fleet_size, 30);
        assert_eq!(config.constraints, InductionConstraints::default());
        assert_eq!(config.weights, OptimizationWeights::default());
    }

    #[test]
    fn test_inverted_service_bounds_rejected() {
        let json = r#"{ "constraints": { "minServiceTrains": 23, "maxServiceTrains": 22, "maxMaintenanceSlots": 6, "maxCleaningSlots": 4 } }"#;
        assert!(matches!(
            EngineConfig::from_json_str(json),
            Err(ConfigError::InvalidConstraints(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(EngineConfig::from_json_str("{ fleet"), Err(ConfigError::Parse(_))));
    }
}

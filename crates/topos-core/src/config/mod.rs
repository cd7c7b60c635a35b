pub mod complex_config;
pub mod defaults;
pub mod graph_config;
pub mod observability_config;
pub mod refiner_config;
pub mod slice_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use complex_config::{ComplexConfig, PositionalEncoding};
pub use graph_config::GraphConfig;
pub use observability_config::ObservabilityConfig;
pub use refiner_config::RefinerConfig;
pub use slice_config::SliceConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Every section is optional in TOML; missing keys fall back to
/// [`defaults`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToposConfig {
    pub graph: GraphConfig,
    pub complex: ComplexConfig,
    pub refiner: RefinerConfig,
    pub slices: SliceConfig,
    pub observability: ObservabilityConfig,
}

impl ToposConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.graph.pagerank_damping) {
            return Err(invalid("graph.pagerank_damping", "must be between 0.0 and 1.0"));
        }
        if !self.complex.positional_scale.is_finite() {
            return Err(invalid("complex.positional_scale", "must be finite"));
        }
        self.validate_refiner()?;
        self.validate_slices()
    }

    fn validate_refiner(&self) -> Result<(), ConfigError> {
        let r = &self.refiner;
        if r.embedding_dim == 0 {
            return Err(invalid("refiner.embedding_dim", "must be greater than 0"));
        }
        if r.hidden_dim == 0 {
            return Err(invalid("refiner.hidden_dim", "must be greater than 0"));
        }
        if r.num_heads == 0 || r.embedding_dim % r.num_heads != 0 {
            return Err(invalid(
                "refiner.num_heads",
                "must be greater than 0 and divide embedding_dim",
            ));
        }
        if !(0.0..1.0).contains(&r.dropout) {
            return Err(invalid("refiner.dropout", "must be in [0.0, 1.0)"));
        }
        Ok(())
    }

    fn validate_slices(&self) -> Result<(), ConfigError> {
        let s = &self.slices;
        if !(0.0..=1.0).contains(&s.min_match_similarity) {
            return Err(invalid(
                "slices.min_match_similarity",
                "must be between 0.0 and 1.0",
            ));
        }
        let weights = [s.degree_weight, s.role_weight, s.relation_weight];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(invalid("slices", "similarity weights must be non-negative"));
        }
        if (weights.iter().sum::<f64>() - 1.0).abs() > 1e-9 {
            return Err(invalid("slices", "similarity weights must sum to 1.0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

//! Analysis configuration
//!
//! Every knob has a default, so an empty (or absent) config file reproduces
//! the standard analysis: 3-digit correlations, epsilon 1e-8 pivots, k = 3
//! personas over 20 rounds, 5 MiB input limit.
//!
//! # Example TOML
//! ```toml
//! [correlation]
//! precision = 3
//! target = "assessment_score"
//!
//! [regression]
//! pivot_epsilon = 1e-8
//! strict_pivots = false
//!
//! [clustering]
//! k = 3
//! iterations = 20
//! seed = 42
//!
//! [input]
//! max_bytes = 5242880
//! ```

use crate::cluster::ClusterConfig;
use crate::dataset::Metric;
use crate::error::{AnalysisError, Result};
use crate::regression::RegressionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest accepted input file, matching the dashboard upload limit
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

/// Correlation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrelationConfig {
    /// Decimal digits kept in each coefficient
    pub precision: u32,
    /// Metric the ranking is computed against
    pub target: Metric,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            target: Metric::TARGET,
        }
    }
}

/// Input limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub max_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Complete configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub correlation: CorrelationConfig,
    pub regression: RegressionConfig,
    pub clustering: ClusterConfig,
    pub input: InputConfig,
}

impl AnalysisConfig {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has invalid TOML syntax or
    /// unknown keys, or fails validation.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.correlation.precision > 12 {
            return Err(AnalysisError::Config(format!(
                "correlation.precision must be <= 12, got {}",
                self.correlation.precision
            )));
        }
        if self.input.max_bytes == 0 {
            return Err(AnalysisError::Config(
                "input.max_bytes must be > 0".to_string(),
            ));
        }
        self.regression
            .validate()
            .map_err(|e| AnalysisError::Config(format!("regression: {}", e)))?;
        self.clustering
            .validate()
            .map_err(|e| AnalysisError::Config(format!("clustering: {}", e)))?;
        Ok(())
    }
}

// Configuration for closed-form regression
//
// The default posture favors availability: a singular normal-equation system
// still produces a (flagged) model. Strict mode turns that into an error.

use serde::{Deserialize, Serialize};

/// Configuration for the OLS regression engine
///
/// # Example
/// ```
/// use skillscope::regression::RegressionConfig;
///
/// let config = RegressionConfig::default();
/// assert_eq!(config.pivot_epsilon, 1e-8);
/// assert!(!config.strict_pivots);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegressionConfig {
    /// Value substituted for a numerically zero Gauss-Jordan pivot
    ///
    /// Default: 1e-8
    pub pivot_epsilon: f64,

    /// Fail with `SingularMatrix` instead of substituting `pivot_epsilon`
    ///
    /// Default: false
    pub strict_pivots: bool,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            pivot_epsilon: 1e-8,
            strict_pivots: false,
        }
    }
}

impl RegressionConfig {
    /// Strict configuration: singular systems are errors
    pub fn strict() -> Self {
        Self {
            strict_pivots: true,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.pivot_epsilon.is_finite() && self.pivot_epsilon > 0.0) {
            return Err(format!(
                "pivot_epsilon must be a positive finite number, got {}",
                self.pivot_epsilon
            ));
        }
        Ok(())
    }
}

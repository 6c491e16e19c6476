// Goodness-of-fit metrics computed on the training data itself
//
// There is no held-out set: R² and MAE describe how well the model explains
// the very records it was fitted on.

use crate::correlation::is_constant;
use serde::{Deserialize, Serialize};

/// In-sample fit quality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Fraction of target variance explained (1 − SSres/SStot)
    pub r2: f64,
    /// Mean absolute residual, always ≥ 0
    pub mae: f64,
}

impl FitQuality {
    /// Compare observed targets with fitted values
    ///
    /// A zero total sum of squares (constant target) is replaced by 1.
    pub fn compute(observed: &[f64], fitted: &[f64]) -> Self {
        debug_assert_eq!(observed.len(), fitted.len());
        let n = observed.len();
        if n == 0 {
            return Self { r2: 0.0, mae: 0.0 };
        }

        let mean = observed.iter().sum::<f64>() / n as f64;
        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        let mut abs_sum = 0.0;
        for (y, y_hat) in observed.iter().zip(fitted) {
            let residual = y - y_hat;
            ss_res += residual * residual;
            ss_tot += (y - mean) * (y - mean);
            abs_sum += residual.abs();
        }

        let ss_tot = if ss_tot == 0.0 || is_constant(observed) { 1.0 } else { ss_tot };
        Self {
            r2: 1.0 - ss_res / ss_tot,
            mae: abs_sum / n as f64,
        }
    }
}

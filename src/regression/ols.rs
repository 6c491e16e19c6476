// Ordinary least squares via the normal equations
//
// β = (XᵗX)⁻¹ · Xᵗy, with X carrying a leading column of ones for the
// intercept. The inverse comes from `Matrix::invert`, so a singular XᵗX
// (e.g. a feature that is constant or collinear) still yields a model,
// flagged through `substituted_pivots`.

use crate::dataset::{Dataset, Metric, StudentRecord};
use crate::error::{AnalysisError, Result};
use crate::linalg::Matrix;
use crate::regression::config::RegressionConfig;
use crate::regression::fit_quality::FitQuality;

/// Fitted linear model `target ≈ intercept + Σ βᵢ·featureᵢ`
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    pub target: Metric,
    pub intercept: f64,
    /// Coefficients in feature order
    pub coefficients: Vec<(Metric, f64)>,
    pub fit: FitQuality,
    /// Normal-equation pivot columns replaced by epsilon during inversion
    pub substituted_pivots: Vec<usize>,
    /// Number of records the model was fitted on
    pub records: usize,
}

impl RegressionModel {
    pub fn coefficient(&self, feature: Metric) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|(m, _)| *m == feature)
            .map(|(_, c)| *c)
    }

    /// True when the inverse was approximate (singular or collinear input)
    pub fn is_approximate(&self) -> bool {
        !self.substituted_pivots.is_empty()
    }

    pub fn predict(&self, record: &StudentRecord) -> f64 {
        self.coefficients
            .iter()
            .fold(self.intercept, |acc, (m, c)| acc + c * record.value(*m))
    }
}

/// Fit the assessment score on the standard regression features
pub fn fit_assessment_model(dataset: &Dataset, config: &RegressionConfig) -> Result<RegressionModel> {
    fit_ols(dataset, &Metric::REGRESSION_FEATURES, Metric::TARGET, config)
}

/// Fit `target` on `features` by closed-form OLS
///
/// # Errors
/// Returns `SingularMatrix` when `config.strict_pivots` is set and XᵗX has
/// a numerically zero pivot; `Dimension` if `features` contains `target`.
pub fn fit_ols(
    dataset: &Dataset,
    features: &[Metric],
    target: Metric,
    config: &RegressionConfig,
) -> Result<RegressionModel> {
    if features.contains(&target) {
        return Err(AnalysisError::Dimension(format!(
            "target `{}` cannot also be a feature",
            target
        )));
    }

    let params = features.len() + 1;
    if dataset.len() < params {
        tracing::warn!(
            records = dataset.len(),
            parameters = params,
            "regression is under-determined; coefficients may be unstable"
        );
    }

    let design: Vec<Vec<f64>> = dataset
        .records()
        .iter()
        .map(|r| {
            let mut row = Vec::with_capacity(params);
            row.push(1.0);
            row.extend(features.iter().map(|&m| r.value(m)));
            row
        })
        .collect();
    let x = Matrix::from_rows(design)?;
    let y_values = dataset.column(target);
    let y = Matrix::column(&y_values);

    let xt = x.transpose();
    let xtx = xt.matmul(&x)?;
    let xty = xt.matmul(&y)?;

    let inversion = xtx.invert(config.pivot_epsilon)?;
    if config.strict_pivots {
        if let Some(&column) = inversion.substituted_pivots.first() {
            return Err(AnalysisError::SingularMatrix { column });
        }
    }

    let beta = inversion.inverse.matmul(&xty)?.col_values(0);
    let fitted = x.matmul(&Matrix::column(&beta))?.col_values(0);
    let fit = FitQuality::compute(&y_values, &fitted);

    tracing::debug!(r2 = fit.r2, mae = fit.mae, "regression fitted");

    Ok(RegressionModel {
        target,
        intercept: beta[0],
        coefficients: features.iter().copied().zip(beta[1..].iter().copied()).collect(),
        fit,
        substituted_pivots: inversion.substituted_pivots,
        records: dataset.len(),
    })
}

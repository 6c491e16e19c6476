// Closed-form linear regression of the assessment score
//
// Fits assessment_score ≈ intercept + Σ βᵢ·featureᵢ over attention, focus,
// comprehension, retention and engagement_time by solving the normal
// equations with a Gauss-Jordan inverse.
//
// Key property: fully deterministic. The same records (in any order) give
// the same coefficients up to floating-point rounding.
//
// Known limitation: fewer records than parameters (6) is under-determined.
// It is logged, not rejected.

mod config;
mod fit_quality;
mod ols;

pub use config::RegressionConfig;
pub use fit_quality::FitQuality;
pub use ols::{fit_assessment_model, fit_ols, RegressionModel};

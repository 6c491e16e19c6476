//! Pearson correlation between student metrics
//!
//! Produces the full metric × metric matrix (self-pairs included) and a
//! ranking of every metric against a target, used by the dashboard's
//! "what drives the score" view.

use crate::dataset::{Dataset, Metric};

/// Pearson correlation coefficient of two equally long samples
///
/// A constant metric correlates 0 with everything, itself included. The
/// check is on the raw values: a mean like 0.1 is not representable, so the
/// deviations of a constant sample are rounding noise rather than zero.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n == 0 || is_constant(xs) || is_constant(ys) {
        return 0.0;
    }

    let mx = xs.iter().sum::<f64>() / n as f64;
    let my = ys.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut dx = 0.0;
    let mut dy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let vx = x - mx;
        let vy = y - my;
        num += vx * vy;
        dx += vx * vx;
        dy += vy * vy;
    }

    let denom = (dx * dy).sqrt();
    num / if denom == 0.0 { 1.0 } else { denom }
}

/// Every value equal to the first (vacuously true when empty)
pub fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|&v| v == values[0])
}

/// Round to a fixed number of decimal digits
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    // Normalize -0.0 so artifacts never print a signed zero
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Square, symmetric table of rounded correlation coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    metrics: Vec<Metric>,
    /// Row-major, `metrics.len()²` entries
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Metrics in row/column order
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    fn index_of(&self, metric: Metric) -> Option<usize> {
        self.metrics.iter().position(|&m| m == metric)
    }

    /// Coefficient for the ordered pair `(a, b)`
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i * self.metrics.len() + j])
    }

    /// One row of the matrix, paired with column metrics
    pub fn row(&self, metric: Metric) -> Option<Vec<(Metric, f64)>> {
        let i = self.index_of(metric)?;
        let n = self.metrics.len();
        Some(
            self.metrics
                .iter()
                .copied()
                .zip(self.values[i * n..(i + 1) * n].iter().copied())
                .collect(),
        )
    }

    /// Every metric other than `target`, sorted descending by correlation
    /// with `target`
    ///
    /// The sort is stable: ties keep matrix order.
    pub fn ranking_against(&self, target: Metric) -> Vec<(Metric, f64)> {
        let mut ranked: Vec<(Metric, f64)> = self
            .metrics
            .iter()
            .copied()
            .filter(|&m| m != target)
            .filter_map(|m| self.get(m, target).map(|v| (m, v)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Correlate every ordered pair of `metrics` over the dataset
///
/// Each coefficient is rounded to `precision` decimal digits.
pub fn correlation_matrix(dataset: &Dataset, metrics: &[Metric], precision: u32) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = metrics.iter().map(|&m| dataset.column(m)).collect();
    let n = metrics.len();

    let mut values = vec![0.0; n * n];
    for i in 0..n {
        for j in i..n {
            let r = round_to(pearson(&columns[i], &columns[j]), precision);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    for (metric, column) in metrics.iter().zip(&columns) {
        if is_constant(column) {
            tracing::warn!(%metric, "metric is constant across the dataset; correlations fall back to 0");
        }
    }

    CorrelationMatrix {
        metrics: metrics.to_vec(),
        values,
    }
}

//! Cohort summary statistics
//!
//! Headline numbers for the dataset as a whole: record and class counts plus
//! descriptive statistics per metric. Location statistics are exact `f64`;
//! the spread reduction goes through Trueno.

use crate::dataset::{Dataset, Metric};
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64, // P50
    pub p25: f64,
    pub p75: f64,
    /// Mean rounded to the nearest integer, as shown on KPI cards
    pub kpi: i64,
}

/// Cohort-level summary of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub class_count: usize,
    pub classes: Vec<String>,
    pub metrics: Vec<MetricSummary>,
}

impl DatasetSummary {
    /// Summarize every metric in correlation order
    pub fn compute(dataset: &Dataset) -> Self {
        let classes: Vec<String> = dataset.classes().into_iter().map(String::from).collect();
        let metrics = Metric::CORRELATION
            .iter()
            .map(|&m| summarize_metric(m, &dataset.column(m)))
            .collect();

        Self {
            records: dataset.len(),
            class_count: classes.len(),
            classes,
            metrics,
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.iter().find(|s| s.metric == metric)
    }

    /// Render as a fixed-width table
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "Students: {}   Classes: {}\n\n",
            self.records, self.class_count
        ));
        report.push_str("metric                 mean   stddev      min      max   median\n");
        report.push_str("---------------- -------- -------- -------- -------- --------\n");
        for s in &self.metrics {
            report.push_str(&format!(
                "{:<16} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}\n",
                s.metric.name(),
                s.mean,
                s.stddev,
                s.min,
                s.max,
                s.median
            ));
        }
        report
    }
}

fn summarize_metric(metric: Metric, values: &[f64]) -> MetricSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = shifted_mean(values);

    // Trueno reduces in f32; centering keeps its error relative to the spread
    // rather than to the magnitude of the scores
    let deviations: Vec<f32> = values.iter().map(|&v| (v - mean) as f32).collect();
    let variance = trueno::Vector::from_slice(&deviations).variance().unwrap_or(0.0);
    let stddev = f64::from(variance.max(0.0)).sqrt();

    MetricSummary {
        metric,
        mean,
        stddev,
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        median: calculate_percentile(&sorted, 50.0),
        p25: calculate_percentile(&sorted, 25.0),
        p75: calculate_percentile(&sorted, 75.0),
        kpi: mean.round() as i64,
    }
}

/// Mean computed around the first value, exact for a constant column
fn shifted_mean(values: &[f64]) -> f64 {
    let Some(&origin) = values.first() else {
        return 0.0;
    };
    let offset: f64 = values.iter().map(|v| v - origin).sum();
    origin + offset / values.len() as f64
}

/// Linear-interpolated percentile of sorted data
fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

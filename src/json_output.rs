//! JSON result documents
//!
//! Shapes consumed by the dashboard:
//! - `correlations.json`: `{matrix, sorted_vs_score}`
//! - `model.json`: `{coefficients, intercept, metrics: {r2, mae}}`
//! - `personas.json`: `{personas: [{student_id, name, class, persona}], centroids}`
//!
//! Every document also carries a `provenance` object that consumers may
//! ignore. Object keys keep metric order (or ranking order).

use crate::cluster::PersonaClustering;
use crate::correlation::CorrelationMatrix;
use crate::dataset::Metric;
use crate::regression::RegressionModel;
use crate::summary::DatasetSummary;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object keyed by metric name, in iteration order
///
/// `serde_json` is built with `preserve_order`, so the map keeps the order
/// entries are inserted in.
pub fn metric_object<V, I>(entries: I) -> Map<String, Value>
where
    V: Into<Value>,
    I: IntoIterator<Item = (Metric, V)>,
{
    entries
        .into_iter()
        .map(|(metric, value)| (metric.name().to_string(), value.into()))
        .collect()
}

/// Where and when a document was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub tool: String,
    pub version: String,
    /// Seconds since the Unix epoch
    pub generated_at: u64,
    /// SHA-256 of the input file, when the dataset came from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_sha256: Option<String>,
    pub records: usize,
}

impl Provenance {
    pub fn new(dataset_sha256: Option<String>, records: usize) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: unix_timestamp(),
            dataset_sha256,
            records,
        }
    }
}

/// Seconds since the Unix epoch
fn unix_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationProvenance {
    #[serde(flatten)]
    pub source: Provenance,
    /// Metric `sorted_vs_score` is ranked against
    pub target: Metric,
    pub precision: u32,
}

/// `correlations.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationDocument {
    pub matrix: Map<String, Value>,
    pub sorted_vs_score: Map<String, Value>,
    pub provenance: CorrelationProvenance,
}

impl CorrelationDocument {
    pub fn new(matrix: &CorrelationMatrix, target: Metric, precision: u32, source: Provenance) -> Self {
        let rows = matrix
            .metrics()
            .iter()
            .filter_map(|&m| matrix.row(m).map(|row| (m, Value::Object(metric_object(row)))));

        Self {
            matrix: metric_object(rows),
            sorted_vs_score: metric_object(matrix.ranking_against(target)),
            provenance: CorrelationProvenance {
                source,
                target,
                precision,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub r2: f64,
    pub mae: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProvenance {
    #[serde(flatten)]
    pub source: Provenance,
    /// True when a zero pivot was replaced by epsilon during inversion
    pub approximate: bool,
    pub substituted_pivots: Vec<usize>,
    pub pivot_epsilon: f64,
}

/// `model.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub coefficients: Map<String, Value>,
    pub intercept: f64,
    pub metrics: FitMetrics,
    pub provenance: ModelProvenance,
}

impl ModelDocument {
    pub fn new(model: &RegressionModel, pivot_epsilon: f64, source: Provenance) -> Self {
        Self {
            coefficients: metric_object(model.coefficients.iter().copied()),
            intercept: model.intercept,
            metrics: FitMetrics {
                r2: model.fit.r2,
                mae: model.fit.mae,
            },
            provenance: ModelProvenance {
                source,
                approximate: model.is_approximate(),
                substituted_pivots: model.substituted_pivots.clone(),
                pivot_epsilon,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaEntry {
    pub student_id: i64,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub persona: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProvenance {
    #[serde(flatten)]
    pub source: Provenance,
    pub k: usize,
    pub iterations: usize,
    /// Centroid sampling seed; null when seeded from entropy
    pub seed: Option<u64>,
    pub empty_personas: Vec<usize>,
}

/// `personas.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDocument {
    pub personas: Vec<PersonaEntry>,
    pub centroids: Vec<Map<String, Value>>,
    pub provenance: PersonaProvenance,
}

impl PersonaDocument {
    pub fn new(clustering: &PersonaClustering, source: Provenance) -> Self {
        let personas = clustering
            .assignments
            .iter()
            .map(|a| PersonaEntry {
                student_id: a.student_id,
                name: a.name.clone(),
                class_name: a.class_name.clone(),
                persona: a.persona,
            })
            .collect();

        let centroids = (0..clustering.centroids.len())
            .filter_map(|p| clustering.centroid(p))
            .map(metric_object)
            .collect();

        Self {
            personas,
            centroids,
            provenance: PersonaProvenance {
                source,
                k: clustering.k,
                iterations: clustering.iterations,
                seed: clustering.seed,
                empty_personas: clustering.empty_personas.clone(),
            },
        }
    }
}

/// `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    #[serde(flatten)]
    pub summary: DatasetSummary,
    pub provenance: Provenance,
}

/// Root JSON output structure (all documents, for `--format json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub correlations: CorrelationDocument,
    pub model: ModelDocument,
    pub personas: PersonaDocument,
    pub summary: SummaryDocument,
}

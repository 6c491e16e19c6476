//! One full analysis run
//!
//! Load once, then run correlation, regression, clustering and the cohort
//! summary over the same read-only snapshot. Engines are independent; none
//! reads another's output.

use crate::cluster::{assign_personas, seeded_rng, PersonaClustering};
use crate::config::AnalysisConfig;
use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::dataset::{Dataset, Metric};
use crate::error::{AnalysisError, Result};
use crate::json_output::{
    CorrelationDocument, JsonOutput, ModelDocument, PersonaDocument, Provenance, SummaryDocument,
};
use crate::regression::{fit_assessment_model, RegressionModel};
use crate::summary::DatasetSummary;
use rand::Rng;

/// Everything one run produces, before serialization
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub correlations: CorrelationMatrix,
    /// Metrics ranked by correlation with `config.correlation.target`
    pub ranking: Vec<(Metric, f64)>,
    pub model: RegressionModel,
    pub personas: PersonaClustering,
    pub summary: DatasetSummary,
    pub config: AnalysisConfig,
}

/// Run every engine, seeding clustering from `config.clustering.seed`
pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let mut rng = seeded_rng(config.clustering.seed);
    analyze_with_rng(dataset, config, &mut rng)
}

/// Run every engine with an injected random source for centroid seeding
///
/// # Errors
/// Returns error if the configuration is invalid or strict pivot mode meets
/// a singular system. No partial report is returned.
#[tracing::instrument(skip_all, fields(records = dataset.len()))]
pub fn analyze_with_rng<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<AnalysisReport> {
    config.validate()?;

    let correlations = correlation_matrix(dataset, &Metric::CORRELATION, config.correlation.precision);
    let ranking = correlations.ranking_against(config.correlation.target);
    tracing::info!(top = ?ranking.first(), "correlations computed");

    let model = fit_assessment_model(dataset, &config.regression)?;
    tracing::info!(
        r2 = model.fit.r2,
        mae = model.fit.mae,
        approximate = model.is_approximate(),
        "regression fitted"
    );

    let personas = assign_personas(dataset, &config.clustering, rng)?;
    tracing::info!(k = personas.k, iterations = personas.iterations, "personas assigned");

    let summary = DatasetSummary::compute(dataset);

    Ok(AnalysisReport {
        correlations,
        ranking,
        model,
        personas,
        summary,
        config: config.clone(),
    })
}

impl AnalysisReport {
    /// Build all result documents
    ///
    /// `dataset_sha256` is the input file fingerprint, if any.
    pub fn to_json_output(&self, dataset_sha256: Option<&str>) -> JsonOutput {
        let source = Provenance::new(dataset_sha256.map(String::from), self.summary.records);

        JsonOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "skillscope-json-v1".to_string(),
            correlations: CorrelationDocument::new(
                &self.correlations,
                self.config.correlation.target,
                self.config.correlation.precision,
                source.clone(),
            ),
            model: ModelDocument::new(&self.model, self.config.regression.pivot_epsilon, source.clone()),
            personas: PersonaDocument::new(&self.personas, source.clone()),
            summary: SummaryDocument {
                summary: self.summary.clone(),
                provenance: source,
            },
        }
    }

    /// Render the full JSON output as a pretty-printed string
    pub fn to_json_string(&self, dataset_sha256: Option<&str>) -> Result<String> {
        serde_json::to_string_pretty(&self.to_json_output(dataset_sha256)).map_err(AnalysisError::from)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Cohort Summary ===\n");
        report.push_str(&self.summary.to_report_string());
        report.push('\n');

        report.push_str(&format!(
            "=== Correlation with {} ===\n",
            self.config.correlation.target
        ));
        for (metric, r) in &self.ranking {
            report.push_str(&format!("  {:<16} {:>7.3}\n", metric.name(), r));
        }
        report.push('\n');

        report.push_str("=== Regression Model ===\n");
        report.push_str(&format!("  {:<16} {:>10.4}\n", "intercept", self.model.intercept));
        for (metric, c) in &self.model.coefficients {
            report.push_str(&format!("  {:<16} {:>10.4}\n", metric.name(), c));
        }
        report.push_str(&format!(
            "  R² = {:.4}   MAE = {:.4}\n",
            self.model.fit.r2, self.model.fit.mae
        ));
        if self.model.is_approximate() {
            report.push_str(&format!(
                "  ⚠️  Approximate: zero pivots replaced by epsilon in columns {:?}\n",
                self.model.substituted_pivots
            ));
        }
        report.push('\n');

        report.push_str(&format!(
            "=== Personas (k={}, {} iterations) ===\n",
            self.personas.k, self.personas.iterations
        ));
        let mut sizes = vec![0usize; self.personas.k];
        for a in &self.personas.assignments {
            sizes[a.persona] += 1;
        }
        for (persona, size) in sizes.iter().enumerate() {
            let centroid = self
                .personas
                .centroid(persona)
                .unwrap_or_default()
                .iter()
                .map(|(m, v)| format!("{}={:.1}", m.name(), v))
                .collect::<Vec<_>>()
                .join(" ");
            report.push_str(&format!("  persona {}: {:>4} students  {}\n", persona, size, centroid));
        }

        report
    }
}

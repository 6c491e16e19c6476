use crate::cluster::config::ClusterConfig;
use crate::cluster::kmeans::{kmeans, KMeansResult};
use crate::dataset::{Dataset, Metric};
use crate::error::{AnalysisError, Result};
use rand::Rng;

/// Persona label for one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaAssignment {
    pub student_id: i64,
    pub name: String,
    pub class_name: String,
    pub persona: usize,
}

/// Persona clustering of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaClustering {
    /// Features the centroids are expressed in, in order
    pub features: Vec<Metric>,
    /// One entry per record, in dataset order
    pub assignments: Vec<PersonaAssignment>,
    /// Exactly `k` centroids
    pub centroids: Vec<Vec<f64>>,
    /// Personas with no members after the final round
    pub empty_personas: Vec<usize>,
    pub k: usize,
    pub iterations: usize,
    /// Seed used for centroid sampling, if reproducible
    pub seed: Option<u64>,
}

impl PersonaClustering {
    pub fn persona_of(&self, student_id: i64) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.student_id == student_id)
            .map(|a| a.persona)
    }

    /// Centroid as `(feature, mean)` pairs
    pub fn centroid(&self, persona: usize) -> Option<Vec<(Metric, f64)>> {
        self.centroids
            .get(persona)
            .map(|c| self.features.iter().copied().zip(c.iter().copied()).collect())
    }
}

/// Cluster students into `config.k` personas over the standard cluster features
///
/// `rng` drives centroid seeding only; the dataset is never mutated.
pub fn assign_personas<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &ClusterConfig,
    rng: &mut R,
) -> Result<PersonaClustering> {
    config.validate().map_err(AnalysisError::Config)?;

    let features = Metric::CLUSTER_FEATURES.to_vec();
    let points: Vec<Vec<f64>> = dataset
        .records()
        .iter()
        .map(|r| r.features(&features))
        .collect();

    let result: KMeansResult = kmeans(&points, config.k, config.iterations, rng);
    let empty_personas = result.empty_clusters();
    if !empty_personas.is_empty() {
        tracing::warn!(?empty_personas, "personas without members; centroids set to zero");
    }
    tracing::debug!(seed_indices = ?result.seed_indices, sizes = ?result.cluster_sizes(), "personas assigned");

    let assignments = dataset
        .records()
        .iter()
        .zip(&result.labels)
        .map(|(r, &persona)| PersonaAssignment {
            student_id: r.student_id,
            name: r.name.clone(),
            class_name: r.class_name.clone(),
            persona,
        })
        .collect();

    Ok(PersonaClustering {
        features,
        assignments,
        centroids: result.centroids,
        empty_personas,
        k: config.k,
        iterations: config.iterations,
        seed: config.seed,
    })
}

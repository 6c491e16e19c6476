// Configuration for persona clustering

use serde::{Deserialize, Serialize};

/// Configuration for k-means persona assignment
///
/// # Example
/// ```
/// use skillscope::cluster::ClusterConfig;
///
/// let config = ClusterConfig::default();
/// assert_eq!(config.k, 3);
/// assert_eq!(config.iterations, 20);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// Number of personas (centroids)
    pub k: usize,

    /// Number of assign/update rounds; always run in full
    pub iterations: usize,

    /// Seed for centroid sampling; `None` draws from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 3,
            iterations: 20,
            seed: None,
        }
    }
}

impl ClusterConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.k == 0 {
            return Err("k must be >= 1".to_string());
        }
        if self.iterations == 0 {
            return Err("iterations must be >= 1".to_string());
        }
        Ok(())
    }
}

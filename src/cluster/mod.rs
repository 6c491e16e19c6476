// K-means persona clustering
//
// Partitions students into k personas over attention, focus, comprehension
// and retention. Engagement time and the assessment score never enter the
// distance.
//
// Behavior that callers rely on:
// - centroids are seeded by sampling records with replacement from an
//   injected RNG (see `seeding`)
// - exactly `iterations` rounds run; there is no early stopping
// - ties go to the lowest centroid index
// - an empty cluster's centroid is the zero vector

mod config;
mod kmeans;
mod persona;
mod seeding;

pub use config::ClusterConfig;
pub use kmeans::{kmeans, kmeans_from, nearest_centroid, squared_distance, KMeansResult};
pub use persona::{assign_personas, PersonaAssignment, PersonaClustering};
pub use seeding::{sample_indices, seeded_rng};

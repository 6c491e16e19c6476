//! Skillscope - student skill analytics
//!
//! This library turns a table of per-student skill metrics into three
//! dashboard artifacts: a Pearson correlation matrix, an OLS model of the
//! assessment score, and k-means learner personas.

pub mod artifacts;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod correlation;
pub mod csv_output;
pub mod dataset;
pub mod error;
pub mod json_output;
pub mod linalg;
pub mod pipeline;
pub mod regression;
pub mod summary;

pub use error::{AnalysisError, DatasetError, Result};

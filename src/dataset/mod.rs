// Student dataset loading and validation
//
// Engines assume every numeric field is finite and every student_id is
// unique. Those invariants are checked once here, at construction, so the
// correlation, regression and clustering code never has to.

mod loader;
mod record;

pub use loader::{load_path, parse_csv, parse_json, InputFormat, LoadedDataset};
pub use record::{Metric, StudentRecord};

use crate::error::DatasetError;
use std::collections::HashSet;

/// Validated, immutable snapshot of student records
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<StudentRecord>,
}

impl Dataset {
    /// Validate and wrap records
    ///
    /// # Errors
    /// Returns error if `records` is empty, contains a duplicate
    /// `student_id`, or any numeric field is NaN or infinite.
    pub fn new(records: Vec<StudentRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.student_id) {
                return Err(DatasetError::DuplicateId(record.student_id));
            }
            for metric in Metric::CORRELATION {
                let value = record.value(metric);
                if !value.is_finite() {
                    return Err(DatasetError::NonFinite {
                        student_id: record.student_id,
                        field: metric.name().to_string(),
                        value,
                    });
                }
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one metric, in record order
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.value(metric)).collect()
    }

    /// Distinct class names in first-seen order
    pub fn classes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.class_name.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

//! CSV output for spreadsheets and the dashboard loader
//!
//! The dataset export uses the exact input header, so an exported file loads
//! back unchanged.

use crate::cluster::PersonaClustering;
use crate::dataset::{Dataset, StudentRecord};
use csv::{Terminator, WriterBuilder};

/// Header of the persona assignment export
pub const PERSONA_HEADER: [&str; 4] = ["student_id", "name", "class", "persona"];

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvOutput {
    /// Create a formatter with the given header row
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Formatter pre-filled with every dataset record
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut output = Self::new(&StudentRecord::HEADER);
        for r in dataset.records() {
            output.add_row(vec![
                r.student_id.to_string(),
                r.name.clone(),
                r.class_name.clone(),
                r.attention.to_string(),
                r.focus.to_string(),
                r.comprehension.to_string(),
                r.retention.to_string(),
                r.engagement_time.to_string(),
                r.assessment_score.to_string(),
            ]);
        }
        output
    }

    /// Formatter pre-filled with persona assignments in dataset order
    pub fn from_personas(clustering: &PersonaClustering) -> Self {
        let mut output = Self::new(&PERSONA_HEADER);
        for a in &clustering.assignments {
            output.add_row(vec![
                a.student_id.to_string(),
                a.name.clone(),
                a.class_name.clone(),
                a.persona.to_string(),
            ]);
        }
        output
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generate CSV output as string
    ///
    /// Cells containing a comma, quote or line break are quoted with doubled
    /// quotes; rows end with `\n`.
    pub fn to_csv(&self) -> csv::Result<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

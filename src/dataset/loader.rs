use crate::dataset::{Dataset, StudentRecord};
use crate::error::DatasetError;
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Accepted dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// JSON array of student records
    Json,
    /// Comma-separated values with the exact student header
    Csv,
}

impl InputFormat {
    /// Detect format from file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(DatasetError::UnsupportedFormat(ext)),
        }
    }
}

/// Dataset together with the fingerprint of the bytes it was parsed from
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// Hex-encoded SHA-256 of the raw input
    pub sha256: String,
    pub format: InputFormat,
}

/// Read, size-check and parse a dataset file
///
/// # Errors
/// Returns error if the file is missing, larger than `max_bytes`, not valid
/// UTF-8, or fails schema validation.
pub fn load_path(
    path: &Path,
    format: Option<InputFormat>,
    max_bytes: u64,
) -> Result<LoadedDataset, DatasetError> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::from_path(path)?,
    };

    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(DatasetError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path)?;
    let sha256 = hex::encode(Sha256::digest(&bytes));
    let text = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let dataset = match format {
        InputFormat::Json => parse_json(&text)?,
        InputFormat::Csv => parse_csv(&text)?,
    };

    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        ?format,
        "dataset loaded"
    );

    Ok(LoadedDataset {
        dataset,
        sha256,
        format,
    })
}

/// Parse a JSON array of student records
pub fn parse_json(text: &str) -> Result<Dataset, DatasetError> {
    let records: Vec<StudentRecord> = serde_json::from_str(text)?;
    Dataset::new(records)
}

/// Parse CSV text with the exact student header
///
/// Any line ending is accepted, blank rows are skipped and quoted cells may
/// contain commas, doubled quotes or newlines. Header cells are compared
/// after trimming.
pub fn parse_csv(text: &str) -> Result<Dataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = reader
        .records()
        .filter(|row| row.as_ref().map_or(true, |r| r.iter().any(|c| !c.trim().is_empty())));

    let header = rows.next().ok_or(DatasetError::Empty)??;
    let header: Vec<&str> = header.iter().map(str::trim).collect();
    if header != StudentRecord::HEADER {
        return Err(DatasetError::InvalidHeader {
            expected: StudentRecord::HEADER.join(","),
            found: header.join(","),
        });
    }

    let mut lines = LineCounter::new(text);
    let records = rows
        .map(|row| {
            let row = row?;
            let line = lines.line_at(row.position().map_or(0, |p| p.byte() as usize));
            parse_record(line, &row)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Dataset::new(records)
}

/// 1-based line numbers for record offsets, advanced in input order
///
/// A record's position points just past the previous record, so skipped
/// blank lines sit between it and the first cell.
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, record_start: usize) -> usize {
        let mut end = record_start.min(self.bytes.len());
        while matches!(self.bytes.get(end), Some(&(b'\r' | b'\n'))) {
            end += 1;
        }
        while self.offset < end {
            match self.bytes[self.offset] {
                b'\n' => self.line += 1,
                b'\r' if self.bytes.get(self.offset + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
            self.offset += 1;
        }
        self.line
    }
}

fn parse_record(line: usize, cells: &StringRecord) -> Result<StudentRecord, DatasetError> {
    if cells.len() != StudentRecord::HEADER.len() {
        return Err(DatasetError::FieldCount {
            line,
            expected: StudentRecord::HEADER.len(),
            found: cells.len(),
        });
    }

    let number = |idx: usize| -> Result<f64, DatasetError> {
        let raw = cells[idx].trim();
        raw.parse::<f64>().map_err(|_| DatasetError::NotNumeric {
            line,
            field: StudentRecord::HEADER[idx].to_string(),
            value: raw.to_string(),
        })
    };

    let raw_id = cells[0].trim();
    let student_id = raw_id
        .parse::<i64>()
        .map_err(|_| DatasetError::NotNumeric {
            line,
            field: "student_id".to_string(),
            value: raw_id.to_string(),
        })?;

    Ok(StudentRecord {
        student_id,
        name: cells[1].to_string(),
        class_name: cells[2].to_string(),
        attention: number(3)?,
        focus: number(4)?,
        comprehension: number(5)?,
        retention: number(6)?,
        engagement_time: number(7)?,
        assessment_score: number(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("data/students.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("students.json")).unwrap(),
            InputFormat::Json
        );
        assert!(InputFormat::from_path(Path::new("students.xlsx")).is_err());
    }

    #[test]
    fn test_line_counter_skips_blank_lines_and_mixed_endings() {
        let text = "h\n\r\n\nx\ry\r\nz";
        let mut lines = LineCounter::new(text);
        assert_eq!(lines.line_at(0), 1);
        assert_eq!(lines.line_at(2), 4);
        assert_eq!(lines.line_at(7), 5);
        assert_eq!(lines.line_at(9), 6);
    }

    #[test]
    fn test_parse_record_reports_field_count() {
        let row = StringRecord::from(vec!["1", "Ada", "7A"]);
        match parse_record(4, &row) {
            Err(DatasetError::FieldCount { line, found, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(found, 3);
            }
            other => panic!("Expected FieldCount, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_record_keeps_text_cells_verbatim() {
        let row = StringRecord::from(vec![" 7 ", " Ada ", "7A", "1", "2", "3", "4", "5", " 6 "]);
        let record = parse_record(2, &row).unwrap();
        assert_eq!(record.student_id, 7);
        assert_eq!(record.name, " Ada ");
        assert_eq!(record.assessment_score, 6.0);
    }
}

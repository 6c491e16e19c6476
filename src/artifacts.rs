//! Result artifact writer
//!
//! All documents are rendered before anything touches the output directory,
//! and each file is written to a `.tmp` sibling then renamed. A failed run
//! never leaves a half-written artifact behind.

use crate::error::Result;
use crate::json_output::JsonOutput;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CORRELATIONS_FILE: &str = "correlations.json";
pub const MODEL_FILE: &str = "model.json";
pub const PERSONAS_FILE: &str = "personas.json";
pub const SUMMARY_FILE: &str = "summary.json";

/// Rendered artifact awaiting a write
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub contents: String,
}

impl Artifact {
    fn render<T: Serialize>(file_name: &'static str, document: &T) -> Result<Self> {
        let mut contents = serde_json::to_string_pretty(document)?;
        contents.push('\n');
        Ok(Self {
            file_name,
            contents,
        })
    }
}

/// Render every document of a run
pub fn render_artifacts(output: &JsonOutput) -> Result<Vec<Artifact>> {
    Ok(vec![
        Artifact::render(CORRELATIONS_FILE, &output.correlations)?,
        Artifact::render(MODEL_FILE, &output.model)?,
        Artifact::render(PERSONAS_FILE, &output.personas)?,
        Artifact::render(SUMMARY_FILE, &output.summary)?,
    ])
}

/// Write rendered artifacts into `out_dir`, creating it if needed
///
/// Returns the final paths in write order.
pub fn write_artifacts(out_dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = out_dir.join(artifact.file_name);
        write_atomic(&path, &artifact.contents)?;
        tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), "artifact written");
        written.push(path);
    }

    Ok(written)
}

/// Render and write all documents of a run
pub fn save_all(out_dir: &Path, output: &JsonOutput) -> Result<Vec<PathBuf>> {
    let artifacts = render_artifacts(output)?;
    write_artifacts(out_dir, &artifacts)
}

/// Write `contents` to a temporary sibling, then rename over `path`
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

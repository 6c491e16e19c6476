//! CLI argument parsing for skillscope

use crate::config::AnalysisConfig;
use crate::dataset::InputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run report on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "skillscope")]
#[command(version)]
#[command(
    about = "Student skill analytics: correlations, score model and learner personas",
    long_about = None
)]
pub struct Cli {
    /// Student dataset (JSON array or CSV with the standard header)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for correlations.json, model.json, personas.json and summary.json
    #[arg(short, long = "out-dir", value_name = "DIR", default_value = "analysis")]
    pub out_dir: PathBuf,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for persona centroid sampling (reproducible runs)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of personas (default: 3)
    #[arg(short = 'k', long = "clusters", value_name = "K")]
    pub clusters: Option<usize>,

    /// Clustering rounds (default: 20)
    #[arg(long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Fail instead of substituting epsilon for a zero pivot
    #[arg(long = "strict-pivots")]
    pub strict_pivots: bool,

    /// Input format (detected from the file extension when omitted)
    #[arg(long = "input-format", value_enum, value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Report format on stdout (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the validated dataset as CSV
    #[arg(long = "export-csv", value_name = "FILE")]
    pub export_csv: Option<PathBuf>,

    /// Also write persona assignments as CSV
    #[arg(long = "personas-csv", value_name = "FILE")]
    pub personas_csv: Option<PathBuf>,

    /// Print the report without writing artifact files
    #[arg(long = "no-write")]
    pub no_write: bool,

    /// Enable debug tracing on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(seed) = self.seed {
            config.clustering.seed = Some(seed);
        }
        if let Some(k) = self.clusters {
            config.clustering.k = k;
        }
        if let Some(iterations) = self.iterations {
            config.clustering.iterations = iterations;
        }
        if self.strict_pivots {
            config.regression.strict_pivots = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_input() {
        let cli = Cli::parse_from(["skillscope", "students.json"]);
        assert_eq!(cli.input, PathBuf::from("students.json"));
        assert_eq!(cli.out_dir, PathBuf::from("analysis"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.input_format.is_none());
        assert!(!cli.no_write);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["skillscope"]).is_err());
    }

    #[test]
    fn test_cli_out_dir_flag() {
        let cli = Cli::parse_from(["skillscope", "-o", "/tmp/out", "s.csv"]);
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["skillscope", "--format", "json", "s.csv"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_input_format_override() {
        let cli = Cli::parse_from(["skillscope", "--input-format", "csv", "data.txt"]);
        assert_eq!(cli.input_format, Some(InputFormat::Csv));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["skillscope", "--format", "xml", "s.csv"]).is_err());
    }

    #[test]
    fn test_cli_overrides_default_config() {
        let cli = Cli::parse_from([
            "skillscope",
            "--seed",
            "7",
            "-k",
            "4",
            "--iterations",
            "10",
            "--strict-pivots",
            "s.json",
        ]);
        let mut config = AnalysisConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.clustering.seed, Some(7));
        assert_eq!(config.clustering.k, 4);
        assert_eq!(config.clustering.iterations, 10);
        assert!(config.regression.strict_pivots);
    }

    #[test]
    fn test_cli_without_overrides_keeps_config() {
        let cli = Cli::parse_from(["skillscope", "s.json"]);
        let mut config = AnalysisConfig::default();
        config.clustering.seed = Some(99);
        cli.apply_overrides(&mut config);
        assert_eq!(config.clustering.seed, Some(99));
        assert_eq!(config.clustering.k, 3);
        assert!(!config.regression.strict_pivots);
    }

    #[test]
    fn test_cli_csv_exports() {
        let cli = Cli::parse_from([
            "skillscope",
            "--export-csv",
            "clean.csv",
            "--personas-csv",
            "p.csv",
            "--no-write",
            "s.json",
        ]);
        assert_eq!(cli.export_csv, Some(PathBuf::from("clean.csv")));
        assert_eq!(cli.personas_csv, Some(PathBuf::from("p.csv")));
        assert!(cli.no_write);
    }
}

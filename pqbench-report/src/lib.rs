#![warn(missing_docs)]
//! pqbench Report - Result Export
//!
//! Renders completed result sets and size reports:
//! - JSON (fixed schema, microseconds with two decimals)
//! - CSV (one row per operation)
//! - Human-readable terminal tables

mod export;
mod human;
mod paths;
mod sizes;

pub use export::{
    CSV_HEADER, OperationReport, ResultSetReport, generate_csv_report, generate_json_report,
    write_csv, write_json,
};
pub use human::{format_human_output, format_size_tables};
pub use paths::per_algorithm_path;
pub use sizes::{
    DsaSizeEntry, KemSizeEntry, SizeReport, write_size_report_csv, write_size_report_json,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON file per algorithm
    Json,
    /// CSV file per algorithm
    Csv,
    /// Both JSON and CSV
    Both,
    /// Terminal table only
    #[default]
    Human,
}

impl OutputFormat {
    /// Whether JSON files are produced
    pub fn writes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    /// Whether CSV files are produced
    pub fn writes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "both" | "all" => Ok(OutputFormat::Both),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("both".parse::<OutputFormat>(), Ok(OutputFormat::Both));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_targets() {
        assert!(OutputFormat::Both.writes_json() && OutputFormat::Both.writes_csv());
        assert!(OutputFormat::Json.writes_json() && !OutputFormat::Json.writes_csv());
        assert!(!OutputFormat::Human.writes_json() && !OutputFormat::Human.writes_csv());
    }
}

//! Analyze command implementation
//!
//! This module implements the `analyze` command, which traverses a JSON
//! document and emits a schema report: every path with up to N masked
//! sample fingerprints. The report is safe to share and is the input for
//! the `classify` command.

use super::{read_json_input, write_output};
use crate::config::load_config_or_default;
use crate::core::SchemaAnalyzer;
use clap::Args;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input JSON document (use `-` for stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file for the schema report (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum distinct sample fingerprints kept per path
    #[arg(long)]
    pub sample_cap: Option<usize>,

    /// Maximum nesting depth before the document is rejected
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting analyze command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let sample_cap = self.sample_cap.unwrap_or(config.analysis.sample_cap);
        let max_depth = self.max_depth.unwrap_or(config.analysis.max_depth);

        let document = match read_json_input(&self.input) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input document");
                eprintln!("Error: {e}");
                return Ok(5);
            }
        };

        let analyzer = SchemaAnalyzer::new()
            .with_sample_cap(sample_cap)
            .with_max_depth(max_depth);

        let report = match analyzer.analyze(&document) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Analysis failed");
                eprintln!("Analysis failed: {e}");
                return Ok(5);
            }
        };

        tracing::info!(path_count = report.len(), "Analysis complete");

        let rendered = serde_json::to_string_pretty(&report)?;
        write_output(self.output.as_deref(), &rendered)?;

        Ok(0)
    }
}

//! Classify command implementation
//!
//! This module implements the `classify` command, which sends a schema
//! report to an OpenAI-compatible endpoint and writes back the resulting
//! PII config (path to label mapping).

use super::{read_json_input, write_output};
use crate::classifier::{OpenAiClassifier, PathClassifier};
use crate::config::load_config_or_default;
use crate::core::SchemaReport;
use clap::Args;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Input schema report produced by `analyze` (use `-` for stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file for the PII config (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting classify command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(model) = &self.model {
            tracing::info!(model = %model, "Overriding classifier model from CLI");
            config.classifier.model = model.clone();
        }

        if config.classifier.api_key.is_none() {
            eprintln!(
                "Configuration error: no classifier API key. \
                 Set SHROUD_CLASSIFIER_API_KEY or [classifier].api_key in {config_path}"
            );
            return Ok(2);
        }

        let report_value = match read_json_input(&self.input) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read schema report");
                eprintln!("Error: {e}");
                return Ok(5);
            }
        };

        let report: SchemaReport = match serde_json::from_value(report_value) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: {} is not a schema report: {e}", self.input);
                return Ok(5);
            }
        };

        let classifier = match OpenAiClassifier::new(config.classifier) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        eprintln!(
            "Classifying {} paths with {}...",
            report.len(),
            classifier.model()
        );

        let pii_config = match classifier.classify(&report).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Classification failed");
                eprintln!("Classification failed: {e}");
                return Ok(5);
            }
        };

        tracing::info!(labeled_paths = pii_config.len(), "Classify command complete");

        let rendered = serde_json::to_string_pretty(&pii_config)?;
        write_output(self.output.as_deref(), &rendered)?;

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_classify_without_api_key_is_config_error() {
        let mut input = NamedTempFile::new().unwrap();
        write!(input, r#"[{{"path": "name", "samples": ["LLLL"]}}]"#).unwrap();

        let args = ClassifyArgs {
            input: input.path().to_str().unwrap().to_string(),
            output: None,
            model: None,
        };

        // No config file and no SHROUD_CLASSIFIER_API_KEY in the environment
        std::env::remove_var("SHROUD_CLASSIFIER_API_KEY");
        let exit_code = args.execute("/nonexistent/shroud.toml").await.unwrap();
        assert_eq!(exit_code, 2);
    }
}

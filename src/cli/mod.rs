//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Shroud using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Shroud - JSON PII analysis and redaction tool
#[derive(Parser, Debug)]
#[command(name = "shroud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shroud.toml", env = "SHROUD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHROUD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a JSON document and emit its schema report
    Analyze(commands::analyze::AnalyzeArgs),

    /// Classify schema report paths as PII via an LLM endpoint
    Classify(commands::classify::ClassifyArgs),

    /// Redact a JSON document using a PII config
    Redact(commands::redact::RedactArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_analyze() {
        let cli = Cli::parse_from(["shroud", "analyze", "--input", "data.json"]);
        assert_eq!(cli.config, "shroud.toml");
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "shroud",
            "--config",
            "custom.toml",
            "analyze",
            "--input",
            "data.json",
        ]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from([
            "shroud",
            "--log-level",
            "debug",
            "analyze",
            "--input",
            "data.json",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["shroud", "classify", "--input", "report.json"]);
        assert!(matches!(cli.command, Commands::Classify(_)));
    }

    #[test]
    fn test_cli_parse_redact() {
        let cli = Cli::parse_from([
            "shroud",
            "redact",
            "--input",
            "data.json",
            "--pii-config",
            "pii_config.json",
        ]);
        assert!(matches!(cli.command, Commands::Redact(_)));
    }

    #[test]
    fn test_cli_parse_redact_requires_pii_config() {
        let result = Cli::try_parse_from(["shroud", "redact", "--input", "data.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["shroud", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}

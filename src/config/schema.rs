//! Configuration schema types
//!
//! This module defines the configuration structure for Shroud. Every section
//! has sensible defaults, so a missing `shroud.toml` (or one with only a
//! `[classifier]` block) is a valid configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

use crate::core::analyze::{DEFAULT_MAX_DEPTH, DEFAULT_SAMPLE_CAP};

/// Main Shroud configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShroudConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Schema analysis settings
    pub analysis: AnalysisConfig,

    /// Classifier endpoint configuration
    pub classifier: ClassifierConfig,

    /// Audit trail configuration
    pub audit: AuditConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ShroudConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.analysis.validate()?;
        self.classifier.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Schema analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Distinct sample fingerprints retained per path
    pub sample_cap: usize,

    /// Traversal depth guard for untrusted documents
    pub max_depth: usize,
}

impl AnalysisConfig {
    fn validate(&self) -> Result<(), String> {
        if self.sample_cap == 0 {
            return Err("analysis.sample_cap must be at least 1".to_string());
        }
        if self.max_depth == 0 {
            return Err("analysis.max_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Retry configuration for classifier requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: usize,

    /// Initial delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Classifier endpoint configuration
///
/// Points at any OpenAI-compatible chat completions API. The API key is
/// stored securely in memory and automatically zeroized on drop; it is
/// usually supplied via `${SHROUD_CLASSIFIER_API_KEY}` substitution or the
/// equivalent environment override rather than written into the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Model identifier sent with each request
    pub model: String,

    /// API key for authentication (optional until `classify` is invoked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Sampling temperature for the classification request
    pub temperature: f64,

    /// Retry behaviour for transient failures
    pub retry: RetryConfig,
}

impl ClassifierConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid classifier.base_url '{}': {e}", self.base_url))?;
        if self.model.trim().is_empty() {
            return Err("classifier.model cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("classifier.timeout_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            api_key: None,
            timeout_seconds: 120,
            temperature: 1.0,
            retry: RetryConfig::default(),
        }
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Whether to append an audit entry per redaction run
    pub enabled: bool,

    /// Path of the JSONL audit log
    pub path: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "shroud-audit.jsonl".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable rotating file logging in addition to the console
    pub file_enabled: bool,

    /// Directory for log files
    pub file_path: String,

    /// Rotation policy ("daily", "hourly", or "never")
    pub file_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_enabled && self.file_path.trim().is_empty() {
            return Err("logging.file_path cannot be empty when file logging is enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.file_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.file_rotation '{}'. Must be one of: {}",
                self.file_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: "logs".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

//! Configuration management for Shroud.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation. All sections default sensibly, so the file is optional for
//! `analyze` and `redact`; `classify` additionally needs an API key.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [analysis]
//! sample_cap = 5
//! max_depth = 128
//!
//! [classifier]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o"
//! api_key = "${SHROUD_CLASSIFIER_API_KEY}"
//!
//! [audit]
//! enabled = true
//! path = "shroud-audit.jsonl"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders inside the file are substituted at load time,
//! and `SHROUD_<SECTION>_<KEY>` variables override individual settings:
//!
//! ```bash
//! export SHROUD_CLASSIFIER_API_KEY="sk-..."
//! export SHROUD_ANALYSIS_SAMPLE_CAP=10
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AnalysisConfig, ApplicationConfig, AuditConfig, ClassifierConfig, LoggingConfig, RetryConfig,
    ShroudConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShroudConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::ShroudError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ShroudConfig`]
/// 4. Applies environment variable overrides (`SHROUD_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is not set, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<ShroudConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShroudError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShroudError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShroudConfig = toml::from_str(&contents)
        .map_err(|e| ShroudError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ShroudError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// The default config path is optional: `analyze` and `redact` run fine
/// without a `shroud.toml`. Environment overrides are still applied to the
/// defaults so `SHROUD_CLASSIFIER_API_KEY` and friends keep working.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ShroudConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        let mut config = ShroudConfig::default();
        apply_env_overrides(&mut config);
        config.validate().map_err(|e| {
            ShroudError::Configuration(format!("Configuration validation failed: {e}"))
        })?;
        Ok(config)
    }
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ShroudError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `SHROUD_*` prefix
///
/// Environment variables follow the pattern `SHROUD_<SECTION>_<KEY>`,
/// for example `SHROUD_CLASSIFIER_BASE_URL` or `SHROUD_ANALYSIS_SAMPLE_CAP`.
fn apply_env_overrides(config: &mut ShroudConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("SHROUD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Analysis overrides
    if let Ok(val) = std::env::var("SHROUD_ANALYSIS_SAMPLE_CAP") {
        if let Ok(cap) = val.parse() {
            config.analysis.sample_cap = cap;
        }
    }
    if let Ok(val) = std::env::var("SHROUD_ANALYSIS_MAX_DEPTH") {
        if let Ok(depth) = val.parse() {
            config.analysis.max_depth = depth;
        }
    }

    // Classifier overrides
    if let Ok(val) = std::env::var("SHROUD_CLASSIFIER_BASE_URL") {
        config.classifier.base_url = val;
    }
    if let Ok(val) = std::env::var("SHROUD_CLASSIFIER_MODEL") {
        config.classifier.model = val;
    }
    if let Ok(val) = std::env::var("SHROUD_CLASSIFIER_API_KEY") {
        config.classifier.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SHROUD_CLASSIFIER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.classifier.timeout_seconds = timeout;
        }
    }

    // Audit overrides
    if let Ok(val) = std::env::var("SHROUD_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHROUD_AUDIT_PATH") {
        config.audit.path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SHROUD_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHROUD_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
}

//! PII classification adapters
//!
//! This module defines the `PathClassifier` trait that abstracts the service
//! used to label schema paths as PII, plus the OpenAI-compatible
//! implementation. Only masked fingerprints ever leave the process; raw
//! document values are never sent to a classifier.

pub mod openai;

pub use openai::OpenAiClassifier;

use crate::core::{PiiConfig, SchemaReport};
use crate::domain::Result;
use async_trait::async_trait;

/// Trait for PII classification backends
///
/// Implementations take a schema report (paths plus masked sample
/// fingerprints) and return a redaction config mapping the PII-bearing
/// paths to uppercase labels.
///
/// # Example
///
/// ```no_run
/// use shroud::classifier::{OpenAiClassifier, PathClassifier};
/// use shroud::config::ClassifierConfig;
/// use shroud::core::SchemaAnalyzer;
///
/// # async fn example() -> shroud::domain::Result<()> {
/// let document = serde_json::json!({"user": {"email": "a@b.com"}});
/// let report = SchemaAnalyzer::new().analyze(&document)?;
///
/// let config = ClassifierConfig::default();
/// let classifier = OpenAiClassifier::new(config)?;
/// let pii_config = classifier.classify(&report).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PathClassifier: Send + Sync {
    /// Classify the paths in a schema report
    ///
    /// Paths judged not to contain PII are absent from the returned config.
    async fn classify(&self, report: &SchemaReport) -> Result<PiiConfig>;

    /// Name of the backing model, for logging
    fn model(&self) -> &str;
}

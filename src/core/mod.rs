//! Core analysis and redaction engine
//!
//! This module contains the path-addressing and redaction core:
//!
//! - [`mask`] - structural fingerprinting of scalar values
//! - [`analyze`] - one-pass schema analysis with bounded, deterministic samples
//! - [`pii_config`] - the path-to-label mapping that governs redaction
//! - [`redact`] - placeholder substitution with a per-invocation cache
//! - [`summary`] - per-run statistics and formatting
//! - [`audit`] - JSONL audit trail with hashed values
//!
//! The core performs no I/O and has no failure modes beyond the traversal
//! depth guard; all boundary errors (files, parsing, config shape) are
//! handled before a document reaches it.

pub mod analyze;
pub mod audit;
pub mod mask;
pub mod pii_config;
pub mod redact;
pub mod summary;

// Re-export main types
pub use analyze::{SchemaAnalyzer, SchemaEntry, SchemaReport};
pub use audit::AuditLogger;
pub use mask::mask;
pub use pii_config::PiiConfig;
pub use redact::{RedactionEngine, RedactionEvent};
pub use summary::RedactionSummary;

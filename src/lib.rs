//! # Shroud - JSON PII Analysis and Redaction
//!
//! Shroud analyzes arbitrarily nested JSON documents, fingerprints their
//! values without revealing them, identifies which paths carry personally
//! identifiable information, and redacts those values with stable
//! placeholder tokens.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Analyzing** document structure into a schema report of paths and
//!   masked sample fingerprints (letters become `L`, digits become `D`)
//! - **Classifying** report paths as PII via an OpenAI-compatible endpoint,
//!   producing a path-to-label config
//! - **Redacting** configured paths with `<LABEL:N>` placeholders that stay
//!   stable for repeated values within a run
//!
//! ## Architecture
//!
//! Shroud follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (masking, analysis, redaction, audit)
//! - [`classifier`] - PII classification adapters
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use shroud::core::{PiiConfig, RedactionEngine, SchemaAnalyzer};
//!
//! fn main() -> shroud::domain::Result<()> {
//!     let mut document = serde_json::json!({
//!         "name": "Anna Ivanova",
//!         "age": 30
//!     });
//!
//!     // What does the document look like, without reading it?
//!     let report = SchemaAnalyzer::new().analyze(&document)?;
//!     assert_eq!(report.entry("name").unwrap().samples, ["LLLL LLLLLLL"]);
//!
//!     // Redact the paths a config declares as PII
//!     let config = PiiConfig::from_entries([("name", "FULL_NAME")]);
//!     let summary = RedactionEngine::new().redact(&mut document, &config)?;
//!
//!     assert_eq!(document["name"], "<FULL_NAME:1>");
//!     assert_eq!(document["age"], 30);
//!     assert_eq!(summary.total_substitutions, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Path Addressing
//!
//! Paths use dot notation for object members and a shared `[]` marker for
//! array elements, so every element of an array maps to the same path:
//!
//! - `user.email` - member `email` of object `user`
//! - `items[].id` - member `id` of any element of array `items`
//! - `tags[]` - any element of array `tags`
//!
//! ## Placeholder Stability
//!
//! Within one redaction run, equal values under the same label share a
//! placeholder, and distinct values get increasing ordinals:
//!
//! ```rust
//! use shroud::core::{PiiConfig, RedactionEngine};
//!
//! # fn main() -> shroud::domain::Result<()> {
//! let mut document = serde_json::json!({
//!     "from": "anna@example.com",
//!     "to": "boris@example.com",
//!     "reply_to": "anna@example.com"
//! });
//!
//! let config = PiiConfig::from_entries([
//!     ("from", "EMAIL"),
//!     ("to", "EMAIL"),
//!     ("reply_to", "EMAIL"),
//! ]);
//! RedactionEngine::new().redact(&mut document, &config)?;
//!
//! assert_eq!(document["from"], "<EMAIL:1>");
//! assert_eq!(document["to"], "<EMAIL:2>");
//! assert_eq!(document["reply_to"], "<EMAIL:1>");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Shroud uses the [`domain::ShroudError`] type for all errors:
//!
//! ```rust,no_run
//! use shroud::core::PiiConfig;
//! use shroud::domain::ShroudError;
//!
//! fn example() -> Result<(), ShroudError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = PiiConfig::load_from_file("pii_config.json")?;
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

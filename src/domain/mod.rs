//! Domain models and types for Shroud.
//!
//! This module contains the core domain types shared by the analyzer, the
//! redaction engine, and the classifier adapter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Structural path addressing** ([`JsonPath`]), the scheme that collapses
//!   an arbitrary JSON shape into a finite set of addressable paths
//! - **Error types** ([`ShroudError`], [`ClassifierError`])
//! - **Result type alias** ([`Result`])
//!
//! # Path addressing
//!
//! Paths are the sole addressing unit of the system. Array indices are
//! collapsed into a single shared `[]` marker:
//!
//! ```
//! use shroud::domain::JsonPath;
//!
//! let path = JsonPath::root().child("records").array().child("email");
//! assert_eq!(path.as_str(), "records[].email");
//! ```
//!
//! # Error handling
//!
//! All fallible operations return [`Result<T, ShroudError>`](Result):
//!
//! ```
//! use shroud::domain::{Result, ShroudError};
//!
//! fn parse_document(input: &str) -> Result<serde_json::Value> {
//!     serde_json::from_str(input).map_err(ShroudError::from)
//! }
//! ```

pub mod errors;
pub mod path;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ClassifierError, ShroudError};
pub use path::JsonPath;
pub use result::Result;

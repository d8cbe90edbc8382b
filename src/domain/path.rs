//! Structural path addressing for JSON documents
//!
//! A [`JsonPath`] names a structural position inside a nested JSON value:
//! object members are joined with `.`, and descending into an array appends
//! `[]` without an index, so every element of an array at a given structural
//! position shares one path. A path uniquely determines a traversal pattern
//! but never distinguishes sibling array elements.
//!
//! Path extension is the only operation; it is stateless, pure, and has no
//! failure modes. The same rules drive both the schema analyzer and the
//! redaction engine, which is what makes analyzer output usable as redaction
//! config keys.
//!
//! # Examples
//!
//! ```
//! use shroud::domain::path::JsonPath;
//!
//! let root = JsonPath::root();
//! let items = root.child("items").array();
//! assert_eq!(items.child("id").as_str(), "items[].id");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker appended to a path when traversal descends into an array.
pub const ARRAY_MARKER: &str = "[]";

/// Structural path newtype wrapper
///
/// Paths are plain strings under the hood; they are not required to be valid
/// identifiers and any member name a JSON object can carry is representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(String);

impl JsonPath {
    /// Returns the empty path addressing the document root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Creates a path from an already-serialized path string.
    ///
    /// Used when reading paths back from a schema report or a PII config,
    /// where the string form is the interchange format.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Extends the path by an object member name.
    ///
    /// Entering field `k` from path `p` yields `p.k`, or just `k` when `p`
    /// is the root.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    /// Extends the path for descending into any element of an array.
    ///
    /// All elements share the resulting `p[]` path; indices are deliberately
    /// collapsed.
    pub fn array(&self) -> Self {
        Self(format!("{}{}", self.0, ARRAY_MARKER))
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JsonPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for JsonPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty() {
        let root = JsonPath::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
    }

    #[test]
    fn test_child_from_root_has_no_separator() {
        let path = JsonPath::root().child("user");
        assert_eq!(path.as_str(), "user");
    }

    #[test]
    fn test_child_joins_with_dot() {
        let path = JsonPath::root().child("user").child("email");
        assert_eq!(path.as_str(), "user.email");
    }

    #[test]
    fn test_array_appends_marker() {
        let path = JsonPath::root().child("tags").array();
        assert_eq!(path.as_str(), "tags[]");
    }

    #[test]
    fn test_array_elements_share_one_path() {
        // items[].id regardless of which element is traversed
        let items = JsonPath::root().child("items").array();
        assert_eq!(items.child("id").as_str(), "items[].id");
    }

    #[test]
    fn test_nested_arrays() {
        let path = JsonPath::root().child("matrix").array().array();
        assert_eq!(path.as_str(), "matrix[][]");
    }

    #[test]
    fn test_top_level_array() {
        let path = JsonPath::root().array();
        assert_eq!(path.as_str(), "[]");
    }

    #[test]
    fn test_non_identifier_member_names() {
        let path = JsonPath::root().child("weird key!");
        assert_eq!(path.as_str(), "weird key!");
    }

    #[test]
    fn test_serde_transparent() {
        let path = JsonPath::root().child("user").child("email");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"user.email\"");

        let back: JsonPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}

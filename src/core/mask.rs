//! Value masking for schema samples
//!
//! The masker turns a scalar leaf into a structural fingerprint that can be
//! shown to the classifier (or a human) without exposing the raw value:
//! letters in any script become `L`, decimal digits become `D`, and
//! punctuation, whitespace, and symbols pass through unchanged. Two values
//! with the same character classes at the same positions are
//! indistinguishable after masking, which is exactly the signal the
//! classifier needs: `"John 5th"` and `"Jane 9rd"` both mask to `LLLL DLL`.
//!
//! Masking is deterministic and pure; it has no failure modes.

use serde_json::Value;

/// Class marker substituted for alphabetic characters.
const LETTER_MARKER: char = 'L';

/// Class marker substituted for decimal digits.
const DIGIT_MARKER: char = 'D';

/// Produce the structural fingerprint of a leaf value.
///
/// Strings, numbers, and booleans are fingerprinted via their canonical text
/// form. Any other leaf yields its type name instead, so heterogeneous
/// leaves at one path still produce a distinguishable, if coarse, sample.
/// Within well-formed JSON the only such leaf is `null`.
pub fn mask(value: &Value) -> String {
    match value {
        Value::String(s) => mask_text(s),
        Value::Number(n) => mask_text(&n.to_string()),
        Value::Bool(b) => mask_text(if *b { "true" } else { "false" }),
        Value::Null => "null".to_string(),
        Value::Object(_) => "object".to_string(),
        Value::Array(_) => "array".to_string(),
    }
}

/// Mask a text form character by character.
fn mask_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphabetic() {
                LETTER_MARKER
            } else if c.to_digit(10).is_some() {
                // Decimal digits only; other numeric characters like '½'
                // or '²' stay as-is
                DIGIT_MARKER
            } else {
                c
            }
        })
        .collect()
}

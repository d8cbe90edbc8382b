//! Command implementations

pub mod analyze;
pub mod classify;
pub mod init;
pub mod redact;

use serde_json::Value;
use std::io::Read;

/// Read a JSON value from a file, or from stdin when the path is `-`
pub(crate) fn read_json_input(path: &str) -> anyhow::Result<Value> {
    let contents = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {path}: {e}"))?
    };

    serde_json::from_str(&contents).map_err(|e| anyhow::anyhow!("Invalid JSON in {path}: {e}"))
}

/// Write pretty-printed output to a file, or to stdout when no path is given
pub(crate) fn write_output(output: Option<&str>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .map_err(|e| anyhow::anyhow!("Failed to write {path}: {e}"))?;
            tracing::info!(path = %path, "Output written");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_json_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Anna"}}"#).unwrap();

        let value = read_json_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(value["name"], "Anna");
    }

    #[test]
    fn test_read_json_input_missing_file() {
        let result = read_json_input("/nonexistent/input.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_json_input_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = read_json_input(file.path().to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_output(Some(path.to_str().unwrap()), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}

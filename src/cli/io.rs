//! JSON I/O handling for CLI
//!
//! - Input: header and transaction documents as JSON files
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON document from a file
pub fn read_document<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::invalid_input(format!("{}: {}", path.display(), e)))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Header;
    use tempfile::TempDir;

    #[test]
    fn test_read_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.json");
        fs::write(
            &path,
            r#"{"type": "LK", "bank": 10000000, "customer": "ACME", "account": 1,
                "create_date": "2024-03-01", "currency": "EUR"}"#,
        )
        .unwrap();
        let header: Header = read_document(&path).unwrap();
        assert_eq!(header.customer.as_str(), "ACME");

        fs::write(&path, "{}").unwrap();
        let err = read_document::<Header>(&path).unwrap_err();
        assert_eq!(err.code_str(), "DTAUS_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let err = read_document::<Header>(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code_str(), "DTAUS_CLI_IO_ERROR");
    }
}

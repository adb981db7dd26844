//! Loading the JSON configuration

use std::fs;

use dtaus::config::{ConfigError, DtausConfig};
use dtaus::layout::Field;
use tempfile::TempDir;

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dtaus.json");
    fs::write(
        &path,
        r#"{
            "space_padded_fields": ["A10", "C6"],
            "min_amount": 1,
            "max_amount": 5000000,
            "max_descriptions": 3,
            "shift_chunk_size": 512,
            "max_execution_delay_days": 15
        }"#,
    )
    .unwrap();

    let config = DtausConfig::load(&path).unwrap();
    assert!(config.allows_space_padding(Field::A10));
    assert!(config.allows_space_padding(Field::C6));
    assert!(!config.allows_space_padding(Field::C12));
    assert_eq!(config.max_amount, 5_000_000);
    assert_eq!(config.max_descriptions, 3);
    assert_eq!(config.shift_chunk_size, 512);
}

#[test]
fn test_empty_object_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dtaus.json");
    fs::write(&path, "{}").unwrap();
    let config = DtausConfig::load(&path).unwrap();
    assert_eq!(config.shift_chunk_size, DtausConfig::default().shift_chunk_size);
    assert!(config.space_padded_fields.is_empty());
}

#[test]
fn test_bad_config_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dtaus.json");

    fs::write(&path, r#"{"shift_chunk_size": "big"}"#).unwrap();
    assert!(matches!(DtausConfig::load(&path), Err(ConfigError::Parse(_))));

    fs::write(&path, r#"{"shift_chunk_size": 0}"#).unwrap();
    assert!(matches!(DtausConfig::load(&path), Err(ConfigError::Invalid(_))));

    assert!(matches!(
        DtausConfig::load(&temp_dir.path().join("missing.json")),
        Err(ConfigError::Read { .. })
    ));
}

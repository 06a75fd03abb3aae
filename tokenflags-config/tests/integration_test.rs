//! Integration tests for tokenflags-config

use std::fs;
use std::path::PathBuf;
use tokenflags_config::*;

#[test]
fn test_builder_layers_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("tokenflags.toml");
    let json_path = dir.path().join("override.json");

    fs::write(
        &toml_path,
        r#"
engine = "/opt/dwr/engine"
flag_bytes = 15
default_cosmetic = "Knight"
"#,
    )
    .unwrap();
    fs::write(&json_path, r#"{"default_cosmetic": "Slime"}"#).unwrap();

    let service = ConfigService::builder()
        .add_file(&toml_path, FileFormat::Toml)
        .add_file_auto(&json_path)
        .build()
        .unwrap();

    let settings = service.settings().unwrap();
    assert_eq!(settings.engine, Some(PathBuf::from("/opt/dwr/engine")));
    assert_eq!(settings.default_cosmetic, "Slime");
    assert_eq!(service.get_string("default_cosmetic").unwrap(), "Slime");
}

#[test]
fn test_env_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.env");
    fs::write(&path, "FLAG_BYTES=4\nOUTPUT_DIR=out\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_file_auto(&path).unwrap();

    let settings: Settings = manager.load_validated().unwrap();
    assert_eq!(settings.flag_bytes, 4);
    assert_eq!(settings.output_dir, PathBuf::from("out"));
}

#[test]
fn test_invalid_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "flag_bytes = 100\n").unwrap();

    let service = ConfigService::builder().add_file_auto(&path).build().unwrap();
    let err = service.settings().unwrap_err();
    assert!(err.to_string().contains("flag_bytes"));
}

#[test]
fn test_non_table_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let manager = ConfigManager::new();
    assert!(matches!(
        manager.load_file_auto(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_missing_file() {
    let manager = ConfigManager::new();
    assert!(matches!(
        manager.load_file("/nonexistent/tokenflags.toml", FileFormat::Toml),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_unknown_extension() {
    let manager = ConfigManager::new();
    assert!(manager.load_file_auto("settings.yaml").is_err());
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let mut store = StateStore::open(&path).unwrap();
        store.set_flags("IVIAAVCQKACAAAAAAAAAAAAB").unwrap();
        store.set_cosmetic("Random").unwrap();
        store.set_source("game.nes", b"NES\x1a").unwrap();
    }

    let store = StateStore::open(&path).unwrap();
    assert_eq!(store.flags(), Some("IVIAAVCQKACAAAAAAAAAAAAB"));
    assert_eq!(store.cosmetic(), Some("Random"));
    let source = store.source().unwrap().unwrap();
    assert_eq!(source.name, "game.nes");
    assert_eq!(source.data, b"NES\x1a");
    assert_eq!(store.len(), 4);
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::ParseError("flag_bytes".to_string());
    assert!(err.to_string().contains("flag_bytes"));
}

use armkit_settings::Config;
use tempfile::TempDir;

#[test]
fn toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.arm.l1 = 120.0;
    config.viewport.grid_spacing = 25.0;
    config.connection.port = Some("/dev/ttyACM0".into());
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.window.width = 1024.0;
    config.save_to_file(&path).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    assert!(Config::default().save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn invalid_file_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[arm]\nl1 = -5.0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("arm.l1"));
}

#[test]
fn malformed_toml_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[arm\nl1 = ").unwrap();
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

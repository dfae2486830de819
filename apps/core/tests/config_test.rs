use quicklaunch_core::config::{self, Config, ConfigError, WebSearchProvider};

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.hotkey, "Shift+F");
    assert_eq!(cfg.api_base_url, "http://localhost:8080");
    assert_eq!(cfg.max_window_height, 800);
    assert!(cfg.favorites_db_path.to_string_lossy().contains("quicklaunch"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn missing_file_yields_defaults_bound_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.hotkey, Config::default().hotkey);
}

#[test]
fn save_then_load_keeps_edited_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config {
        config_path: dir.path().join("nested").join("config.toml"),
        ..Default::default()
    };
    cfg.hotkey = "Ctrl+Shift+P".into();
    cfg.web_search_provider = WebSearchProvider::Bing;
    cfg.project_root = Some(dir.path().to_path_buf());
    config::save(&cfg).unwrap();

    let loaded = config::load(Some(&cfg.config_path)).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "tray_mode = true\napi_base_url = \"https://sync.example/\"\n").unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    assert!(cfg.tray_mode);
    assert_eq!(cfg.api_base(), "https://sync.example");
    assert_eq!(cfg.hotkey, "Shift+F");
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "hotkey = [").unwrap();

    assert!(matches!(
        config::load(Some(&path)),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn rejects_invalid_values() {
    let reserved = Config {
        hotkey: "Alt+F4".into(),
        ..Default::default()
    };
    assert!(config::validate(&reserved).is_err());

    let tiny = Config {
        max_window_height: 10,
        ..Default::default()
    };
    assert!(config::validate(&tiny).is_err());

    let custom = Config {
        web_search_provider: WebSearchProvider::Custom,
        web_search_custom_template: "https://search.example/".into(),
        ..Default::default()
    };
    assert!(config::validate(&custom).is_err());

    let ftp = Config {
        api_base_url: "ftp://files.example".into(),
        ..Default::default()
    };
    assert!(config::validate(&ftp).is_err());
}

use super::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_are_valid() {
    let config = ToolConfig::default();
    validate_config(&config).expect("defaults validate");
    assert_eq!(config.checkpoint_every, 20);
    assert_eq!(config.timeout(), Duration::from_secs(5));
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"{ "checkpoint_every": 10, "endpoints": { "youdao": "https://dict.youdao.com" } }"#,
    );

    let config = load_config(Some(&path)).expect("load config");

    assert_eq!(config.checkpoint_every, 10);
    assert_eq!(config.delay_ms, 100);
    assert_eq!(config.endpoints.youdao, "https://dict.youdao.com");
    assert_eq!(config.endpoints.datamuse, Endpoints::default().datamuse);
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, r#"{ "checkpoint_evry": 10 }"#);
    let err = load_config(Some(&path)).expect_err("typo in key");
    assert!(format!("{err:#}").contains("checkpoint_evry"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    assert!(load_config(Some(&dir.path().join("absent.json"))).is_err());
}

#[test]
fn overrides_replace_only_what_is_set() {
    let overrides = Overrides {
        checkpoint_every: Some(5),
        user_agent: Some("tester".to_string()),
        ..Overrides::default()
    };
    let config = ToolConfig::default().with_overrides(&overrides);
    assert_eq!(config.checkpoint_every, 5);
    assert_eq!(config.user_agent, "tester");
    assert_eq!(config.delay_ms, ToolConfig::default().delay_ms);
}

#[test]
fn validate_rejects_zero_interval_and_bad_urls() {
    let config = ToolConfig {
        checkpoint_every: 0,
        ..ToolConfig::default()
    };
    assert!(validate_config(&config).is_err());

    let config = ToolConfig {
        endpoints: Endpoints {
            openverse: "api.openverse.org".to_string(),
            ..Endpoints::default()
        },
        ..ToolConfig::default()
    };
    let err = validate_config(&config).expect_err("scheme required");
    assert!(err.to_string().contains("endpoints.openverse"));
}

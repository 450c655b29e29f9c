use std::fs::write;

use serial_test::serial;
use tempfile::NamedTempFile;

/// A minimal static config produces a valid CliConfig.
#[tokio::test]
#[serial]
async fn test_load_config_success() {
    let config_yaml = r#"
api:
  base_url: "https://api.lexgate.test"
  timeout_secs: 15
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = lexgate::load_config::load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.api.base_url, "https://api.lexgate.test");
    assert_eq!(config.api.timeout_secs, Some(15));
}

/// Timeout is optional and defaults to unset.
#[tokio::test]
#[serial]
async fn test_load_config_without_timeout() {
    let config_yaml = r#"
api:
  base_url: "https://api.lexgate.test"
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = lexgate::load_config::load_config(config_file.path())
        .expect("Config without timeout should load");
    assert_eq!(config.api.timeout_secs, None);
}

/// Invalid YAML errors and says so.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = lexgate::load_config::load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

/// A missing file errors with the path in the message.
#[tokio::test]
#[serial]
async fn test_load_config_errors_for_missing_file() {
    let err = lexgate::load_config::load_config("/definitely/not/here.yaml").unwrap_err();
    assert!(
        err.to_string().contains("read"),
        "Read error expected, got: {err}"
    );
}

/// Configuration::from_env requires both variables.
#[tokio::test]
#[serial]
async fn test_configuration_from_env_requires_both_vars() {
    std::env::remove_var("LEXGATE_BASE_URL");
    std::env::remove_var("LEXGATE_API_KEY");
    assert!(lexgate::config::Configuration::from_env().is_err());

    std::env::set_var("LEXGATE_BASE_URL", "https://api.lexgate.test/");
    assert!(
        lexgate::config::Configuration::from_env().is_err(),
        "base URL alone is not enough"
    );

    std::env::set_var("LEXGATE_API_KEY", "key_test_123");
    let conf = lexgate::config::Configuration::from_env().expect("both vars set");
    assert_eq!(
        conf.base_url(),
        "https://api.lexgate.test",
        "trailing slash should be trimmed"
    );

    std::env::remove_var("LEXGATE_BASE_URL");
    std::env::remove_var("LEXGATE_API_KEY");
}

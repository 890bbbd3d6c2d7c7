//! Configuration tests

use lingo::domain::model::is_supported;
use lingo::infrastructure::config::{detect_system_language, Config};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.min_interval_ms, 2000);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.theme, "plain");
    assert!(config.enable_emoji);
    assert_eq!(
        config.provider.endpoint,
        "https://api.mymemory.translated.net/get"
    );
    assert!(config.provider.contact_email.is_none());
}

#[test]
fn test_logging_defaults() {
    let config = Config::default();

    assert!(config.logging.enable);
    assert!(config.logging.path.is_none());
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
min_interval_ms = 3000
request_timeout_secs = 5
theme = "mono"
enable_emoji = false

[provider]
endpoint = "https://translate.example.com/get"
contact_email = "ops@example.com"

[logging]
enable = true
path = "/tmp/lingo-test.log"
level = "DEBUG"
"#;

    let config: Config = toml::from_str(toml_content).unwrap();

    assert_eq!(config.min_interval_ms, 3000);
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.theme, "mono");
    assert!(!config.enable_emoji);
    assert_eq!(config.provider.endpoint, "https://translate.example.com/get");
    assert_eq!(
        config.provider.contact_email.as_deref(),
        Some("ops@example.com")
    );
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/lingo-test.log"));
    assert_eq!(config.logging.level, "DEBUG");
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = Config::default();
    let serialized = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&serialized).unwrap();

    assert_eq!(parsed.min_interval_ms, config.min_interval_ms);
    assert_eq!(parsed.provider.endpoint, config.provider.endpoint);
    assert_eq!(parsed.logging.level, config.logging.level);
}

#[test]
fn test_detected_language_is_always_supported() {
    // Whatever the environment locale is, the fallback must resolve to a
    // code the registry knows (English included).
    assert!(is_supported(&detect_system_language()));
}

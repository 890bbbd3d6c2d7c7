use crate::domain::error::LingoError;
use crate::domain::model::{is_supported, SOURCE_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Minimum spacing between outbound provider requests, in milliseconds.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional contact address forwarded to the provider (`de` query
    /// parameter); raises the anonymous usage quota on MyMemory.
    pub contact_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            contact_email: None,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            theme: default_theme(),
            enable_emoji: default_enable_emoji(),
            provider: ProviderConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_min_interval_ms() -> u64 {
    2000
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_theme() -> String {
    "plain".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lingo").join("config.toml"))
}

/// Path of the preference database (lives next to the config file)
pub fn get_database_path(_config: &Config) -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lingo")
        .join("lingo.db")
}

pub fn load_config() -> Result<Config, LingoError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), LingoError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| LingoError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| LingoError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(LingoError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

/// Best-effort target language from the environment locale, used only when
/// no preference was ever persisted. `LC_ALL` wins over `LANG`, matching
/// POSIX precedence. Unsupported or missing locales fall back to English.
pub fn detect_system_language() -> String {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();

    // "fr_FR.UTF-8" -> "fr"
    let code = locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or("")
        .to_lowercase();

    if !code.is_empty() && is_supported(&code) {
        code
    } else {
        SOURCE_LANGUAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.min_interval_ms, 2000);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.theme, "plain");
        assert!(config.enable_emoji);
        assert!(config.provider.endpoint.starts_with("https://"));
        assert!(config.provider.contact_email.is_none());
        assert_eq!(config.logging.level, "WARN");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
min_interval_ms = 500

[provider]
contact_email = "ops@example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.min_interval_ms, 500);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.provider.endpoint, default_endpoint());
        assert_eq!(
            config.provider.contact_email.as_deref(),
            Some("ops@example.com")
        );
    }
}

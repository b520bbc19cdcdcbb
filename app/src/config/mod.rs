//! Configuration management for the Fitness Tracker
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FT__)
//! 4. `GEMINI_API_KEY`, only when no API key was set by the sources above
//!
//! A missing API key is not a load error. The advice client treats it as a
//! failed call and falls back to its apology line.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Generative-language service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AdviceConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl AdviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 20,
        }
    }
}

impl fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    pub path: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".fitness-tracker/preferences.json"),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Minimum time the "calculating" state is shown; 0 disables it
    pub min_calculating_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            min_calculating_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FT__ prefix)
            // e.g., FT__ADVICE__TIMEOUT_SECS=15 sets advice.timeout_secs
            .add_source(config::Environment::with_prefix("FT").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.advice.api_key = resolve_api_key(
            app_config.advice.api_key.take(),
            env::var(GEMINI_API_KEY_ENV).ok(),
        );

        Ok(app_config)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

/// Pick the configured key, else the fallback; blank keys count as absent
fn resolve_api_key(configured: Option<String>, fallback: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| fallback.filter(|key| !key.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.advice.api_key.is_none());
        assert_eq!(config.advice.model, "gemini-1.5-flash");
        assert_eq!(config.advice.timeout(), Duration::from_secs(20));
        assert_eq!(config.ui.min_calculating_ms, 1500);
        assert_eq!(
            config.preferences.path,
            PathBuf::from(".fitness-tracker/preferences.json")
        );
    }

    #[test]
    fn test_timeout_within_bounds() {
        let secs = AppConfig::default().advice.timeout_secs;
        assert!((15..=30).contains(&secs));
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }

    #[test]
    fn test_api_key_resolution() {
        assert_eq!(
            resolve_api_key(Some("configured".into()), Some("env".into())).as_deref(),
            Some("configured")
        );
        assert_eq!(
            resolve_api_key(None, Some("env".into())).as_deref(),
            Some("env")
        );
        assert_eq!(resolve_api_key(Some("  ".into()), None), None);
        assert_eq!(resolve_api_key(None, Some(String::new())), None);
    }

    #[test]
    fn test_api_key_never_serialized_or_printed() {
        let mut config = AppConfig::default();
        config.advice.api_key = Some("super-secret".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}

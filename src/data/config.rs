//! Application Configuration
//!
//! Handles loading and saving application configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub dictation: DictationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            capture: CaptureConfig::default(),
            dictation: DictationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Load configuration from file or create default
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Address the relay endpoint listens on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// External sink the relay forwards payloads to
    #[serde(default = "default_forward_url")]
    pub forward_url: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8765".to_string()
}

fn default_forward_url() -> String {
    // Placeholder sink, treated as a stub interface
    "https://imaginary.api/endpoint".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            forward_url: default_forward_url(),
        }
    }
}

/// Capture client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Relay endpoint submissions are posted to
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
}

fn default_relay_url() -> String {
    "http://127.0.0.1:8765/api/log-response".to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
        }
    }
}

/// Dictation configuration
///
/// An empty `endpoint` means no transcription service is configured and the
/// voice affordance stays disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictationConfig {
    /// Transcription service URL (empty = dictation unavailable)
    #[serde(default)]
    pub endpoint: String,
    /// Recording window in seconds
    #[serde(default = "default_record_secs")]
    pub record_secs: u64,
    /// Session timeout in seconds, covering the transcription call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Language hint passed to the transcription service
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_record_secs() -> u64 {
    5
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            record_secs: default_record_secs(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.relay.listen_addr, "127.0.0.1:8765");
        assert_eq!(
            config.capture.relay_url,
            "http://127.0.0.1:8765/api/log-response"
        );
        assert!(config.dictation.endpoint.is_empty());
        assert_eq!(config.dictation.record_secs, 5);
        assert_eq!(config.dictation.timeout_secs, 15);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("[relay]\nlisten_addr = \"0.0.0.0:9000\"\n")
            .expect("partial config should parse");
        assert_eq!(config.relay.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.relay.forward_url, "https://imaginary.api/endpoint");
        assert!(config.dictation.endpoint.is_empty());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.dictation.endpoint = "http://127.0.0.1:9876/api/transcribe".to_string();
        let encoded = toml::to_string_pretty(&config).expect("serialize");
        let decoded: AppConfig = toml::from_str(&encoded).expect("parse");
        assert_eq!(decoded.dictation.endpoint, config.dictation.endpoint);
        assert_eq!(decoded.relay.listen_addr, config.relay.listen_addr);
    }
}

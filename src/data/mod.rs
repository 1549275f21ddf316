//! Data module for configuration management

mod config;

pub use config::{AppConfig, CaptureConfig, DictationConfig, RelayConfig};

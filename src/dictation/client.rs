//! Dictation via an external transcription service
//!
//! The "speech-to-text capability" is an HTTP service speaking a
//! transcribe contract: base64 WAV in, transcript out. It is optional; when
//! it cannot be detected the voice affordance is never offered.

use crate::audio::{self, RecordedAudio};
use crate::data::DictationConfig;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;

/// Dictation session failure taxonomy
#[derive(Debug, Error)]
pub enum DictationError {
    #[error("audio capture failed: {0}")]
    Audio(anyhow::Error),
    #[error("transcription request timed out")]
    Timeout,
    #[error("transcription request failed: {0}")]
    Http(reqwest::Error),
    #[error("transcription service rejected the audio: {0}")]
    Rejected(String),
}

impl From<anyhow::Error> for DictationError {
    fn from(e: anyhow::Error) -> Self {
        Self::Audio(e)
    }
}

/// Request sent to the transcription service
#[derive(Serialize)]
struct TranscribeRequest {
    audio_base64: String,
    format: String,
    sample_rate: u32,
    language: String,
}

/// Response from the transcription service
#[derive(Deserialize)]
struct TranscribeResponse {
    success: bool,
    #[serde(default)]
    raw_text: String,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the optional speech-to-text capability
pub struct DictationClient {
    http: reqwest::Client,
    config: DictationConfig,
}

impl DictationClient {
    /// Detect the capability: a configured endpoint plus a usable input
    /// device. `None` disables the voice affordance entirely.
    pub fn detect(config: &DictationConfig) -> Option<Self> {
        if config.endpoint.is_empty() {
            tracing::info!("Dictation disabled: no transcription endpoint configured");
            return None;
        }
        if !audio::input_device_available() {
            tracing::info!("Dictation disabled: no audio input device");
            return None;
        }
        Some(Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        })
    }

    /// Run one dictation session: record a bounded window, ship it to the
    /// transcription service, and return the final transcript.
    pub async fn dictate(&self) -> Result<String, DictationError> {
        let window = Duration::from_secs(self.config.record_secs);
        let recorded = tokio::task::spawn_blocking(move || audio::record(window))
            .await
            .map_err(|e| DictationError::Audio(anyhow::anyhow!(e)))??;

        tracing::debug!(
            "Recorded {} samples at {}Hz, sending for transcription",
            recorded.samples.len(),
            recorded.sample_rate
        );

        let request = TranscribeRequest {
            audio_base64: BASE64.encode(wav_bytes(&recorded)?),
            format: "wav".to_string(),
            sample_rate: recorded.sample_rate,
            language: self.config.language.clone(),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DictationError::Timeout
                } else {
                    DictationError::Http(e)
                }
            })?;

        let body: TranscribeResponse = response.json().await.map_err(DictationError::Http)?;
        if !body.success {
            return Err(DictationError::Rejected(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(body.raw_text)
    }
}

/// Encode mono 16-bit samples as an in-memory WAV
fn wav_bytes(audio: &RecordedAudio) -> anyhow::Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in &audio.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_without_endpoint_is_unavailable() {
        let config = DictationConfig::default();
        assert!(config.endpoint.is_empty());
        assert!(DictationClient::detect(&config).is_none());
    }

    #[test]
    fn wav_bytes_round_trip() {
        let audio = RecordedAudio {
            samples: vec![0, 1000, -1000, i16::MAX, i16::MIN],
            sample_rate: 48_000,
        };
        let bytes = wav_bytes(&audio).expect("encode");

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).expect("valid wav");
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 48_000);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.expect("sample")).collect();
        assert_eq!(samples, audio.samples);
    }

    #[test]
    fn transcribe_response_tolerates_missing_fields() {
        let body: TranscribeResponse =
            serde_json::from_str(r#"{"success": false}"#).expect("parse");
        assert!(!body.success);
        assert!(body.raw_text.is_empty());
        assert!(body.error.is_none());
    }
}

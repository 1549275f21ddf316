//! Audio recording using cpal
//!
//! Records a bounded window from the default input device at its native
//! config and hands back mono 16-bit samples for the transcribe payload.

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// A finished recording
pub struct RecordedAudio {
    /// Mono 16-bit samples at the device's native rate
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// True when a default input device is present
pub fn input_device_available() -> bool {
    cpal::default_host().default_input_device().is_some()
}

/// Record from the default input device for `window`.
///
/// Blocking; run it on a blocking task.
pub fn record(window: Duration) -> Result<RecordedAudio> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("no input device available"))?;

    // Use the device's exact config; the sample rate travels with the
    // payload so no resampling is needed here.
    let supported_config = device.default_input_config()?;
    let sample_rate = supported_config.sample_rate().0;
    let channels = supported_config.channels();
    let sample_format = supported_config.sample_format();
    let config = supported_config.config();

    tracing::debug!(
        "Recording from {:?}: {}Hz, {} channels, {:?}",
        device.name().unwrap_or_default(),
        sample_rate,
        channels,
        sample_format
    );

    let (tx, rx) = mpsc::channel::<Vec<i16>>();
    let err_fn = |err| tracing::error!("Audio stream error: {}", err);

    let stream = match sample_format {
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(data.to_vec());
            },
            err_fn,
            None,
        )?,
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let samples: Vec<i16> = data
                    .iter()
                    .map(|s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
                    .collect();
                let _ = tx.send(samples);
            },
            err_fn,
            None,
        )?,
        format => {
            return Err(anyhow!("unsupported sample format: {:?}", format));
        }
    };

    stream.play()?;

    let mut interleaved = Vec::new();
    let deadline = Instant::now() + window;
    while Instant::now() < deadline {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(chunk) => interleaved.extend_from_slice(&chunk),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    drop(stream);

    tracing::debug!(
        "Recorded {} interleaved samples ({:.1}s)",
        interleaved.len(),
        interleaved.len() as f32 / (sample_rate as f32 * channels as f32)
    );

    Ok(RecordedAudio {
        samples: downmix(&interleaved, channels),
        sample_rate,
    })
}

/// Average interleaved channels into mono
fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels as usize)
        .map(|chunk| {
            let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
            (sum / chunk.len() as i32) as i16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_mono_is_identity() {
        let samples = vec![1, -2, 3];
        assert_eq!(downmix(&samples, 1), samples);
    }

    #[test]
    fn downmix_stereo_averages_pairs() {
        let samples = vec![100, 200, -100, -300];
        assert_eq!(downmix(&samples, 2), vec![150, -200]);
    }

    #[test]
    fn downmix_handles_trailing_partial_frame() {
        // A truncated final frame is averaged over what is present.
        let samples = vec![10, 20, 30];
        assert_eq!(downmix(&samples, 2), vec![15, 30]);
    }
}

//! Audio module for microphone recording

mod recorder;

pub use recorder::{input_device_available, record, RecordedAudio};

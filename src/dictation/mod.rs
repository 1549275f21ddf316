//! Optional speech-to-text capability

mod client;

pub use client::{DictationClient, DictationError};

//! voxpad - Voice-enabled input pad
//!
//! An interactive input line that accepts typed or dictated text and relays
//! each submission to a local logging endpoint, which best-effort forwards it
//! to an external sink.

pub mod audio;
pub mod capture;
pub mod data;
pub mod dictation;
pub mod relay;

pub use data::AppConfig;
pub use dictation::{DictationClient, DictationError};
pub use relay::{Forwarder, RelayClient};

//! Submission relay: local logging endpoint plus the client that feeds it

mod client;
mod forwarder;
pub mod server;
pub mod types;

pub use client::RelayClient;
pub use forwarder::Forwarder;

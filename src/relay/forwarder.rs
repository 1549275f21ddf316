//! Best-effort forwarding to the external sink
//!
//! Single attempt per payload, response ignored. The sink URL is a stub
//! interface; transport failures are the caller's to log.

use serde_json::Value;

/// Forwards accepted payloads to the configured external sink
pub struct Forwarder {
    client: reqwest::Client,
    sink_url: String,
}

impl Forwarder {
    pub fn new(sink_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            sink_url,
        }
    }

    /// The configured sink URL
    pub fn sink_url(&self) -> &str {
        &self.sink_url
    }

    /// Forward a payload to the sink. One attempt, no retry; the response
    /// body and status are ignored.
    pub async fn forward(&self, payload: &Value) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.sink_url)
            .json(payload)
            .send()
            .await?;
        Ok(())
    }
}

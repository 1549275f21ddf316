//! Relay submission client
//!
//! Fire-and-forget from the capture loop's perspective: the caller spawns the
//! submission, logs a failure, and never retries. No timeout is set on the
//! call.

use crate::relay::types::LogRequest;

/// Posts captured utterances to the relay endpoint
pub struct RelayClient {
    client: reqwest::Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
        }
    }

    /// Submit one utterance. The response body is ignored; only transport
    /// failures surface, and the caller swallows those too.
    pub async fn submit(&self, input: &str) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.relay_url)
            .json(&LogRequest {
                input: input.to_string(),
            })
            .send()
            .await?;
        Ok(())
    }
}

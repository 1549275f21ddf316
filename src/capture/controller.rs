//! Capture Controller
//!
//! Coordinates the editor thread, relay submissions, and dictation sessions.
//! Submissions are fire-and-forget; dictation runs one session at a time.

use crate::capture::{editor, EditorCmd, EditorEvent};
use crate::data::AppConfig;
use crate::dictation::{DictationClient, DictationError};
use crate::relay::RelayClient;
use anyhow::Result;
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, error, info, warn};

/// Tracks the single allowed dictation session
struct DictationGate {
    listening: bool,
}

impl DictationGate {
    fn new() -> Self {
        Self { listening: false }
    }

    /// Claim the session slot. Returns false while a session is active;
    /// a second start request is a no-op, not queued.
    fn try_begin(&mut self) -> bool {
        if self.listening {
            false
        } else {
            self.listening = true;
            true
        }
    }

    fn finish(&mut self) {
        self.listening = false;
    }
}

/// Run the capture mode until the user quits
pub async fn run(config: AppConfig) -> Result<()> {
    let dictation = DictationClient::detect(&config.dictation).map(Arc::new);
    let voice_enabled = dictation.is_some();

    let (event_tx, mut event_rx) = tokio_mpsc::channel::<EditorEvent>(16);
    let (cmd_tx, cmd_rx) = std_mpsc::channel::<EditorCmd>();
    let (outcome_tx, mut outcome_rx) = tokio_mpsc::channel::<Result<String, DictationError>>(1);

    let relay = Arc::new(RelayClient::new(config.capture.relay_url.clone()));

    let editor_handle =
        tokio::task::spawn_blocking(move || editor::run(event_tx, cmd_rx, voice_enabled));

    let mut gate = DictationGate::new();

    loop {
        tokio::select! {
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(EditorEvent::Submit(text)) => {
                        info!("User input: {:?}", text);
                        let relay = relay.clone();
                        tokio::spawn(async move {
                            if let Err(e) = relay.submit(&text).await {
                                error!("Failed to log response: {}", e);
                            }
                        });
                    }
                    Some(EditorEvent::DictateRequested) => {
                        if !gate.try_begin() {
                            debug!("Dictation session already listening, ignoring start request");
                            continue;
                        }
                        let Some(client) = dictation.clone() else {
                            // The editor never reports this chord when the
                            // affordance is disabled.
                            gate.finish();
                            continue;
                        };
                        let _ = cmd_tx.send(EditorCmd::Notice("listening...".to_string()));
                        let outcome_tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let _ = outcome_tx.send(client.dictate().await).await;
                        });
                    }
                    Some(EditorEvent::Quit) | None => break,
                }
            }
            Some(outcome) = outcome_rx.recv() => {
                gate.finish();
                match outcome {
                    Ok(text) => {
                        debug!("Dictation transcript: {:?}", text);
                        let _ = cmd_tx.send(EditorCmd::SetInput(text));
                    }
                    Err(e) => {
                        warn!("Dictation session failed: {}", e);
                        let _ = cmd_tx.send(EditorCmd::Notice(format!("dictation failed: {}", e)));
                    }
                }
            }
        }
    }

    drop(cmd_tx);
    editor_handle.await??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_start_while_listening_is_rejected() {
        let mut gate = DictationGate::new();
        assert!(gate.try_begin());
        assert!(!gate.try_begin());
    }

    #[test]
    fn gate_reopens_after_session_ends() {
        let mut gate = DictationGate::new();
        assert!(gate.try_begin());
        gate.finish();
        assert!(gate.try_begin());
    }
}

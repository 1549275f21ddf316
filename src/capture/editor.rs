//! Line editor for the input pad
//!
//! Runs on a blocking thread in raw mode, owning the current text value.
//! Keystrokes edit the buffer, Enter submits it, Ctrl+R asks the controller
//! for a dictation session when the voice affordance is enabled.

use crate::capture::{EditorCmd, EditorEvent};
use anyhow::Result;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Write};
use std::sync::mpsc as std_mpsc;
use std::time::Duration;
use tokio::sync::mpsc as tokio_mpsc;

/// Restores the terminal on every exit path, panics included
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Run the editor loop until quit. Blocking; run on a blocking thread.
pub fn run(
    events: tokio_mpsc::Sender<EditorEvent>,
    cmds: std_mpsc::Receiver<EditorCmd>,
    voice_enabled: bool,
) -> Result<()> {
    if voice_enabled {
        println!("Type and press Enter to submit. Ctrl+R to dictate. Esc to quit.");
    } else {
        println!("Type and press Enter to submit. Esc to quit.");
    }

    let _guard = RawModeGuard::new()?;
    let mut buffer = String::new();
    let mut notice: Option<String> = None;
    redraw(&buffer, notice.take())?;

    'outer: loop {
        let mut dirty = false;

        loop {
            match cmds.try_recv() {
                Ok(EditorCmd::SetInput(text)) => {
                    buffer = text;
                    dirty = true;
                }
                Ok(EditorCmd::Notice(text)) => {
                    notice = Some(text);
                    dirty = true;
                }
                Err(std_mpsc::TryRecvError::Empty) => break,
                // Controller gone; nothing left to submit to.
                Err(std_mpsc::TryRecvError::Disconnected) => break 'outer,
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match apply_key(&mut buffer, &key, voice_enabled) {
                        KeyAction::Ignored => {}
                        KeyAction::Edited => dirty = true,
                        KeyAction::Report(editor_event) => {
                            dirty = true;
                            let quit = matches!(editor_event, EditorEvent::Quit);
                            if events.blocking_send(editor_event).is_err() {
                                break;
                            }
                            if quit {
                                break;
                            }
                        }
                    }
                }
            }
        }

        if dirty {
            redraw(&buffer, notice.take())?;
        }
    }

    // Leave the shell on a fresh line
    let mut stdout = io::stdout();
    write!(stdout, "\r\n")?;
    stdout.flush()?;
    Ok(())
}

/// Effect of one key press; only `Edited` and `Report` warrant a redraw.
#[derive(Debug)]
enum KeyAction {
    Ignored,
    Edited,
    Report(EditorEvent),
}

/// Apply one key press to the buffer.
///
/// Ctrl+R is inert when the voice affordance is disabled: the control is
/// simply not offered. Keys the editor does not handle are ignored without
/// touching the screen.
fn apply_key(buffer: &mut String, key: &KeyEvent, voice_enabled: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Report(EditorEvent::Quit),
            KeyCode::Char('r') if voice_enabled => KeyAction::Report(EditorEvent::DictateRequested),
            _ => KeyAction::Ignored,
        };
    }

    match key.code {
        // Submission clears the buffer unconditionally; outcome never
        // feeds back into the editor.
        KeyCode::Enter => KeyAction::Report(EditorEvent::Submit(std::mem::take(buffer))),
        KeyCode::Esc => KeyAction::Report(EditorEvent::Quit),
        KeyCode::Backspace => {
            if buffer.pop().is_some() {
                KeyAction::Edited
            } else {
                KeyAction::Ignored
            }
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            KeyAction::Edited
        }
        _ => KeyAction::Ignored,
    }
}

/// Redraw the prompt line; a pending notice scrolls up as its own line.
fn redraw(buffer: &str, notice: Option<String>) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    if let Some(text) = notice {
        write!(stdout, "[{}]\r\n", text)?;
    }
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn keystrokes_edit_the_buffer() {
        let mut buffer = String::new();
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Char('h')), false),
            KeyAction::Edited
        ));
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Char('i')), false),
            KeyAction::Edited
        ));
        assert_eq!(buffer, "hi");

        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Backspace), false),
            KeyAction::Edited
        ));
        assert_eq!(buffer, "h");
    }

    #[test]
    fn unhandled_keys_do_not_trigger_a_redraw() {
        let mut buffer = "hi".to_string();
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Up), false),
            KeyAction::Ignored
        ));
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::F(5)), false),
            KeyAction::Ignored
        ));
        assert!(matches!(
            apply_key(&mut buffer, &ctrl('x'), true),
            KeyAction::Ignored
        ));
        assert_eq!(buffer, "hi");

        // Backspace on an empty buffer changes nothing either.
        buffer.clear();
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Backspace), false),
            KeyAction::Ignored
        ));
    }

    #[test]
    fn enter_submits_and_clears_regardless_of_outcome() {
        let mut buffer = "turn left".to_string();
        match apply_key(&mut buffer, &press(KeyCode::Enter), false) {
            KeyAction::Report(EditorEvent::Submit(text)) => assert_eq!(text, "turn left"),
            other => panic!("expected submit, got {:?}", other),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_submit_is_allowed() {
        let mut buffer = String::new();
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Enter), false),
            KeyAction::Report(EditorEvent::Submit(text)) if text.is_empty()
        ));
    }

    #[test]
    fn voice_chord_requires_the_affordance() {
        let mut buffer = String::new();
        assert!(matches!(
            apply_key(&mut buffer, &ctrl('r'), false),
            KeyAction::Ignored
        ));
        assert!(matches!(
            apply_key(&mut buffer, &ctrl('r'), true),
            KeyAction::Report(EditorEvent::DictateRequested)
        ));
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let mut buffer = String::new();
        assert!(matches!(
            apply_key(&mut buffer, &press(KeyCode::Esc), false),
            KeyAction::Report(EditorEvent::Quit)
        ));
        assert!(matches!(
            apply_key(&mut buffer, &ctrl('c'), true),
            KeyAction::Report(EditorEvent::Quit)
        ));
    }
}

//! Input capture: the interactive pad and its controller

mod controller;
mod editor;

pub use controller::run;

/// Events the editor thread reports to the controller
#[derive(Debug)]
pub enum EditorEvent {
    /// Enter was pressed; carries the buffer contents (now cleared)
    Submit(String),
    /// The voice chord was pressed while the affordance is enabled
    DictateRequested,
    /// Esc or Ctrl+C
    Quit,
}

/// Commands the controller sends back to the editor thread
#[derive(Debug)]
pub enum EditorCmd {
    /// Replace the line buffer wholesale (dictation result)
    SetInput(String),
    /// Transient one-line notice above the prompt
    Notice(String),
}

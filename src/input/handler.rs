//! Input event handler for polling and processing keyboard events.

use super::keys::{map_key_event, InputEvent};
use crate::command::Interpreter;
use crate::document::TextBuffer;
use crate::editor::state::MessageLevel;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Stdin};
use std::time::Duration;
use termion::event::Event;
use termion::input::{Events, TermRead};

/// Event source for reading terminal events.
///
/// This enum wraps the events iterator to maintain its state across
/// multiple calls, preventing character loss during rapid input (paste).
enum EventSource {
    /// Reading from stdin
    Stdin(Events<Stdin>),
    /// Reading from /dev/tty (when stdin was piped)
    Tty(Events<File>),
}

/// Handles terminal input events and drives the interpreter.
///
/// The InputHandler polls for termion events, converts them to
/// high-level InputEvents and applies them to the buffer, mostly by
/// passing keystrokes to the [`Interpreter`].
pub struct InputHandler {
    /// Event source iterator (maintains position in input buffer)
    events: EventSource,
    /// Set after a quit was refused because of unsaved changes
    quit_warned: bool,
}

impl InputHandler {
    /// Creates a new InputHandler that reads from stdin.
    ///
    /// # Example
    ///
    /// ```
    /// use keyquill::input::InputHandler;
    ///
    /// let handler = InputHandler::new();
    /// ```
    pub fn new() -> Self {
        Self {
            events: EventSource::Stdin(io::stdin().events()),
            quit_warned: false,
        }
    }

    /// Creates a new InputHandler that reads from /dev/tty.
    /// Use this when stdin has been consumed for piped data.
    pub fn new_with_tty() -> Result<Self> {
        let tty_file = File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("Failed to open /dev/tty for keyboard input")?;

        Ok(Self {
            events: EventSource::Tty(tty_file.events()),
            quit_warned: false,
        })
    }

    /// Polls for a terminal event.
    ///
    /// Returns Some(Event) if an event occurred, None if the input ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the event system fails
    pub fn poll_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        // The stored iterator keeps its place in the input buffer across calls.
        match &mut self.events {
            EventSource::Stdin(events) => {
                if let Some(event_result) = events.next() {
                    return Ok(Some(event_result?));
                }
            }
            EventSource::Tty(events) => {
                if let Some(event_result) = events.next() {
                    return Ok(Some(event_result?));
                }
            }
        }

        Ok(None)
    }

    /// Handles a terminal event.
    ///
    /// Returns Ok(true) if the application should quit. Quitting with unsaved
    /// changes is refused once with a warning; a second quit goes through.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use keyquill::command::Interpreter;
    /// use keyquill::config::Config;
    /// use keyquill::document::TextBuffer;
    /// use keyquill::input::InputHandler;
    /// use termion::event::{Event, Key};
    ///
    /// let mut handler = InputHandler::new();
    /// let mut interpreter = Interpreter::new(Config::default());
    /// let mut buffer = TextBuffer::new();
    /// let event = Event::Key(Key::Ctrl('q'));
    /// let should_quit = handler.handle_event(event, &mut interpreter, &mut buffer).unwrap();
    /// assert!(should_quit);
    /// ```
    pub fn handle_event(
        &mut self,
        event: Event,
        interpreter: &mut Interpreter,
        buffer: &mut TextBuffer,
    ) -> Result<bool> {
        let input_event = map_key_event(event, &interpreter.mode());
        if input_event != InputEvent::Quit {
            self.quit_warned = false;
        }

        match input_event {
            InputEvent::Quit => {
                if buffer.is_dirty() && !self.quit_warned {
                    self.quit_warned = true;
                    interpreter.state_mut().set_message(
                        "No write since last change (press Ctrl-q again to quit)".to_string(),
                        MessageLevel::Warning,
                    );
                    return Ok(false);
                }
                return Ok(true);
            }
            InputEvent::Keystroke(text) => {
                interpreter.handle_keystroke(Some(buffer), &text);
            }
            InputEvent::Escape => {
                interpreter.force_normal_mode(Some(buffer));
            }
            InputEvent::Backspace => {
                if let Err(e) = buffer.backspace() {
                    interpreter
                        .state_mut()
                        .set_message(format!("{:#}", e), MessageLevel::Error);
                }
            }
            InputEvent::Save => {
                let message = match buffer.save() {
                    Ok(()) => (
                        format!(
                            "Wrote {}",
                            buffer
                                .filename()
                                .map(|p| p.display().to_string())
                                .unwrap_or_default()
                        ),
                        MessageLevel::Info,
                    ),
                    Err(e) => (format!("{:#}", e), MessageLevel::Error),
                };
                interpreter.state_mut().set_message(message.0, message.1);
            }
            InputEvent::ToggleEnabled => {
                interpreter.toggle_enabled(Some(buffer));
                let text = if interpreter.is_enabled() {
                    "Modal editing on"
                } else {
                    "Modal editing off"
                };
                interpreter
                    .state_mut()
                    .set_message(text.to_string(), MessageLevel::Info);
            }
            InputEvent::Unknown => {}
        }

        Ok(false)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

//! UI module for the keyquill terminal interface.
//!
//! This module provides the main UI structure for rendering the terminal interface,
//! including layout management and widget composition.
pub mod buffer_view;
pub mod message_area;
pub mod palette;
pub mod status_line;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::command::Interpreter;
use crate::document::TextBuffer;
use palette::Palette;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three main areas:
/// - Buffer view (top): the text with gutter, selection and cursor
/// - Status line (middle): mode, file info, pending keys and cursor position
/// - Message area (bottom): notifications
///
/// # Example
///
/// ```
/// use keyquill::command::Interpreter;
/// use keyquill::config::Config;
/// use keyquill::document::TextBuffer;
/// use keyquill::ui::UI;
/// use ratatui::backend::TestBackend;
/// use ratatui::Terminal;
///
/// let ui = UI::new();
/// let interpreter = Interpreter::new(Config::default());
/// let mut buffer = TextBuffer::from_text("hello");
/// let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
/// ui.render(&mut terminal, &interpreter, &mut buffer).unwrap();
/// ```
pub struct UI {
    colors: Palette,
}

impl UI {
    pub fn new() -> Self {
        Self {
            colors: Palette::default(),
        }
    }

    pub fn with_palette(colors: Palette) -> Self {
        Self { colors }
    }

    /// Renders the UI to the terminal.
    ///
    /// The buffer's viewport height is updated to the size of the text area
    /// before drawing so scrolling follows the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        interpreter: &Interpreter,
        buffer: &mut TextBuffer,
    ) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Buffer view
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            buffer.set_viewport_height(chunks[0].height as usize);

            buffer_view::render_buffer_view(
                f,
                chunks[0],
                buffer,
                interpreter.config().show_line_numbers,
                &self.colors,
            );
            status_line::render_status_line(f, chunks[1], interpreter, buffer, &self.colors);
            message_area::render_message_area(f, chunks[2], interpreter.message(), &self.colors);
        })?;

        Ok(())
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

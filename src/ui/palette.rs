//! Colors used by the terminal UI.

use ratatui::style::Color;

/// Every color the widgets draw with.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Main background color for the editor.
    pub background: Color,
    /// Main foreground/text color for the editor.
    pub foreground: Color,
    /// Line number gutter.
    pub gutter: Color,
    /// Visual selection background.
    pub selection: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,
    /// Mode badge in NORMAL mode.
    pub mode_normal: Color,
    /// Mode badge in INSERT mode.
    pub mode_insert: Color,
    /// Mode badge in VISUAL mode.
    pub mode_visual: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            gutter: Color::DarkGray,
            selection: Color::Rgb(68, 71, 90),
            status_line_bg: Color::Rgb(40, 42, 54),
            status_line_fg: Color::Gray,
            mode_normal: Color::Blue,
            mode_insert: Color::Green,
            mode_visual: Color::Magenta,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

//! The single-slot register used by yank, delete and paste.
//!
//! Every delete or yank overwrites the slot; paste only reads it. Content is
//! tagged line-wise or character-wise because paste behaves differently for
//! each. When the register is mirrored to the host clipboard the tag travels
//! as a marker prefix, so content read back from the clipboard can be pasted
//! the same way.

/// Prefix marking line-wise register content on the clipboard.
pub const LINE_WISE_MARKER: char = '\u{1e}';

/// Content stored in the register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterContent {
    pub text: String,
    pub line_wise: bool,
}

impl RegisterContent {
    /// Creates register content. Line-wise text loses its trailing line
    /// terminators; char-wise text is kept exactly.
    ///
    /// ```
    /// use keyquill::editor::registers::RegisterContent;
    ///
    /// let content = RegisterContent::new("first line\n", true);
    /// assert_eq!(content.text, "first line");
    /// assert!(content.line_wise);
    ///
    /// let content = RegisterContent::new("word\n", false);
    /// assert_eq!(content.text, "word\n");
    /// ```
    pub fn new(text: &str, line_wise: bool) -> Self {
        let text = if line_wise {
            text.trim_end_matches(['\n', '\r'])
        } else {
            text
        };
        Self {
            text: text.to_string(),
            line_wise,
        }
    }

    /// Decodes clipboard text, recognising the line-wise marker.
    pub fn from_clipboard_text(text: &str) -> Self {
        match text.strip_prefix(LINE_WISE_MARKER) {
            Some(rest) => Self::new(rest, true),
            None => Self {
                text: text.to_string(),
                line_wise: false,
            },
        }
    }

    /// Encodes the content for the clipboard.
    pub fn to_clipboard_text(&self) -> String {
        if self.line_wise {
            format!("{}{}", LINE_WISE_MARKER, self.text)
        } else {
            self.text.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.line_wise
    }
}

/// The single register slot.
#[derive(Debug, Clone, Default)]
pub struct Register {
    content: Option<RegisterContent>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot.
    pub fn store(&mut self, content: RegisterContent) {
        self.content = Some(content);
    }

    /// Current content, `None` until the first yank or delete.
    pub fn get(&self) -> Option<&RegisterContent> {
        self.content.as_ref()
    }
}

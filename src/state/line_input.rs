//! Single-line text buffer edited by command prompts.
//!
//! Editing happens only at the end of the buffer: runes append, backspace
//! removes the last rune, and word-delete removes the previous word.

/// Text typed into a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
}

impl LineInput {
    /// Buffer seeded with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the buffer.
    pub fn into_text(self) -> String {
        self.text
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove the last character.
    pub fn delete_last_char(&mut self) {
        self.text.pop();
    }

    /// Remove trailing spaces, then the word before them.
    pub fn delete_prev_word(&mut self) {
        let trimmed = self.text.trim_end_matches(' ').len();
        self.text.truncate(trimmed);
        let word_start = self
            .text
            .rfind(' ')
            .map(|idx| idx + ' '.len_utf8())
            .unwrap_or(0);
        self.text.truncate(word_start);
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

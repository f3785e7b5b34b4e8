//! Editable expression buffer with a cursor/selection.
//!
//! The buffer is never empty: the literal `"0"` is the placeholder state
//! meaning no real input has been entered yet. Positions are measured in
//! characters, not bytes, because the display glyphs (`×`, `÷`, `√`) are
//! multi-byte in UTF-8.

/// Expression text plus a selection range.
///
/// `start == end` is a caret; `start < end` marks a range that the next
/// insertion or backspace consumes.
#[derive(Clone, Debug)]
pub struct InputBuffer {
    text: String,
    start: usize,
    end: usize,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    /// Create a buffer in the placeholder state (`"0"`, caret after it).
    pub fn new() -> Self {
        Self {
            text: "0".to_string(),
            start: 1,
            end: 1,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current selection as `(start, end)` in characters.
    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Whether the buffer is still the untouched placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.text == "0"
    }

    /// Move the selection, clamped to `0 <= start <= end <= len`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.end = end.min(len);
        self.start = start.min(self.end);
    }

    /// Insert `text` at the selection.
    ///
    /// While the buffer is the `"0"` placeholder, any insertion other than
    /// `"."` replaces the whole buffer (so typing `5` yields `"5"`, not
    /// `"05"`); `"."` appends, yielding `"0."`. Otherwise the inserted text
    /// replaces the selected range and the caret lands after it.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.text == "0" && text != "." {
            self.text = text.to_string();
            let len = self.char_len();
            self.start = len;
            self.end = len;
            return;
        }
        let from = self.byte_index(self.start);
        let to = self.byte_index(self.end);
        self.text.replace_range(from..to, text);
        let caret = self.start + text.chars().count();
        self.start = caret;
        self.end = caret;
    }

    /// Backspace at the selection.
    ///
    /// A non-empty selection is deleted outright. A caret at position 0 is a
    /// no-op, as is a caret at position 1 while the buffer is the `"0"`
    /// placeholder (the placeholder digit is not deletable). Otherwise the
    /// character before the caret is removed. A buffer left empty by any of
    /// these is reset to the placeholder.
    pub fn delete(&mut self) {
        if self.start != self.end {
            let from = self.byte_index(self.start);
            let to = self.byte_index(self.end);
            self.text.replace_range(from..to, "");
            self.end = self.start;
        } else {
            if self.start == 0 {
                return;
            }
            if self.text == "0" && self.start == 1 {
                return;
            }
            let from = self.byte_index(self.start - 1);
            let to = self.byte_index(self.start);
            self.text.replace_range(from..to, "");
            self.start -= 1;
            self.end = self.start;
        }
        if self.text.is_empty() {
            self.reset_to("0");
        }
    }

    /// Reset to the placeholder state.
    pub fn clear(&mut self) {
        self.reset_to("0");
    }

    /// Replace the whole buffer (used when a result is committed), caret at
    /// the end.
    pub fn reset_to(&mut self, text: &str) {
        self.text = text.to_string();
        let len = self.char_len();
        self.start = len;
        self.end = len;
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character position `pos` (clamped to the end).
    fn byte_index(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

//! The calculator state machine.
//!
//! Consumes abstract key events from a host UI, owns the expression buffer
//! and the memory register, and reports everything observable back in an
//! [`Update`]. One key event is one synchronous unit of work: mutate,
//! normalize, evaluate, report.

use tracing::debug;

use crate::buffer::InputBuffer;
use crate::evaluation::{self, Outcome};
use crate::memory::MemoryRegister;
use crate::normalize::normalize;

/// An abstract keypad press. Payloads carry the literal glyph to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Dot,
    /// Binary operator glyph: `+`, `-`, `×`, `÷`, `%`.
    Operator(char),
    /// Function prefix, e.g. `"sqrt("` or `"log10("`.
    Function(String),
    Paren(char),
    Backspace,
    Clear,
    Equals,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
}

/// Transient notification for a memory operation (the host typically shows
/// these as toasts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    MemoryAdded,
    MemorySubtracted,
    MemoryCleared,
}

/// A committed evaluation: the expression as it stood when equals was
/// pressed, and the result that replaced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed {
    pub expression: String,
    pub result: String,
}

/// Everything the host can observe after one key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    /// Current buffer text.
    pub expression: String,
    /// Current selection in characters.
    pub cursor: (usize, usize),
    /// Live preview, or `"Error"` after a failed equals. Blank while the
    /// buffer is the placeholder or the input is not yet evaluable.
    pub preview: String,
    /// Set only when an equals press produced a value.
    pub committed: Option<Committed>,
    /// Set only by memory add/subtract/clear.
    pub notice: Option<Notice>,
}

/// Calculator engine: buffer, memory register, and key dispatch.
#[derive(Debug, Default)]
pub struct Calculator {
    buffer: InputBuffer,
    memory: MemoryRegister,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to the buffer, for hosts that move the cursor.
    pub fn buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.buffer
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Process one key press and report the new observable state.
    pub fn on_key(&mut self, key: Key) -> Update {
        debug!(?key, "key pressed");
        match key {
            Key::Digit(c) => self.insert(&c.to_string()),
            Key::Dot => self.insert("."),
            Key::Operator(c) => self.insert(&c.to_string()),
            Key::Function(text) => self.insert(&text),
            Key::Paren(c) => self.insert(&c.to_string()),
            Key::Backspace => {
                self.buffer.delete();
                self.update(None, None)
            }
            Key::Clear => {
                self.buffer.clear();
                self.update(None, None)
            }
            Key::Equals => self.equals(),
            Key::MemoryAdd => {
                let x = self.current_value();
                self.memory.add(x);
                self.update(None, Some(Notice::MemoryAdded))
            }
            Key::MemorySubtract => {
                let x = self.current_value();
                self.memory.subtract(x);
                self.update(None, Some(Notice::MemorySubtracted))
            }
            Key::MemoryRecall => {
                let recalled = evaluation::format_number(self.memory.recall());
                self.insert(&recalled)
            }
            Key::MemoryClear => {
                self.memory.clear();
                self.update(None, Some(Notice::MemoryCleared))
            }
        }
    }

    fn insert(&mut self, text: &str) -> Update {
        self.buffer.insert(text);
        self.update(None, None)
    }

    fn equals(&mut self) -> Update {
        let expression = self.buffer.text().to_string();
        match evaluation::evaluate(&normalize(&expression), true) {
            Outcome::Value(result) => {
                self.buffer.reset_to(&result);
                let committed = Committed { expression, result };
                debug!(
                    expression = committed.expression.as_str(),
                    result = committed.result.as_str(),
                    "committed"
                );
                self.update(Some(committed), None)
            }
            // Buffer and cursor stay as typed so the user can fix the input.
            Outcome::Error => Update {
                expression: self.buffer.text().to_string(),
                cursor: self.buffer.selection(),
                preview: "Error".to_string(),
                committed: None,
                notice: None,
            },
            Outcome::Empty => self.update(None, None),
        }
    }

    /// Live value of the buffer, as the memory keys see it: the formatted
    /// preview parsed back, defaulting to 0 when there is nothing evaluable.
    fn current_value(&self) -> f64 {
        match evaluation::evaluate(&normalize(self.buffer.text()), false) {
            Outcome::Value(s) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn preview(&self) -> String {
        let text = self.buffer.text();
        if text.is_empty() || self.buffer.is_placeholder() {
            return String::new();
        }
        match evaluation::evaluate(&normalize(text), false) {
            Outcome::Value(s) => s,
            _ => String::new(),
        }
    }

    fn update(&self, committed: Option<Committed>, notice: Option<Notice>) -> Update {
        Update {
            expression: self.buffer.text().to_string(),
            cursor: self.buffer.selection(),
            preview: self.preview(),
            committed,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(calc: &mut Calculator, keys: impl IntoIterator<Item = Key>) -> Update {
        let mut last = calc.on_key(Key::Clear);
        for key in keys {
            last = calc.on_key(key);
        }
        last
    }

    #[test]
    fn test_live_preview_follows_typing() {
        let mut calc = Calculator::new();
        let update = type_keys(
            &mut calc,
            [Key::Digit('2'), Key::Operator('+'), Key::Digit('3')],
        );
        assert_eq!(update.expression, "2+3");
        assert_eq!(update.preview, "5");
        assert!(update.committed.is_none());
    }

    #[test]
    fn test_placeholder_has_blank_preview() {
        let mut calc = Calculator::new();
        let update = calc.on_key(Key::Clear);
        assert_eq!(update.expression, "0");
        assert_eq!(update.preview, "");
    }

    #[test]
    fn test_partial_input_preview_is_blank() {
        let mut calc = Calculator::new();
        let update = type_keys(&mut calc, [Key::Digit('5'), Key::Operator('+')]);
        assert_eq!(update.expression, "5+");
        assert_eq!(update.preview, "");
    }

    #[test]
    fn test_equals_commits_result() {
        let mut calc = Calculator::new();
        let update = type_keys(
            &mut calc,
            [
                Key::Digit('6'),
                Key::Operator('×'),
                Key::Digit('7'),
                Key::Equals,
            ],
        );
        assert_eq!(update.expression, "42");
        assert_eq!(update.cursor, (2, 2));
        assert_eq!(
            update.committed,
            Some(Committed {
                expression: "6×7".to_string(),
                result: "42".to_string(),
            })
        );
    }

    #[test]
    fn test_percent_of_addend_end_to_end() {
        let mut calc = Calculator::new();
        let update = type_keys(
            &mut calc,
            [
                Key::Digit('1'),
                Key::Digit('0'),
                Key::Digit('0'),
                Key::Operator('+'),
                Key::Digit('1'),
                Key::Digit('0'),
                Key::Operator('%'),
                Key::Equals,
            ],
        );
        assert_eq!(update.expression, "110");
    }

    #[test]
    fn test_equals_on_error_leaves_buffer() {
        let mut calc = Calculator::new();
        let update = type_keys(
            &mut calc,
            [
                Key::Digit('8'),
                Key::Operator('÷'),
                Key::Digit('0'),
                Key::Equals,
            ],
        );
        assert_eq!(update.expression, "8÷0");
        assert_eq!(update.cursor, (3, 3));
        assert_eq!(update.preview, "Error");
        assert!(update.committed.is_none());
    }

    #[test]
    fn test_equals_on_dangling_operator() {
        let mut calc = Calculator::new();
        let update = type_keys(&mut calc, [Key::Digit('5'), Key::Operator('+'), Key::Equals]);
        assert_eq!(update.expression, "5+");
        assert_eq!(update.preview, "Error");
    }

    #[test]
    fn test_chained_calculation_after_equals() {
        let mut calc = Calculator::new();
        type_keys(
            &mut calc,
            [Key::Digit('2'), Key::Operator('+'), Key::Digit('2'), Key::Equals],
        );
        // Result stays editable; typing an operator extends it.
        let update = calc.on_key(Key::Operator('+'));
        assert_eq!(update.expression, "4+");
        let update = calc.on_key(Key::Digit('1'));
        assert_eq!(calc.on_key(Key::Equals).expression, "5");
        assert_eq!(update.preview, "5");
    }

    #[test]
    fn test_memory_round_trip() {
        let mut calc = Calculator::new();
        let update = type_keys(&mut calc, [Key::Digit('7'), Key::MemoryAdd]);
        assert_eq!(update.notice, Some(Notice::MemoryAdded));
        calc.on_key(Key::Clear);
        let update = calc.on_key(Key::MemoryRecall);
        assert_eq!(update.expression, "7");
    }

    #[test]
    fn test_memory_acts_on_current_preview() {
        let mut calc = Calculator::new();
        // 2+3 on screen: M+ stores 5, not the raw text.
        type_keys(
            &mut calc,
            [Key::Digit('2'), Key::Operator('+'), Key::Digit('3'), Key::MemoryAdd],
        );
        calc.on_key(Key::Clear);
        assert_eq!(calc.on_key(Key::MemoryRecall).expression, "5");
    }

    #[test]
    fn test_memory_subtract_and_clear() {
        let mut calc = Calculator::new();
        type_keys(&mut calc, [Key::Digit('9'), Key::MemoryAdd]);
        let update = type_keys(&mut calc, [Key::Digit('4'), Key::MemorySubtract]);
        assert_eq!(update.notice, Some(Notice::MemorySubtracted));
        calc.on_key(Key::Clear);
        assert_eq!(calc.on_key(Key::MemoryRecall).expression, "5");

        let update = calc.on_key(Key::MemoryClear);
        assert_eq!(update.notice, Some(Notice::MemoryCleared));
        calc.on_key(Key::Clear);
        assert_eq!(calc.on_key(Key::MemoryRecall).expression, "0");
    }

    #[test]
    fn test_memory_defaults_to_zero_on_invalid_buffer() {
        let mut calc = Calculator::new();
        type_keys(&mut calc, [Key::Digit('1'), Key::Operator('+'), Key::MemoryAdd]);
        calc.on_key(Key::Clear);
        assert_eq!(calc.on_key(Key::MemoryRecall).expression, "0");
    }

    #[test]
    fn test_function_key_inserts_prefix() {
        let mut calc = Calculator::new();
        let update = type_keys(
            &mut calc,
            [
                Key::Function("sqrt(".to_string()),
                Key::Digit('9'),
                Key::Paren(')'),
                Key::Equals,
            ],
        );
        assert_eq!(update.expression, "3");
        assert_eq!(
            update.committed.as_ref().map(|c| c.expression.as_str()),
            Some("sqrt(9)")
        );
    }

    #[test]
    fn test_backspace_updates_preview() {
        let mut calc = Calculator::new();
        type_keys(
            &mut calc,
            [Key::Digit('1'), Key::Digit('2'), Key::Operator('+'), Key::Digit('3')],
        );
        let update = calc.on_key(Key::Backspace);
        assert_eq!(update.expression, "12+");
        assert_eq!(update.preview, "");
        let update = calc.on_key(Key::Backspace);
        assert_eq!(update.expression, "12");
        assert_eq!(update.preview, "12");
    }
}

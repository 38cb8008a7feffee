//! In-progress bet draft
//!
//! The draft is the single mutable working state of the composer. Every
//! keystroke, toggle and action transforms it; prices and validity are
//! derived from it by the pure functions in [`crate::pricing`].

use serde::{Deserialize, Serialize};
use shared::{Amount, PlayType, ValidationError, DELIMITER};
use std::collections::BTreeMap;

/// Where keypad input currently goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputTarget {
    #[default]
    Numbers,
    Amounts(PlayType),
}

/// AL (range-fill) state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlMode {
    pub active: bool,
    pub first_number: Option<String>,
}

/// Amount lines typed for one play type
///
/// Line `k` prices the `k`-th token eligible for the type. Parlet only reads
/// its first non-empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBuffer {
    lines: Vec<String>,
    trailing_delimiter: bool,
}

impl AmountBuffer {
    /// Build a buffer from newline-delimited text ("10\n5")
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let trailing_delimiter = text.ends_with(DELIMITER);
        let lines = text
            .trim_end_matches(DELIMITER)
            .split(DELIMITER)
            .map(str::to_string)
            .collect();
        Self {
            lines,
            trailing_delimiter,
        }
    }

    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_delimiter {
            text.push(DELIMITER);
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line keystrokes currently edit, if it has content
    pub fn open_line(&self) -> Option<&str> {
        if self.trailing_delimiter {
            None
        } else {
            self.lines.last().map(String::as_str)
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        match self.lines.last_mut() {
            Some(line) if !self.trailing_delimiter => line.push(c),
            _ => {
                self.lines.push(c.to_string());
                self.trailing_delimiter = false;
            }
        }
    }

    /// Returns false when the delimiter would be a duplicate or close an empty line
    pub(crate) fn push_delimiter(&mut self) -> bool {
        if self.trailing_delimiter || self.lines.is_empty() {
            return false;
        }
        self.trailing_delimiter = true;
        true
    }

    pub(crate) fn backspace(&mut self) -> bool {
        if self.trailing_delimiter {
            self.trailing_delimiter = false;
            return true;
        }
        let Some(line) = self.lines.last_mut() else {
            return false;
        };
        line.pop();
        if line.is_empty() {
            self.lines.pop();
            self.trailing_delimiter = !self.lines.is_empty();
        }
        true
    }

    pub(crate) fn remove_line(&mut self, index: usize) {
        if index >= self.lines.len() {
            return;
        }
        self.lines.remove(index);
        if self.lines.is_empty() {
            self.trailing_delimiter = false;
        }
    }

    /// Every line parsed, unparseable lines as zero
    pub fn amounts(&self) -> Vec<Amount> {
        self.lines.iter().map(|l| Amount::parse_or_zero(l)).collect()
    }

    pub fn sum(&self) -> Result<Amount, ValidationError> {
        Amount::checked_sum(self.amounts())
    }

    /// First non-empty line parsed (zero if none or unparseable)
    pub fn base_amount(&self) -> Amount {
        self.lines
            .iter()
            .find(|l| !l.trim().is_empty())
            .map(|l| Amount::parse_or_zero(l))
            .unwrap_or(Amount::ZERO)
    }

    /// Amount for the `index`-th eligible token
    ///
    /// A single line is shared by every token.
    pub fn amount_for(&self, index: usize) -> Amount {
        match self.lines.as_slice() {
            [only] => Amount::parse_or_zero(only),
            lines => lines
                .get(index)
                .map(|l| Amount::parse_or_zero(l))
                .unwrap_or(Amount::ZERO),
        }
    }
}

/// The bet being composed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub(crate) tokens: Vec<String>,
    pub(crate) trailing_delimiter: bool,
    pub(crate) selected_types: Vec<PlayType>,
    pub(crate) amount_buffers: BTreeMap<PlayType, AmountBuffer>,
    pub(crate) al_mode: AlMode,
    pub(crate) target: InputTarget,
    /// Length the last token had when backspacing into it began; its amount
    /// lines belong to the types that length qualified for
    #[serde(default)]
    pub(crate) edited_len: Option<usize>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from a raw numbers blob ("5\n12\n123")
    pub fn from_numbers(blob: &str) -> Self {
        let mut draft = Self::new();
        draft.set_numbers(blob);
        draft
    }

    pub(crate) fn set_numbers(&mut self, blob: &str) {
        let buffer = AmountBuffer::from_text(blob);
        self.trailing_delimiter = buffer.trailing_delimiter;
        self.tokens = buffer.lines;
        self.edited_len = None;
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The raw numbers blob as the keypad shows it
    pub fn numbers_blob(&self) -> String {
        let mut blob = self.tokens.join("\n");
        if self.trailing_delimiter {
            blob.push(DELIMITER);
        }
        blob
    }

    /// The token still accepting digits, if any
    pub fn open_token(&self) -> Option<&str> {
        if self.trailing_delimiter {
            None
        } else {
            self.tokens.last().map(String::as_str)
        }
    }

    pub fn selected_types(&self) -> &[PlayType] {
        &self.selected_types
    }

    pub fn is_selected(&self, play_type: PlayType) -> bool {
        self.selected_types.contains(&play_type)
    }

    pub fn amount_buffer(&self, play_type: PlayType) -> Option<&AmountBuffer> {
        self.amount_buffers.get(&play_type)
    }

    pub fn amount_buffers(&self) -> &BTreeMap<PlayType, AmountBuffer> {
        &self.amount_buffers
    }

    /// Replace the amount lines of a type with newline-delimited text
    pub fn set_amounts(&mut self, play_type: PlayType, text: &str) {
        self.amount_buffers
            .insert(play_type, AmountBuffer::from_text(text));
    }

    pub fn al_mode(&self) -> &AlMode {
        &self.al_mode
    }

    pub fn target(&self) -> InputTarget {
        self.target
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens `play_type` can be played on, in entry order
    pub fn eligible_tokens(&self, play_type: PlayType) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| play_type.accepts_len(t.len()))
            .map(String::as_str)
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_buffer_text_roundtrip() {
        let buffer = AmountBuffer::from_text("10\n5\n");
        assert_eq!(buffer.lines(), &["10".to_string(), "5".to_string()]);
        assert_eq!(buffer.open_line(), None);
        assert_eq!(buffer.text(), "10\n5\n");
        assert!(AmountBuffer::from_text("").is_empty());
    }

    #[test]
    fn test_amount_buffer_shared_line() {
        let shared = AmountBuffer::from_text("3");
        assert_eq!(shared.amount_for(0), Amount::from_units(3));
        assert_eq!(shared.amount_for(4), Amount::from_units(3));

        let positional = AmountBuffer::from_text("3\n4");
        assert_eq!(positional.amount_for(1), Amount::from_units(4));
        assert_eq!(positional.amount_for(2), Amount::ZERO);
    }

    #[test]
    fn test_amount_buffer_base_amount_skips_blank_lines() {
        let buffer = AmountBuffer::from_text("\n4\n9");
        assert_eq!(buffer.base_amount(), Amount::from_units(4));
        assert_eq!(AmountBuffer::default().base_amount(), Amount::ZERO);
        assert_eq!(AmountBuffer::from_text("x").base_amount(), Amount::ZERO);
    }

    #[test]
    fn test_draft_from_numbers() {
        let draft = Draft::from_numbers("5\n12\n123");
        assert_eq!(draft.tokens(), &["5", "12", "123"]);
        assert_eq!(draft.open_token(), Some("123"));
        assert_eq!(draft.eligible_tokens(PlayType::Fijo), vec!["5", "12"]);
        assert_eq!(draft.eligible_tokens(PlayType::Centena), vec!["123"]);
        assert_eq!(draft.numbers_blob(), "5\n12\n123");
    }
}

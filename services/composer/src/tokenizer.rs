//! Keypad input
//!
//! Turns digit and control keys into the token sequence, or into the amount
//! lines of the active play-type tab. Malformed growth is dropped silently.

use shared::{PlayType, MAX_TOKENS, MAX_TOKEN_DIGITS, TEN_MULTIPLES};

use crate::draft::{Draft, InputTarget};
use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Decimal,
    Delimiter,
    Backspace,
}

impl Key {
    /// Map a typed character to a key (`,` and newline both delimit)
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Key::Digit(d as u8)),
            '.' => Some(Key::Decimal),
            ',' | '\n' => Some(Key::Delimiter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Accepted,
    Ignored,
    /// A 3-digit token just completed; close it with
    /// [`Draft::append_delimiter`] after `AUTO_ADVANCE_DELAY_MS`
    AutoAdvance,
}

impl Draft {
    /// Route a key to the numbers or to the active amount tab
    pub fn press(&mut self, key: Key) -> Result<KeyOutcome> {
        match self.target {
            InputTarget::Numbers => match key {
                Key::Digit(d) => Ok(self.append_digit(d)),
                Key::Decimal => Ok(KeyOutcome::Ignored),
                Key::Delimiter => self.append_delimiter(),
                Key::Backspace => Ok(self.backspace()),
            },
            InputTarget::Amounts(play_type) => Ok(self.press_amount(play_type, key)),
        }
    }

    pub fn append_digit(&mut self, digit: u8) -> KeyOutcome {
        if digit > 9 {
            return KeyOutcome::Ignored;
        }
        let c = char::from(b'0' + digit);

        let open = if self.trailing_delimiter {
            None
        } else {
            self.tokens.last_mut()
        };

        match open {
            Some(token) => {
                if token.len() >= MAX_TOKEN_DIGITS {
                    return KeyOutcome::Ignored;
                }
                if token.len() == 2 && digit == 0 && !TEN_MULTIPLES.contains(&token.as_str()) {
                    return KeyOutcome::Ignored;
                }
                token.push(c);
                if token.len() == MAX_TOKEN_DIGITS && token.parse::<u32>().is_ok() {
                    KeyOutcome::AutoAdvance
                } else {
                    KeyOutcome::Accepted
                }
            }
            None => {
                if self.tokens.len() >= MAX_TOKENS {
                    return KeyOutcome::Ignored;
                }
                self.tokens.push(c.to_string());
                self.trailing_delimiter = false;
                KeyOutcome::Accepted
            }
        }
    }

    /// Close the open token
    ///
    /// With AL pending and a second endpoint typed, this expands the range.
    pub fn append_delimiter(&mut self) -> Result<KeyOutcome> {
        if self.trailing_delimiter || self.tokens.is_empty() {
            return Ok(KeyOutcome::Ignored);
        }
        if self.expand_al_range()? {
            return Ok(KeyOutcome::Accepted);
        }
        self.settle_edited_token();
        self.trailing_delimiter = true;
        Ok(KeyOutcome::Accepted)
    }

    pub fn backspace(&mut self) -> KeyOutcome {
        if self.trailing_delimiter {
            self.trailing_delimiter = false;
            return KeyOutcome::Accepted;
        }
        let Some(token) = self.tokens.last_mut() else {
            return KeyOutcome::Ignored;
        };
        let edited_len = *self.edited_len.get_or_insert(token.len());
        token.pop();
        if token.is_empty() {
            let index = self.tokens.len() - 1;
            self.drop_amount_lines(index, edited_len, 0);
            self.tokens.pop();
            self.edited_len = None;
            self.trailing_delimiter = !self.tokens.is_empty();
            if self.tokens.is_empty() {
                self.al_mode = Default::default();
            }
        }
        KeyOutcome::Accepted
    }

    /// Drop the lines of types the edited last token stopped qualifying for
    pub(crate) fn settle_edited_token(&mut self) {
        let Some(edited_len) = self.edited_len.take() else {
            return;
        };
        if let Some(index) = self.tokens.len().checked_sub(1) {
            let len = self.tokens[index].len();
            self.drop_amount_lines(index, edited_len, len);
        }
    }

    /// Remove the line that priced the token at `index` from every type a
    /// `from_len` token qualifies for and a `to_len` token does not
    fn drop_amount_lines(&mut self, index: usize, from_len: usize, to_len: usize) {
        for (play_type, buffer) in self.amount_buffers.iter_mut() {
            if *play_type == PlayType::Parlet
                || !play_type.accepts_len(from_len)
                || play_type.accepts_len(to_len)
            {
                continue;
            }
            let position = self.tokens[..index]
                .iter()
                .filter(|t| play_type.accepts_len(t.len()))
                .count();
            buffer.remove_line(position);
        }
    }

    fn press_amount(&mut self, play_type: PlayType, key: Key) -> KeyOutcome {
        let buffer = self.amount_buffers.entry(play_type).or_default();
        let accepted = match key {
            Key::Digit(d) if d <= 9 => {
                buffer.push_char(char::from(b'0' + d));
                true
            }
            Key::Digit(_) => false,
            Key::Decimal => {
                let has_room = matches!(
                    buffer.open_line(),
                    Some(line) if !line.is_empty() && !line.contains('.')
                );
                if has_room {
                    buffer.push_char('.');
                }
                has_room
            }
            Key::Delimiter => buffer.push_delimiter(),
            Key::Backspace => buffer.backspace(),
        };
        if accepted {
            KeyOutcome::Accepted
        } else {
            KeyOutcome::Ignored
        }
    }
}

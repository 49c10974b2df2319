use tracing::debug;
use unicode_width::UnicodeWidthStr;

pub const PLACEHOLDER: &str = "Enter duration in seconds";

/// Parses a duration in whole seconds.
///
/// Only plain ASCII digits count. Empty, signed, fractional, padded or
/// overflowing text is not a duration.
pub fn parse_duration(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u64>().ok()
}

/// Numeric text field holding the duration the user is typing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DurationInput {
    text: String,
}

impl DurationInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(secs: u64) -> Self {
        Self {
            text: secs.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display width of the current text, used to place the terminal cursor
    pub fn width(&self) -> usize {
        self.text.width()
    }

    pub fn value(&self) -> Option<u64> {
        parse_duration(&self.text)
    }

    /// Appends `c` and re-validates. Returns the parsed value after the edit.
    pub fn push(&mut self, c: char) -> Option<u64> {
        self.text.push(c);
        self.revalidate()
    }

    pub fn backspace(&mut self) -> Option<u64> {
        self.text.pop();
        self.revalidate()
    }

    // an invalid buffer is dropped so the field shows its empty state
    fn revalidate(&mut self) -> Option<u64> {
        let value = self.value();
        if value.is_none() && !self.text.is_empty() {
            debug!(text = %self.text, "discarding invalid duration input");
            self.text.clear();
        }
        value
    }
}

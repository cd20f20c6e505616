use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Half-open byte range `[start, end)` into a document's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    pub fn empty(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `position` is inside the span (the end is exclusive)
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for TextSpan {
    fn from(range: Range<usize>) -> Self {
        Self::from_bounds(range.start, range.end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// A single text change plus the caret position it leaves behind.
///
/// This is the only thing the continuation engine produces. The caret
/// offset is relative to the start of the replaced span, so it always
/// lands inside the inserted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub replace_span: TextSpan,
    pub new_text: String,
    pub caret_offset: usize,
}

impl Edit {
    pub fn replace(replace_span: TextSpan, new_text: String, caret_offset: usize) -> Self {
        assert!(
            caret_offset <= new_text.len(),
            "caret offset {caret_offset} exceeds inserted text of {} bytes",
            new_text.len()
        );
        Self {
            replace_span,
            new_text,
            caret_offset,
        }
    }

    pub fn insert(position: usize, new_text: String, caret_offset: usize) -> Self {
        Self::replace(TextSpan::empty(position), new_text, caret_offset)
    }

    /// Absolute caret position once the edit has been applied
    pub fn caret_position(&self) -> usize {
        self.replace_span.start + self.caret_offset
    }

    /// Apply to an owned string, mostly useful for previews and tests
    pub fn apply_to(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() + self.new_text.len());
        result.push_str(&text[..self.replace_span.start]);
        result.push_str(&self.new_text);
        result.push_str(&text[self.replace_span.end..]);
        result
    }
}

/// What a gesture handler did with the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// An edit was computed and applied
    Handled,
    /// Nothing beyond the default behavior happened
    NotHandled,
}

impl CommandOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, CommandOutcome::Handled)
    }
}

/// Enablement of the explicit "insert comment" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Available,
    Unavailable,
}

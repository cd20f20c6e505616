//! Physical line model over a text snapshot
//!
//! Lines are split on `\r\n`, `\n` and a lone `\r`. A trailing line break
//! produces a final empty line, the same way editors number lines.

use super::indentation;
use crate::types::TextSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineInfo {
    start: usize,
    end: usize,
    end_including_break: usize,
}

/// Line index for one immutable text snapshot
#[derive(Debug, Clone)]
pub struct TextLines<'a> {
    text: &'a str,
    lines: Vec<LineInfo>,
}

/// One physical line, without its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine<'a> {
    pub number: usize,
    pub start: usize,
    pub end: usize,
    pub end_including_break: usize,
    text: &'a str,
}

impl<'a> TextLines<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut idx = 0;

        while idx < bytes.len() {
            match bytes[idx] {
                b'\r' if bytes.get(idx + 1) == Some(&b'\n') => {
                    lines.push(LineInfo {
                        start,
                        end: idx,
                        end_including_break: idx + 2,
                    });
                    idx += 2;
                    start = idx;
                }
                b'\r' | b'\n' => {
                    lines.push(LineInfo {
                        start,
                        end: idx,
                        end_including_break: idx + 1,
                    });
                    idx += 1;
                    start = idx;
                }
                _ => idx += 1,
            }
        }

        lines.push(LineInfo {
            start,
            end: bytes.len(),
            end_including_break: bytes.len(),
        });

        Self { text, lines }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        // There is always at least one (possibly empty) line
        false
    }

    pub fn get(&self, number: usize) -> Option<TextLine<'a>> {
        self.lines.get(number).map(|info| TextLine {
            number,
            start: info.start,
            end: info.end,
            end_including_break: info.end_including_break,
            text: &self.text[info.start..info.end],
        })
    }

    /// Line containing `position`. Positions on a line break belong to the
    /// line the break terminates; `position == len` maps to the last line.
    pub fn line_from_position(&self, position: usize) -> TextLine<'a> {
        let position = position.min(self.text.len());
        let number = match self
            .lines
            .binary_search_by(|info| info.start.cmp(&position))
        {
            Ok(number) => number,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        let last = self.lines.len() - 1;
        let number = number.min(last);
        self.get(number).unwrap_or_else(|| self.last_line())
    }

    fn last_line(&self) -> TextLine<'a> {
        let number = self.lines.len() - 1;
        let info = self.lines[number];
        TextLine {
            number,
            start: info.start,
            end: info.end,
            end_including_break: info.end_including_break,
            text: &self.text[info.start..info.end],
        }
    }
}

impl<'a> TextLine<'a> {
    /// Line content without the terminator
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start, self.end)
    }

    pub fn is_empty_or_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }

    /// Byte offset of the first non-whitespace character within the line
    pub fn first_non_whitespace_offset(&self) -> Option<usize> {
        first_non_whitespace_offset(self.text)
    }

    /// Absolute position of the first non-whitespace character
    pub fn first_non_whitespace_position(&self) -> Option<usize> {
        self.first_non_whitespace_offset()
            .map(|offset| self.start + offset)
    }

    pub fn column_of_first_non_whitespace(&self, tab_size: usize) -> usize {
        indentation::column_of_first_non_whitespace(self.text, tab_size)
    }

    /// True when the first non-whitespace content of the line is `marker`
    pub fn starts_with_marker(&self, marker: &str) -> bool {
        self.text.trim_start().starts_with(marker)
    }
}

/// Byte offset of the first non-whitespace character in `text`
pub fn first_non_whitespace_offset(text: &str) -> Option<usize> {
    text.char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(idx, _)| idx)
}

//! Documentation comment reconstruction for C#
//!
//! tree-sitter-c-sharp exposes every `//` line and every `/* */` run as a
//! separate `comment` extra. Documentation comments are rebuilt from those:
//! `///` lines (but not `////`) separated by exactly one line break form
//! one marker-line block, and `/** */` (but not `/**/` or `/***`) forms a
//! block-style comment.

use tree_sitter::Node;

use crate::syntax::{CommentBlock, CommentLine, CommentShape, Token, TokenKind};
use crate::types::TextSpan;

pub(crate) const LINE_MARKER: &str = "///";
const BLOCK_OPEN: &str = "/**";
const BLOCK_CLOSE: &str = "*/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommentStyle {
    DocLine,
    DocBlock,
    Regular,
}

pub(crate) fn classify(comment: &str) -> CommentStyle {
    let bytes = comment.as_bytes();
    if comment.starts_with(LINE_MARKER) && bytes.get(3) != Some(&b'/') {
        CommentStyle::DocLine
    } else if comment.starts_with(BLOCK_OPEN)
        && !matches!(bytes.get(3), Some(b'*') | Some(b'/'))
        && comment.len() >= BLOCK_OPEN.len() + BLOCK_CLOSE.len()
    {
        CommentStyle::DocBlock
    } else {
        CommentStyle::Regular
    }
}

/// Spans of every `comment` node under `root`, in document order
pub(crate) fn collect_comment_spans(root: Node) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            spans.push(TextSpan::from_bounds(node.start_byte(), node.end_byte()));
        } else if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                spans.sort_by_key(|span| span.start);
                return spans;
            }
        }
    }
}

/// Line terminator starting at `position`, if any
pub(crate) fn line_break_at(text: &str, position: usize) -> Option<TextSpan> {
    let rest = text.as_bytes().get(position..)?;
    match rest {
        [b'\r', b'\n', ..] => Some(TextSpan::new(position, 2)),
        [b'\n', ..] | [b'\r', ..] => Some(TextSpan::new(position, 1)),
        _ => None,
    }
}

/// All comments of a snapshot, sorted into documentation blocks and the rest
#[derive(Debug, Default)]
pub(crate) struct CommentIndex {
    pub blocks: Vec<CommentBlock>,
    pub regular: Vec<TextSpan>,
}

impl CommentIndex {
    pub fn build(text: &str, comments: &[TextSpan]) -> Self {
        let mut index = Self::default();
        let mut pending: Vec<CommentLine> = Vec::new();

        for &span in comments {
            let comment = &text[span.as_range()];
            match classify(comment) {
                CommentStyle::DocLine => {
                    let continues = pending
                        .last()
                        .is_some_and(|last| continues_block(text, last, span));
                    if !continues {
                        index.flush(&mut pending);
                    }
                    pending.push(marker_line(text, span));
                }
                CommentStyle::DocBlock => {
                    index.flush(&mut pending);
                    index.blocks.push(block_style(text, span));
                }
                CommentStyle::Regular => {
                    index.flush(&mut pending);
                    index.regular.push(span);
                }
            }
        }
        index.flush(&mut pending);

        index
    }

    fn flush(&mut self, pending: &mut Vec<CommentLine>) {
        if pending.is_empty() {
            return;
        }
        let lines = std::mem::take(pending);
        let shape = if lines.len() == 1 {
            CommentShape::SingleMarkerLine
        } else {
            CommentShape::MultiMarkerLine
        };
        let start = lines[0].span.start;
        let end = lines
            .last()
            .map(|line| line.line_break.map_or(line.span.end, |br| br.end))
            .unwrap_or(start);

        self.blocks.push(CommentBlock {
            shape,
            span: TextSpan::from_bounds(start, end),
            first_line_span: lines[0].span,
            lines,
        });
    }

    /// Block whose extent covers `position`
    pub fn block_at(&self, position: usize) -> Option<&CommentBlock> {
        self.blocks
            .iter()
            .find(|block| block.span.contains(position))
    }

    /// Number of documentation blocks fully inside `[start, end)`
    pub fn count_between(&self, start: usize, end: usize) -> usize {
        self.blocks
            .iter()
            .filter(|block| block.span.start >= start && block.span.start < end)
            .count()
    }

    /// Doc-comment tokens of every block, in document order
    pub fn tokens(&self) -> Vec<Token> {
        self.blocks.iter().flat_map(block_tokens).collect()
    }

    /// Regular (non-documentation) comment covering `position`
    pub fn regular_at(&self, position: usize) -> Option<TextSpan> {
        self.regular
            .iter()
            .find(|span| span.contains(position))
            .copied()
    }
}

/// The next `///` line continues the block when only indentation and a
/// single line break separate the two
fn continues_block(text: &str, previous: &CommentLine, next: TextSpan) -> bool {
    let Some(line_break) = previous.line_break else {
        return false;
    };
    if line_break.end > next.start {
        return false;
    }
    text[line_break.end..next.start]
        .chars()
        .all(|ch| ch == ' ' || ch == '\t')
}

fn marker_line(text: &str, span: TextSpan) -> CommentLine {
    let content = TextSpan::from_bounds(span.start + LINE_MARKER.len(), span.end);
    CommentLine {
        span,
        content,
        content_text: text[content.as_range()].to_string(),
        line_break: line_break_at(text, span.end),
    }
}

fn block_style(text: &str, span: TextSpan) -> CommentBlock {
    let inner_start = span.start + BLOCK_OPEN.len();
    let inner_end = if text[span.as_range()].ends_with(BLOCK_CLOSE) {
        span.end - BLOCK_CLOSE.len()
    } else {
        span.end
    };

    let mut lines = Vec::new();
    let mut line_start = span.start;
    let mut content_start = inner_start;
    let mut idx = inner_start;

    while idx < inner_end {
        match line_break_at(text, idx) {
            Some(line_break) => {
                let content = TextSpan::from_bounds(content_start, idx);
                lines.push(CommentLine {
                    span: TextSpan::from_bounds(line_start, idx),
                    content,
                    content_text: text[content.as_range()].to_string(),
                    line_break: Some(line_break),
                });
                idx = line_break.end;
                line_start = idx;
                content_start = idx;
            }
            None => idx += 1,
        }
    }

    let content = TextSpan::from_bounds(content_start.min(inner_end), inner_end);
    lines.push(CommentLine {
        span: TextSpan::from_bounds(line_start, span.end),
        content,
        content_text: text[content.as_range()].to_string(),
        line_break: None,
    });

    CommentBlock {
        shape: CommentShape::BlockStyle,
        span,
        first_line_span: lines[0].span,
        lines,
    }
}

/// Text tokens for non-empty line contents, newline tokens for the breaks
/// that belong to the comment
pub(crate) fn block_tokens(block: &CommentBlock) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(block.lines.len() * 2);
    for line in &block.lines {
        if !line.content.is_empty() {
            tokens.push(Token {
                kind: TokenKind::DocCommentText,
                span: line.content,
            });
        }
        if let Some(line_break) = line.line_break {
            tokens.push(Token {
                kind: TokenKind::DocCommentNewLine,
                span: line_break,
            });
        }
    }
    tokens
}

//! Continuation engine: decides what a gesture does to a documentation comment
//!
//! Every entry point returns `Some(Edit)` when the gesture should change
//! the buffer, or `None` to let the default behavior stand. Ineligible
//! states are never errors and never log above `trace`.
//!
//! | Gesture | Outcome |
//! |---|---|
//! | marker completed by typing | full stub after the typed marker |
//! | Enter after a bare marker line | full stub replacing the new line break |
//! | Enter inside a marker line | marker carried onto the new line |
//! | insert command | full stub before the declaration |
//! | open line above/below | marker carried onto the opened line |

use tracing::trace;

use crate::config::FormattingOptions;
use crate::stub::{MIN_STUB_LINES, build_stub};
use crate::syntax::{CommentShape, Declaration, SyntaxFacts, SyntaxSnapshot};
use crate::text::{TextLine, TextLines, first_non_whitespace_offset, render_indentation};
use crate::types::{Edit, TextSpan};

pub struct DocCommentEngine {
    facts: Box<dyn SyntaxFacts>,
}

impl DocCommentEngine {
    pub fn new(facts: Box<dyn SyntaxFacts>) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &dyn SyntaxFacts {
        self.facts.as_ref()
    }

    pub fn marker(&self) -> &'static str {
        self.facts.exterior_marker()
    }

    /// The last marker character was typed; `position` is the caret after it
    pub fn on_character_typed(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        let facts = self.facts();

        let token = facts.token_at(snapshot, position)?;
        if token.span.start != position {
            return None;
        }

        let block = facts.documentation_comment(snapshot, &token)?;
        if !facts.is_single_exterior(&block, false) {
            return None;
        }

        let target = facts.target_declaration(snapshot, &block)?;
        if facts.preceding_comment_count(&target) != 1 {
            return None;
        }

        let lines = snapshot.lines();
        let line = lines.line_from_position(block.span.start);
        if line.is_empty_or_whitespace() {
            return None;
        }

        let new_line = formatting.new_line_for(snapshot.text());
        let mut stub = self.stub_with_breaks(&target, &new_line);
        self.strip_marker(&mut stub);

        let indent = indentation_of(&line, formatting);
        let last = stub.len() - 1;
        for entry in &mut stub[1..last] {
            entry.insert_str(0, &indent);
        }
        let closing = stub[last]
            .strip_suffix(new_line.as_str())
            .unwrap_or(&stub[last])
            .to_string();
        stub[last] = format!("{indent}{closing}");

        let caret_offset = stub[0].len() + stub[1].len() - new_line.len();
        let edit = Edit::insert(position, stub.concat(), caret_offset);
        trace!(target_kind = ?target.kind, at = position, "stub after typed marker");
        Some(edit)
    }

    /// Enter was pressed; the default newline already ran.
    ///
    /// `position` is the caret after the newline, `original_position` the
    /// caret (or selection start) before it.
    pub fn on_enter(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
        original_position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        self.stub_after_enter(snapshot, position, formatting)
            .or_else(|| self.marker_after_enter(snapshot, position, original_position, formatting))
    }

    fn stub_after_enter(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        let facts = self.facts();

        let token = facts.token_left_of(snapshot, position)?;
        if !facts.is_comment_continuation_newline(&token) {
            return None;
        }

        let block = facts.documentation_comment(snapshot, &token)?;
        if !facts.is_single_exterior(&block, false) {
            return None;
        }

        let target = facts.target_declaration(snapshot, &block)?;
        if facts.preceding_comment_count(&target) != 1 {
            return None;
        }

        let lines = snapshot.lines();
        let line = lines.line_from_position(block.span.start);
        if line.is_empty_or_whitespace() {
            return None;
        }

        let new_line = formatting.new_line_for(snapshot.text());
        let mut stub = self.stub_with_breaks(&target, &new_line);
        self.strip_marker(&mut stub);

        let indent = indentation_of(&line, formatting);
        for entry in &mut stub[1..] {
            entry.insert_str(0, &indent);
        }

        let caret_offset = stub[0].len() + stub[1].len() - new_line.len();
        let mut new_text = stub.concat();

        // Avoid a doubled blank line, or keep typing aligned
        let at_end_of_line = facts
            .trivia_at(snapshot, position)
            .is_some_and(|trivia| facts.is_end_of_line_trivia(&trivia));
        if at_end_of_line {
            new_text.truncate(new_text.len() - new_line.len());
        } else {
            new_text.push_str(&indent);
        }

        let current = lines.line_from_position(position);
        let replace_span = match current.first_non_whitespace_position() {
            Some(first) => TextSpan::from_bounds(token.span.start, first),
            None => token.span,
        };

        trace!(target_kind = ?target.kind, span = %replace_span, "stub after enter");
        Some(Edit::replace(replace_span, new_text, caret_offset))
    }

    fn marker_after_enter(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
        original_position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        let facts = self.facts();
        let marker = self.marker();

        let token = facts.token_right_of(snapshot, original_position)?;
        if !facts.is_comment_continuation_newline(&token) || token.span.start != original_position
        {
            return None;
        }

        let lines = snapshot.lines();
        let current = lines.line_from_position(position);
        if current.number == 0 {
            return None;
        }

        let previous = lines.get(current.number - 1)?;
        let previous_text = previous.text().trim();
        if !previous_text.starts_with(marker) {
            return None;
        }

        let next_starts_with_marker = lines
            .get(current.number + 1)
            .is_some_and(|next| next.text().trim().starts_with(marker));

        // A bare marker followed by a blank line ends the comment
        if previous_text == marker && current.is_empty_or_whitespace() && !next_starts_with_marker
        {
            return None;
        }

        let block = facts.documentation_comment(snapshot, &token);
        if let Some(block) = &block {
            if facts.comment_shape(block) == CommentShape::BlockStyle {
                return None;
            }
            if facts.ends_with_single_exterior(block)
                && current.is_empty_or_whitespace()
                && !next_starts_with_marker
            {
                return None;
            }
        }

        let edit = self.carry_over(&current, &previous, formatting);
        trace!(line = current.number, "marker carried over after enter");
        Some(edit)
    }

    /// Declaration the insert command would document, if any
    pub fn target_for_command(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
    ) -> Option<Declaration> {
        let facts = self.facts();

        let declaration = facts.containing_declaration(snapshot, position)?;
        if !facts.supports_comment(&declaration) || facts.has_comment(&declaration) {
            return None;
        }

        // Only the first declaration on a line is addressable
        let lines = snapshot.lines();
        let line = lines.line_from_position(declaration.first_token_start);
        let first = line.first_non_whitespace_position()?;
        if first < declaration.first_token_start {
            return None;
        }

        Some(declaration)
    }

    pub fn on_insert_command(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        let target = self.target_for_command(snapshot, position)?;
        let start = target.first_token_start;

        let lines = snapshot.lines();
        let line = lines.line_from_position(start);
        assert!(
            !line.is_empty_or_whitespace(),
            "declaration line {} is blank",
            line.number
        );
        assert_eq!(
            line.first_non_whitespace_position(),
            Some(start),
            "declaration does not start the line"
        );

        let new_line = formatting.new_line_for(snapshot.text());
        let mut stub = self.stub_with_breaks(&target, &new_line);

        let indent = indentation_of(&line, formatting);
        for entry in &mut stub[1..] {
            entry.insert_str(0, &indent);
        }
        if let Some(last) = stub.last_mut() {
            last.push_str(&indent);
        }

        let caret_offset = stub[0].len() + stub[1].len() - new_line.len();
        trace!(target_kind = ?target.kind, at = start, "stub from command");
        Some(Edit::insert(start, stub.concat(), caret_offset))
    }

    /// A line was opened above or below; `position` is the caret on it
    pub fn on_open_line(
        &self,
        text: &str,
        position: usize,
        formatting: &FormattingOptions,
    ) -> Option<Edit> {
        let marker = self.marker();
        let lines = TextLines::new(text);

        let current = lines.line_from_position(position);
        if current.number == 0 {
            return None;
        }
        let previous = lines.get(current.number - 1)?;

        if current.starts_with_marker(marker) || !previous.starts_with_marker(marker) {
            return None;
        }

        Some(self.carry_over(&current, &previous, formatting))
    }

    /// Replace the leading whitespace of `current` with the indentation,
    /// marker and content indent of `previous`
    fn carry_over(
        &self,
        current: &TextLine,
        previous: &TextLine,
        formatting: &FormattingOptions,
    ) -> Edit {
        let marker = self.marker();

        let trimmed = previous.text().trim();
        debug_assert!(trimmed.starts_with(marker), "previous line lost its marker");
        let after_marker = trimmed.strip_prefix(marker).unwrap_or_default();
        let content_indent = match first_non_whitespace_offset(after_marker) {
            Some(offset) => &after_marker[..offset],
            None => " ",
        };

        let mut insertion = indentation_of(previous, formatting);
        insertion.push_str(marker);
        insertion.push_str(content_indent);

        let replace_span = match current.first_non_whitespace_offset() {
            Some(offset) => TextSpan::new(current.start, offset),
            None => current.span(),
        };

        let caret_offset = insertion.len();
        Edit::replace(replace_span, insertion, caret_offset)
    }

    fn stub_with_breaks(&self, target: &Declaration, new_line: &str) -> Vec<String> {
        let lines = build_stub(self.marker(), &target.outline);
        assert!(
            lines.len() >= MIN_STUB_LINES,
            "stub for {:?} has only {} lines",
            target.kind,
            lines.len()
        );
        lines.into_iter().map(|line| line + new_line).collect()
    }

    /// The first stub line continues a marker that is already in the buffer
    fn strip_marker(&self, stub: &mut [String]) {
        if let Some(first) = stub.first_mut() {
            first.replace_range(..self.marker().len(), "");
        }
    }
}

fn indentation_of(line: &TextLine, formatting: &FormattingOptions) -> String {
    let column = line.column_of_first_non_whitespace(formatting.tab_size);
    render_indentation(column, formatting.use_tabs, formatting.tab_size)
}

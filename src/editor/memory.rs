//! In-memory editor host with grouped undo

use tracing::trace;

use super::{EditorOperations, TextView, UndoHistory};
use crate::config::FormattingOptions;
use crate::text::TextLines;
use crate::types::TextSpan;

#[derive(Debug, Clone)]
struct TextEdit {
    start: usize,
    deleted_text: String,
    inserted_text: String,
}

#[derive(Debug, Clone)]
struct UndoStep {
    label: String,
    edits: Vec<TextEdit>,
    caret_before: usize,
    caret_after: usize,
}

/// Where a nested transaction began inside the outermost one
#[derive(Debug, Clone, Copy)]
struct Savepoint {
    edits_len: usize,
    caret: usize,
}

#[derive(Debug)]
struct OpenTransaction {
    label: String,
    nested: Vec<Savepoint>,
    edits: Vec<TextEdit>,
    caret_before: usize,
}

/// A text buffer with caret, selection and undo history
#[derive(Debug)]
pub struct MemoryEditor {
    text: String,
    caret: usize,
    selection: Option<TextSpan>,
    formatting: FormattingOptions,
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    open: Option<OpenTransaction>,
}

impl MemoryEditor {
    pub fn new(text: impl Into<String>, formatting: FormattingOptions) -> Self {
        Self {
            text: text.into(),
            caret: 0,
            selection: None,
            formatting,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open: None,
        }
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.move_caret_to(caret);
        self
    }

    /// Select `span`; the caret moves to its end
    pub fn select(&mut self, span: TextSpan) {
        let end = self.floor_char_boundary(span.end);
        let start = self.floor_char_boundary(span.start.min(end));
        self.selection = (start < end).then(|| TextSpan::from_bounds(start, end));
        self.caret = end;
    }

    pub fn set_formatting(&mut self, formatting: FormattingOptions) {
        self.formatting = formatting;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Label of the step `undo` would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|step| step.label.as_str())
    }

    /// Revert the most recent undo step
    pub fn undo(&mut self) -> bool {
        let Some(step) = self.undo_stack.pop() else {
            return false;
        };
        self.revert(&step.edits);
        self.caret = step.caret_before;
        self.selection = None;
        trace!(label = %step.label, "undo");
        self.redo_stack.push(step);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(step) = self.redo_stack.pop() else {
            return false;
        };
        for edit in &step.edits {
            let end = edit.start + edit.deleted_text.len();
            self.text.replace_range(edit.start..end, &edit.inserted_text);
        }
        self.caret = step.caret_after;
        self.selection = None;
        trace!(label = %step.label, "redo");
        self.undo_stack.push(step);
        true
    }

    fn floor_char_boundary(&self, position: usize) -> usize {
        let mut position = position.min(self.text.len());
        while !self.text.is_char_boundary(position) {
            position -= 1;
        }
        position
    }

    fn revert(&mut self, edits: &[TextEdit]) {
        for edit in edits.iter().rev() {
            let end = edit.start + edit.inserted_text.len();
            self.text.replace_range(edit.start..end, &edit.deleted_text);
        }
    }

    fn record(&mut self, edit: TextEdit, caret_before: usize) {
        match &mut self.open {
            Some(open) => open.edits.push(edit),
            None => {
                self.redo_stack.clear();
                self.undo_stack.push(UndoStep {
                    label: "Edit".to_string(),
                    edits: vec![edit],
                    caret_before,
                    caret_after: self.caret,
                });
            }
        }
    }

    /// Replace without touching the caret; returns the caret it had
    fn splice(&mut self, span: TextSpan, text: &str) -> (TextEdit, usize) {
        assert!(
            span.end <= self.text.len(),
            "span {span} outside buffer of {} bytes",
            self.text.len()
        );
        let deleted_text = self.text[span.as_range()].to_string();
        self.text.replace_range(span.as_range(), text);
        let caret_before = self.caret;

        // Keep the caret on the same character when the edit is before it
        if self.caret >= span.end {
            self.caret = self.caret - span.len() + text.len();
        } else if self.caret > span.start {
            self.caret = span.start + text.len();
        }
        self.selection = None;

        (
            TextEdit {
                start: span.start,
                deleted_text,
                inserted_text: text.to_string(),
            },
            caret_before,
        )
    }

    /// Insert at the caret, replacing the selection if there is one
    fn type_text(&mut self, text: &str) {
        let span = self
            .selection
            .unwrap_or_else(|| TextSpan::empty(self.caret));
        let (edit, caret_before) = self.splice(span, text);
        self.caret = span.start + text.len();
        self.record(edit, caret_before);
    }

    fn new_line(&self) -> String {
        self.formatting.new_line_for(&self.text)
    }
}

impl TextView for MemoryEditor {
    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn selected_spans(&self) -> Vec<TextSpan> {
        self.selection.into_iter().collect()
    }

    fn insert(&mut self, position: usize, text: &str) {
        self.replace(TextSpan::empty(position), text);
    }

    fn replace(&mut self, span: TextSpan, text: &str) {
        let (edit, caret_before) = self.splice(span, text);
        self.record(edit, caret_before);
    }

    fn move_caret_to(&mut self, position: usize) {
        self.caret = self.floor_char_boundary(position);
        self.selection = None;
    }

    fn formatting(&self) -> &FormattingOptions {
        &self.formatting
    }
}

impl EditorOperations for MemoryEditor {
    fn type_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.type_text(ch.encode_utf8(&mut buf));
    }

    fn insert_new_line(&mut self) {
        let new_line = self.new_line();
        self.type_text(&new_line);
    }

    fn open_line_above(&mut self) {
        let new_line = self.new_line();
        let start = TextLines::new(&self.text)
            .line_from_position(self.caret)
            .start;
        self.insert(start, &new_line);
        self.move_caret_to(start);
    }

    fn open_line_below(&mut self) {
        let new_line = self.new_line();
        let end = TextLines::new(&self.text)
            .line_from_position(self.caret)
            .end;
        self.insert(end, &new_line);
        self.move_caret_to(end + new_line.len());
    }
}

impl UndoHistory for MemoryEditor {
    fn begin_transaction(&mut self, label: &str) {
        match &mut self.open {
            Some(open) => open.nested.push(Savepoint {
                edits_len: open.edits.len(),
                caret: self.caret,
            }),
            None => {
                self.open = Some(OpenTransaction {
                    label: label.to_string(),
                    nested: Vec::new(),
                    edits: Vec::new(),
                    caret_before: self.caret,
                });
            }
        }
    }

    fn complete_transaction(&mut self) {
        let Some(open) = &mut self.open else {
            return;
        };
        // Inner commits fold into the outermost step
        if open.nested.pop().is_some() {
            return;
        }

        if let Some(open) = self.open.take() {
            if open.edits.is_empty() {
                return;
            }
            self.redo_stack.clear();
            self.undo_stack.push(UndoStep {
                label: open.label,
                edits: open.edits,
                caret_before: open.caret_before,
                caret_after: self.caret,
            });
        }
    }

    fn rollback_transaction(&mut self) {
        let Some(open) = &mut self.open else {
            return;
        };

        if let Some(savepoint) = open.nested.pop() {
            let undone: Vec<TextEdit> = open.edits.drain(savepoint.edits_len..).collect();
            trace!(label = %open.label, edits = undone.len(), "nested transaction rolled back");
            self.revert(&undone);
            self.caret = savepoint.caret;
            self.selection = None;
            return;
        }

        if let Some(open) = self.open.take() {
            self.revert(&open.edits);
            self.caret = open.caret_before;
            self.selection = None;
            trace!(label = %open.label, "transaction rolled back");
        }
    }
}

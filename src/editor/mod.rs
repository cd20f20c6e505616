//! Host editor boundary
//!
//! The command handler only talks to the editor through these traits:
//! - [`TextView`] - text, caret, selection and primitive edits
//! - [`EditorOperations`] - the default behavior of each gesture
//! - [`UndoHistory`] - grouping edits into one undo step
//!
//! [`MemoryEditor`] implements all three over a `String` and is what the
//! tests and embedding hosts without their own buffer use.

pub mod memory;
pub mod transaction;

pub use memory::MemoryEditor;
pub use transaction::Transaction;

use crate::config::FormattingOptions;
use crate::types::{Edit, TextSpan};

pub trait TextView {
    fn text(&self) -> &str;

    fn caret(&self) -> usize;

    /// Selected spans in document order, empty when nothing is selected
    fn selected_spans(&self) -> Vec<TextSpan>;

    fn insert(&mut self, position: usize, text: &str);

    fn replace(&mut self, span: TextSpan, text: &str);

    fn move_caret_to(&mut self, position: usize);

    /// Per-buffer indentation and line terminator settings
    fn formatting(&self) -> &FormattingOptions;

    /// Apply an engine edit and place the caret where it asks
    fn apply(&mut self, edit: &Edit) {
        self.replace(edit.replace_span, &edit.new_text);
        self.move_caret_to(edit.caret_position());
    }
}

/// Default gesture behavior, run before (or instead of) the engine
pub trait EditorOperations: TextView {
    fn type_char(&mut self, ch: char);

    fn insert_new_line(&mut self);

    fn open_line_above(&mut self);

    fn open_line_below(&mut self);
}

pub trait UndoHistory {
    fn begin_transaction(&mut self, label: &str);

    /// Commit everything since the matching begin as one undo step
    fn complete_transaction(&mut self);

    /// Revert everything since the matching begin
    fn rollback_transaction(&mut self);
}

/// Everything the command handler needs from a host
pub trait EditorHost: EditorOperations + UndoHistory {}

impl<T: EditorOperations + UndoHistory + ?Sized> EditorHost for T {}

//! Plain-text helpers: physical lines and indentation columns

pub mod indentation;
pub mod lines;

pub use indentation::{column_of_first_non_whitespace, render as render_indentation};
pub use lines::{TextLine, TextLines, first_non_whitespace_offset};

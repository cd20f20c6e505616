//! Shared helpers for gesture tests
//!
//! Buffers are written as markup: `$$` marks the caret and `[|...|]` a
//! selection.

#![allow(dead_code)]

use docstub::{
    CommandOutcome, DocCommentCommandHandler, DocCommentConfig, DocCommentEngine,
    CSharpSyntaxFacts, FormattingOptions, Gesture, MemoryEditor, TextSpan, TextView,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

pub const CARET: &str = "$$";
const SELECTION_START: &str = "[|";
const SELECTION_END: &str = "|]";

/// Buffer text with the markup removed
#[derive(Debug)]
pub struct Markup {
    pub text: String,
    pub caret: Option<usize>,
    pub selection: Option<TextSpan>,
}

pub fn parse_markup(markup: &str) -> Markup {
    let mut text = String::with_capacity(markup.len());
    let mut caret = None;
    let mut selection_start = None;
    let mut selection = None;
    let mut rest = markup;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(CARET) {
            caret = Some(text.len());
            rest = after;
        } else if let Some(after) = rest.strip_prefix(SELECTION_START) {
            selection_start = Some(text.len());
            rest = after;
        } else if let Some(after) = rest.strip_prefix(SELECTION_END) {
            let start = selection_start.take().expect("selection end without start");
            selection = Some(TextSpan::from_bounds(start, text.len()));
            rest = after;
        } else {
            let ch = rest.chars().next().expect("non-empty rest");
            text.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    Markup {
        text,
        caret,
        selection,
    }
}

/// The editor's buffer with `$$` at the caret
pub fn render(editor: &MemoryEditor) -> String {
    let mut text = editor.text().to_string();
    text.insert_str(editor.caret(), CARET);
    text
}

pub fn formatting(use_tabs: bool) -> FormattingOptions {
    if use_tabs {
        FormattingOptions::with_tabs(4)
    } else {
        FormattingOptions::with_spaces(4)
    }
}

pub fn csharp_handler(config: DocCommentConfig) -> DocCommentCommandHandler {
    let facts = CSharpSyntaxFacts::new().expect("C# grammar loads");
    DocCommentCommandHandler::new(DocCommentEngine::new(Box::new(facts)), config)
}

pub fn editor_from_markup(markup: &str, use_tabs: bool) -> MemoryEditor {
    let Markup {
        text,
        caret,
        selection,
    } = parse_markup(markup);
    let mut editor = MemoryEditor::new(text, formatting(use_tabs));
    match selection {
        Some(span) => editor.select(span),
        None => editor.move_caret_to(caret.expect("markup needs a caret")),
    }
    editor
}

/// Run one gesture over `code` and compare the result with `expected`
pub fn run_gesture(
    handler: &DocCommentCommandHandler,
    gesture: Gesture,
    code: &str,
    expected: &str,
    use_tabs: bool,
) -> CommandOutcome {
    let mut editor = editor_from_markup(code, use_tabs);
    let outcome = handler.handle(&mut editor, gesture, &CancellationToken::new());
    assert_eq!(render(&editor), expected);
    outcome
}

pub fn verify_typing_character(code: &str, expected: &str) -> CommandOutcome {
    verify_typing_character_with(code, expected, false)
}

pub fn verify_typing_character_with(code: &str, expected: &str, use_tabs: bool) -> CommandOutcome {
    let handler = csharp_handler(DocCommentConfig::default());
    run_gesture(&handler, Gesture::TypeChar('/'), code, expected, use_tabs)
}

pub fn verify_pressing_enter(code: &str, expected: &str) -> CommandOutcome {
    verify_pressing_enter_with(code, expected, false)
}

pub fn verify_pressing_enter_with(code: &str, expected: &str, use_tabs: bool) -> CommandOutcome {
    let handler = csharp_handler(DocCommentConfig::default());
    run_gesture(&handler, Gesture::Enter, code, expected, use_tabs)
}

pub fn verify_insert_comment_command(code: &str, expected: &str) -> CommandOutcome {
    let handler = csharp_handler(DocCommentConfig::default());
    run_gesture(&handler, Gesture::InsertComment, code, expected, false)
}

pub fn verify_open_line_above(code: &str, expected: &str, use_tabs: bool) -> CommandOutcome {
    let handler = csharp_handler(DocCommentConfig::default());
    run_gesture(&handler, Gesture::OpenLineAbove, code, expected, use_tabs)
}

pub fn verify_open_line_below(code: &str, expected: &str, use_tabs: bool) -> CommandOutcome {
    let handler = csharp_handler(DocCommentConfig::default());
    run_gesture(&handler, Gesture::OpenLineBelow, code, expected, use_tabs)
}

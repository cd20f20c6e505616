/// The main library module for docstub
// Debug macro for consistent debug output
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::config::is_global_debug_enabled() {
            eprintln!("DEBUG: {}", format!($($arg)*));
        }
    };
}

pub mod commands;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod logging;
pub mod stub;
pub mod syntax;
pub mod text;
pub mod types;

// Explicit exports for better API clarity
pub use commands::{DocCommentCommandHandler, Gesture};
pub use config::{DocCommentConfig, FormattingOptions, Settings};
pub use editor::{EditorHost, EditorOperations, MemoryEditor, TextView, Transaction, UndoHistory};
pub use engine::DocCommentEngine;
pub use error::{DocStubError, DocStubResult};
pub use stub::build_stub;
pub use syntax::csharp::CSharpSyntaxFacts;
pub use syntax::{
    CommentBlock, Declaration, DeclarationKind, LanguageId, LanguageRegistry, StubOutline,
    SyntaxFacts, SyntaxSnapshot, get_registry,
};
pub use types::{CommandOutcome, CommandState, Edit, TextSpan};

//! Error types for documentation comment synthesis
//!
//! Errors only come from the external boundary: parsing, cancellation,
//! configuration and language lookup. Everything the engine decides on its
//! own is expressed as "no edit", never as an error.

use crate::syntax::LanguageId;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum DocStubError {
    /// The grammar could not be loaded into a parser
    #[error("Failed to set up {language} parser: {reason}")]
    LanguageSetup { language: LanguageId, reason: String },

    /// tree-sitter gave up on the document
    #[error("Failed to parse {language} document of {length} bytes")]
    ParseFailed { language: LanguageId, length: usize },

    /// The gesture was cancelled before a consistent tree was available
    #[error("Operation '{operation}' was cancelled")]
    Cancelled { operation: String },

    #[error(
        "Language '{0}' not found in registry\nSuggestion: Check the languages compiled into docstub"
    )]
    LanguageNotFound(LanguageId),

    #[error(
        "Language '{0}' is available but disabled\nSuggestion: Enable it in .docstub/settings.toml by setting languages.{0}.enabled = true"
    )]
    LanguageDisabled(LanguageId),

    #[error(
        "No language found for extension '.{0}'\nSuggestion: Add the extension to languages.<id>.extensions in settings.toml"
    )]
    ExtensionNotMapped(String),

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// General errors for cases where we need to preserve existing behavior
    #[error("{0}")]
    General(String),
}

impl DocStubError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that hosts can use for programmatic
    /// error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::LanguageSetup { .. } => "LANGUAGE_SETUP_ERROR",
            Self::ParseFailed { .. } => "PARSE_ERROR",
            Self::Cancelled { .. } => "CANCELLED",
            Self::LanguageNotFound(_) => "LANGUAGE_NOT_FOUND",
            Self::LanguageDisabled(_) => "LANGUAGE_DISABLED",
            Self::ExtensionNotMapped(_) => "EXTENSION_NOT_MAPPED",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::General(_) => "GENERAL_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::LanguageSetup { .. } => vec![
                "The bundled grammar does not match the tree-sitter runtime ABI",
                "Rebuild docstub against a matching tree-sitter version",
            ],
            Self::ParseFailed { .. } => vec![
                "The keystroke falls back to default editor behavior",
                "Retry the gesture once the document is stable",
            ],
            Self::Cancelled { .. } => {
                vec!["Nothing was changed in the buffer, the gesture can be repeated"]
            }
            Self::LanguageNotFound(_) | Self::ExtensionNotMapped(_) => {
                vec!["Only C# (.cs, .csx) is currently supported"]
            }
            Self::LanguageDisabled(_) => {
                vec!["Set languages.<id>.enabled = true in .docstub/settings.toml"]
            }
            Self::Config { .. } => vec![
                "Check .docstub/settings.toml for typos",
                "tab_size must be greater than zero",
            ],
            Self::General(_) => vec![],
        }
    }

    /// True when the failure means "defer to default behavior" rather than
    /// a broken environment.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::ParseFailed { .. })
    }
}

/// Result type alias for docstub operations
pub type DocStubResult<T> = Result<T, DocStubError>;

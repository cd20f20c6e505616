//! C# documentation comments on tree-sitter
//!
//! # Supported Features
//!
//! - `///` marker-line comments and `/** */` block comments
//! - Types, delegates, members, enum members and records as targets
//! - Type parameter, parameter and return type extraction for stubs
//!
//! # Architecture
//!
//! - `comments` - Rebuilds documentation blocks from comment extras
//! - `declarations` - Node kind mapping and signature outlines
//! - [`facts`] - The [`SyntaxFacts`](crate::syntax::SyntaxFacts) implementation
//! - [`definition`] - Language registration

pub(crate) mod comments;
pub(crate) mod declarations;
pub mod definition;
pub mod facts;

pub use definition::CSharpLanguage;
pub use facts::CSharpSyntaxFacts;

pub(crate) use definition::register;

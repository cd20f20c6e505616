//! Syntax facts: the narrow query surface the continuation engine needs
//!
//! The engine never touches a grammar directly. It asks a [`SyntaxFacts`]
//! implementation about declarations, comment blocks, tokens and trivia
//! over an immutable [`SyntaxSnapshot`]. One implementation exists per
//! grammar and is picked once, when the command handler is built.
//!
//! # Architecture
//!
//! - [`registry`] - Language lookup by id or file extension
//! - [`csharp`] - tree-sitter backed facts for C# (`///` and `/** */`)

pub mod csharp;
pub mod registry;

pub use registry::{LanguageDefinition, LanguageId, LanguageRegistry, get_registry};

use crate::error::DocStubResult;
use crate::text::TextLines;
use crate::types::TextSpan;
use tokio_util::sync::CancellationToken;
use tree_sitter::Tree;

/// A parsed document: text and the tree computed from exactly that text
pub struct SyntaxSnapshot {
    language: LanguageId,
    text: String,
    tree: Tree,
}

impl SyntaxSnapshot {
    pub fn new(language: LanguageId, text: String, tree: Tree) -> Self {
        Self {
            language,
            text,
            tree,
        }
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn lines(&self) -> TextLines<'_> {
        TextLines::new(&self.text)
    }
}

impl std::fmt::Debug for SyntaxSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxSnapshot")
            .field("language", &self.language)
            .field("length", &self.text.len())
            .field("has_error", &self.tree.root_node().has_error())
            .finish()
    }
}

/// Documentable (and a few non-documentable) declaration kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    EnumMember,
    Delegate,
    Method,
    Constructor,
    Destructor,
    Property,
    Indexer,
    Event,
    EventField,
    Field,
    Operator,
    ConversionOperator,
    /// Containers that stop the ancestor search but take no comment
    Namespace,
    TopLevelStatement,
}

impl DeclarationKind {
    pub fn supports_documentation(&self) -> bool {
        !matches!(
            self,
            DeclarationKind::Namespace | DeclarationKind::TopLevelStatement
        )
    }
}

/// Signature summary the stub generator works from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StubOutline {
    /// Type parameter names in declaration order, verbatim prefix removed
    pub type_parameters: Vec<String>,
    /// Parameter names in declaration order, verbatim prefix removed
    pub parameters: Vec<String>,
    pub is_indexer: bool,
    /// Declares a value-returning signature (`<returns>` applies)
    pub has_return: bool,
}

/// A documentable unit found in the tree, derived fresh for every gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: Option<String>,
    pub span: TextSpan,
    /// Start of the first token, attributes and modifiers included
    pub first_token_start: usize,
    /// Documentation comments between the previous token and this one
    pub preceding_comment_count: usize,
    pub outline: StubOutline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentShape {
    /// One marker line
    SingleMarkerLine,
    /// Several consecutive marker lines
    MultiMarkerLine,
    /// One open/close delimited comment
    BlockStyle,
}

/// One physical line of a documentation comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// The comment as the grammar sees it, marker included
    pub span: TextSpan,
    /// Everything after the marker up to the end of the comment
    pub content: TextSpan,
    pub content_text: String,
    /// Terminator following the comment, absent at end of file
    pub line_break: Option<TextSpan>,
}

/// A documentation comment, reconstructed from the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub shape: CommentShape,
    /// From the first marker through the last line break
    pub span: TextSpan,
    pub first_line_span: TextSpan,
    pub lines: Vec<CommentLine>,
}

impl CommentBlock {
    pub fn last_line(&self) -> Option<&CommentLine> {
        self.lines.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Any token of the host language
    Syntax,
    /// Text inside a documentation comment
    DocCommentText,
    /// Line break that belongs to a documentation comment
    DocCommentNewLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    Comment,
    DocumentationComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub span: TextSpan,
}

/// Query surface over one grammar.
///
/// All queries are pure reads of an immutable snapshot. "Not found" is an
/// empty `Option`, never an error. Only [`SyntaxFacts::parse`] can fail,
/// because it talks to the parser.
pub trait SyntaxFacts: Send + Sync {
    fn language(&self) -> LanguageId;

    /// Text that starts every line of a marker-line comment, e.g. `///`
    fn exterior_marker(&self) -> &'static str;

    /// Typing this character may complete the marker
    fn trigger_character(&self) -> char {
        self.exterior_marker().chars().last().unwrap_or('/')
    }

    /// Parse `text` into a snapshot, giving up if `cancel` fires first
    fn parse(&self, text: &str, cancel: &CancellationToken) -> DocStubResult<SyntaxSnapshot>;

    /// Innermost declaration (or namespace-like container) owning the
    /// token at `position`, trivia counting towards the token it belongs to
    fn containing_declaration(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
    ) -> Option<Declaration>;

    fn supports_comment(&self, declaration: &Declaration) -> bool {
        declaration.kind.supports_documentation()
    }

    fn has_comment(&self, declaration: &Declaration) -> bool {
        declaration.preceding_comment_count > 0
    }

    fn preceding_comment_count(&self, declaration: &Declaration) -> usize {
        declaration.preceding_comment_count
    }

    /// Token at `position`, looking inside documentation comments
    fn token_at(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token>;

    /// Closest token that starts before `position`
    fn token_left_of(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token>;

    /// Closest token that ends after `position`
    fn token_right_of(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token>;

    /// Trivia covering `position`, if `position` is not inside a token
    fn trivia_at(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Trivia>;

    /// Line break separating two marker lines of the same comment (or
    /// ending its last line)
    fn is_comment_continuation_newline(&self, token: &Token) -> bool {
        token.kind == TokenKind::DocCommentNewLine
    }

    fn is_end_of_line_trivia(&self, trivia: &Trivia) -> bool {
        trivia.kind == TriviaKind::EndOfLine
    }

    /// Documentation comment a doc-comment token belongs to
    fn documentation_comment(&self, snapshot: &SyntaxSnapshot, token: &Token)
    -> Option<CommentBlock>;

    /// Declaration a comment documents: the one owning the first token
    /// after the comment, provided it does not start before the comment
    fn target_declaration(
        &self,
        snapshot: &SyntaxSnapshot,
        block: &CommentBlock,
    ) -> Option<Declaration>;

    fn comment_shape(&self, block: &CommentBlock) -> CommentShape {
        block.shape
    }

    /// A single marker line holding nothing but the marker (and, when
    /// allowed, whitespace), followed by a line break
    fn is_single_exterior(&self, block: &CommentBlock, allow_whitespace: bool) -> bool {
        if self.comment_shape(block) != CommentShape::SingleMarkerLine {
            return false;
        }
        let Some(line) = block.lines.first() else {
            return false;
        };
        let empty = if allow_whitespace {
            line.content_text.trim().is_empty()
        } else {
            line.content_text.is_empty()
        };
        empty && line.line_break.is_some()
    }

    /// Marker-line comment whose last line is a bare marker
    fn ends_with_single_exterior(&self, block: &CommentBlock) -> bool {
        if self.comment_shape(block) == CommentShape::BlockStyle {
            return false;
        }
        block
            .last_line()
            .map(|line| line.content_text.trim().is_empty() && line.line_break.is_some())
            .unwrap_or(false)
    }
}

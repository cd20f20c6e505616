//! tree-sitter backed [`SyntaxFacts`] for C#

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tree_sitter::{Language, Node, Parser};

use super::comments::{self, CommentIndex, LINE_MARKER};
use super::declarations::{declaration_name, enclosing_declaration, first_token, outline};
use crate::error::{DocStubError, DocStubResult};
use crate::syntax::{
    CommentBlock, Declaration, DeclarationKind, LanguageId, SyntaxFacts, SyntaxSnapshot, Token,
    TokenKind, Trivia, TriviaKind,
};
use crate::types::TextSpan;

pub(crate) const CSHARP: LanguageId = LanguageId::new("csharp");

pub struct CSharpSyntaxFacts {
    parser: Mutex<Parser>,
}

impl CSharpSyntaxFacts {
    pub fn new() -> DocStubResult<Self> {
        let mut parser = Parser::new();
        let language: Language = tree_sitter_c_sharp::LANGUAGE.into();
        parser
            .set_language(&language)
            .map_err(|e| DocStubError::LanguageSetup {
                language: CSHARP,
                reason: e.to_string(),
            })?;

        Ok(Self {
            parser: Mutex::new(parser),
        })
    }

    fn declaration(&self, index: &SnapshotIndex, node: Node, kind: DeclarationKind) -> Declaration {
        let code = index.text;
        let first_token_start = first_token(node)
            .map(|token| token.start_byte())
            .unwrap_or_else(|| node.start_byte());
        let previous_end = index
            .leaf_before(first_token_start)
            .map(|leaf| leaf.end_byte())
            .unwrap_or(0);

        Declaration {
            kind,
            name: declaration_name(node, code),
            span: TextSpan::from_bounds(node.start_byte(), node.end_byte()),
            first_token_start,
            preceding_comment_count: index
                .comments
                .count_between(previous_end, first_token_start),
            outline: outline(node, kind, code),
        }
    }
}

/// Token and comment layout of one snapshot
struct SnapshotIndex<'s> {
    text: &'s str,
    /// Non-comment leaves with a width, in document order
    leaves: Vec<Node<'s>>,
    comments: CommentIndex,
    /// Syntax tokens merged with documentation comment tokens
    tokens: Vec<Token>,
}

impl<'s> SnapshotIndex<'s> {
    fn build(snapshot: &'s SyntaxSnapshot) -> Self {
        let text = snapshot.text();
        let root = snapshot.tree().root_node();

        let comments = CommentIndex::build(text, &comments::collect_comment_spans(root));
        let leaves = collect_leaves(root);

        let mut tokens: Vec<Token> = leaves
            .iter()
            .map(|leaf| Token {
                kind: TokenKind::Syntax,
                span: TextSpan::from_bounds(leaf.start_byte(), leaf.end_byte()),
            })
            .chain(comments.tokens())
            .collect();
        tokens.sort_by_key(|token| token.span.start);

        Self {
            text,
            leaves,
            comments,
            tokens,
        }
    }

    /// Last leaf ending at or before `position`
    fn leaf_before(&self, position: usize) -> Option<Node<'s>> {
        let idx = self.leaves.partition_point(|leaf| leaf.end_byte() <= position);
        idx.checked_sub(1).map(|i| self.leaves[i])
    }

    /// First leaf starting at or after `position`
    fn leaf_from(&self, position: usize) -> Option<Node<'s>> {
        let idx = self
            .leaves
            .partition_point(|leaf| leaf.start_byte() < position);
        self.leaves.get(idx).copied()
    }

    /// The token owning `position`: the token itself when inside one,
    /// otherwise the previous token if only same-line trivia separates
    /// them, otherwise the next token
    fn owning_leaf(&self, position: usize) -> Option<Node<'s>> {
        let position = position.min(self.text.len());
        let idx = self.leaves.partition_point(|leaf| leaf.end_byte() <= position);
        if let Some(leaf) = self.leaves.get(idx) {
            if leaf.start_byte() <= position {
                return Some(*leaf);
            }
        }

        let previous = idx.checked_sub(1).map(|i| self.leaves[i]);
        let next = self.leaves.get(idx).copied();
        match previous {
            Some(leaf) if !self.text[leaf.end_byte()..position].contains(['\n', '\r']) => Some(leaf),
            _ => next,
        }
    }

    fn token_containing(&self, position: usize) -> Option<Token> {
        self.tokens
            .iter()
            .find(|token| token.span.contains(position))
            .copied()
    }
}

fn collect_leaves(root: Node) -> Vec<Node> {
    let mut leaves = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        // Comments are extras and carry no syntax tokens
        if node.kind() != "comment" {
            if cursor.goto_first_child() {
                continue;
            }
            if !node.is_missing() && node.end_byte() > node.start_byte() {
                leaves.push(node);
            }
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                leaves.sort_by_key(|leaf| leaf.start_byte());
                return leaves;
            }
        }
    }
}

impl SyntaxFacts for CSharpSyntaxFacts {
    fn language(&self) -> LanguageId {
        CSHARP
    }

    fn exterior_marker(&self) -> &'static str {
        LINE_MARKER
    }

    fn parse(&self, text: &str, cancel: &CancellationToken) -> DocStubResult<SyntaxSnapshot> {
        if cancel.is_cancelled() {
            return Err(DocStubError::Cancelled {
                operation: "parse".to_string(),
            });
        }

        let tree = {
            let mut parser = self
                .parser
                .lock()
                .map_err(|e| DocStubError::General(format!("C# parser unavailable: {e}")))?;
            parser.parse(text, None)
        }
        .ok_or(DocStubError::ParseFailed {
            language: CSHARP,
            length: text.len(),
        })?;

        // A tree finished after cancellation is not trusted
        if cancel.is_cancelled() {
            return Err(DocStubError::Cancelled {
                operation: "parse".to_string(),
            });
        }

        if tree.root_node().has_error() {
            tracing::trace!(length = text.len(), "C# tree contains error nodes");
        }

        Ok(SyntaxSnapshot::new(CSHARP, text.to_string(), tree))
    }

    fn containing_declaration(
        &self,
        snapshot: &SyntaxSnapshot,
        position: usize,
    ) -> Option<Declaration> {
        let index = SnapshotIndex::build(snapshot);
        let leaf = index.owning_leaf(position)?;
        let (node, kind) = enclosing_declaration(leaf)?;
        Some(self.declaration(&index, node, kind))
    }

    fn token_at(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token> {
        let index = SnapshotIndex::build(snapshot);

        // Inside a documentation comment the marker belongs to the token
        // that follows it on the line
        if let Some(block) = index.comments.block_at(position) {
            let inside = comments::block_tokens(block)
                .into_iter()
                .find(|token| token.span.end > position);
            if inside.is_some() {
                return inside;
            }
        }

        index.owning_leaf(position).map(|leaf| Token {
            kind: TokenKind::Syntax,
            span: TextSpan::from_bounds(leaf.start_byte(), leaf.end_byte()),
        })
    }

    fn token_left_of(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token> {
        let index = SnapshotIndex::build(snapshot);
        let idx = index
            .tokens
            .partition_point(|token| token.span.start < position);
        idx.checked_sub(1).map(|i| index.tokens[i])
    }

    fn token_right_of(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Token> {
        if position >= snapshot.text().len() {
            return None;
        }
        let index = SnapshotIndex::build(snapshot);
        index
            .tokens
            .iter()
            .find(|token| token.span.end > position)
            .copied()
    }

    fn trivia_at(&self, snapshot: &SyntaxSnapshot, position: usize) -> Option<Trivia> {
        let index = SnapshotIndex::build(snapshot);
        if index.token_containing(position).is_some() {
            return None;
        }

        if let Some(block) = index.comments.block_at(position) {
            return Some(Trivia {
                kind: TriviaKind::DocumentationComment,
                span: block.span,
            });
        }
        if let Some(span) = index.comments.regular_at(position) {
            return Some(Trivia {
                kind: TriviaKind::Comment,
                span,
            });
        }

        if let Some(line_break) = comments::line_break_at(index.text, position) {
            return Some(Trivia {
                kind: TriviaKind::EndOfLine,
                span: line_break,
            });
        }

        let rest = index.text.get(position..)?;
        let width = rest
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace() || matches!(ch, '\r' | '\n'))
            .map_or(rest.len(), |(idx, _)| idx);
        (width > 0).then(|| Trivia {
            kind: TriviaKind::Whitespace,
            span: TextSpan::new(position, width),
        })
    }

    fn documentation_comment(
        &self,
        snapshot: &SyntaxSnapshot,
        token: &Token,
    ) -> Option<CommentBlock> {
        if token.kind == TokenKind::Syntax {
            return None;
        }
        let index = SnapshotIndex::build(snapshot);
        index.comments.block_at(token.span.start).cloned()
    }

    fn target_declaration(
        &self,
        snapshot: &SyntaxSnapshot,
        block: &CommentBlock,
    ) -> Option<Declaration> {
        let index = SnapshotIndex::build(snapshot);
        let leaf = index.leaf_from(block.span.end)?;
        let (node, kind) = enclosing_declaration(leaf)?;
        if !kind.supports_documentation() {
            return None;
        }

        let declaration = self.declaration(&index, node, kind);
        if declaration.first_token_start < block.span.start {
            return None;
        }
        Some(declaration)
    }
}

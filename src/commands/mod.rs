//! Command dispatcher: runs editor gestures through the continuation engine
//!
//! Each gesture follows the same two-phase shape. The host's default
//! behavior runs first (or alone, when a pre-check fails), then the engine
//! looks at the resulting buffer and may replace a bounded span of it.
//! Enter is the only gesture wrapped in an undo transaction.

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::{DocCommentConfig, Settings};
use crate::editor::{EditorHost, TextView, Transaction};
use crate::engine::DocCommentEngine;
use crate::error::DocStubResult;
use crate::syntax::{LanguageId, LanguageRegistry, SyntaxSnapshot};
use crate::text::TextLines;
use crate::types::{CommandOutcome, CommandState, Edit};

/// Undo label for the Enter transaction
pub const INSERT_NEW_LINE: &str = "Insert New Line";

/// The user actions the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// A character was typed; it has not been inserted yet
    TypeChar(char),
    /// Return key
    Enter,
    /// The explicit "insert documentation comment" command
    InsertComment,
    OpenLineAbove,
    OpenLineBelow,
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::TypeChar(_) => "type char",
            Gesture::Enter => "enter",
            Gesture::InsertComment => "insert comment",
            Gesture::OpenLineAbove => "open line above",
            Gesture::OpenLineBelow => "open line below",
        }
    }
}

pub struct DocCommentCommandHandler {
    engine: DocCommentEngine,
    config: DocCommentConfig,
}

impl DocCommentCommandHandler {
    pub fn new(engine: DocCommentEngine, config: DocCommentConfig) -> Self {
        Self { engine, config }
    }

    /// Build a handler for a registered language, honoring its enablement
    pub fn for_language(
        registry: &LanguageRegistry,
        id: LanguageId,
        settings: &Settings,
    ) -> DocStubResult<Self> {
        settings.validate()?;
        let facts = registry.create_facts(id, settings)?;
        Ok(Self::new(
            DocCommentEngine::new(facts),
            settings.doc_comments.clone(),
        ))
    }

    /// Build a handler for a file extension such as `cs`
    pub fn for_extension(
        registry: &LanguageRegistry,
        extension: &str,
        settings: &Settings,
    ) -> DocStubResult<Self> {
        settings.validate()?;
        let facts = registry.create_facts_for_extension(extension, settings)?;
        Ok(Self::new(
            DocCommentEngine::new(facts),
            settings.doc_comments.clone(),
        ))
    }

    pub fn engine(&self) -> &DocCommentEngine {
        &self.engine
    }

    pub fn config(&self) -> &DocCommentConfig {
        &self.config
    }

    /// Run `gesture` against `host`.
    ///
    /// `Handled` means the engine changed the buffer on top of (or instead
    /// of) the default behavior. `NotHandled` means the host ended up in
    /// exactly the state its own behavior would have produced.
    pub fn handle<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        gesture: Gesture,
        cancel: &CancellationToken,
    ) -> CommandOutcome {
        let outcome = match gesture {
            Gesture::TypeChar(ch) => self.type_char(host, ch, cancel),
            Gesture::Enter => self.enter(host, cancel),
            Gesture::InsertComment => self.insert_comment(host, cancel),
            Gesture::OpenLineAbove => {
                self.open_line(host, cancel, |host| host.open_line_above())
            }
            Gesture::OpenLineBelow => {
                self.open_line(host, cancel, |host| host.open_line_below())
            }
        };
        trace!(gesture = gesture.name(), ?outcome, "gesture handled");
        outcome
    }

    /// Availability of the insert command at the caret; never edits
    pub fn command_state<V: TextView + ?Sized>(
        &self,
        view: &V,
        cancel: &CancellationToken,
    ) -> CommandState {
        if !self.config.insert_on_command {
            return CommandState::Unavailable;
        }

        let Some(snapshot) = self.snapshot(view.text(), cancel, "command state") else {
            return CommandState::Unavailable;
        };

        match self.engine.target_for_command(&snapshot, view.caret()) {
            Some(_) => CommandState::Available,
            None => CommandState::Unavailable,
        }
    }

    fn type_char<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        ch: char,
        cancel: &CancellationToken,
    ) -> CommandOutcome {
        // The character always lands, whatever happens next
        host.type_char(ch);

        if ch != self.engine.facts().trigger_character() || !self.config.auto_generate {
            return CommandOutcome::NotHandled;
        }

        let Some(snapshot) = self.snapshot(host.text(), cancel, "type char") else {
            return CommandOutcome::NotHandled;
        };
        let edit = self
            .engine
            .on_character_typed(&snapshot, host.caret(), host.formatting());
        apply(host, edit)
    }

    fn enter<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        cancel: &CancellationToken,
    ) -> CommandOutcome {
        // Captured before the newline so token lookups stay unambiguous
        let original_position = host
            .selected_spans()
            .first()
            .map(|span| span.start)
            .unwrap_or_else(|| host.caret());

        if !self.line_starts_with_marker(host.text(), original_position) {
            host.insert_new_line();
            return CommandOutcome::NotHandled;
        }

        let mut transaction = Transaction::begin(host, INSERT_NEW_LINE);
        transaction.insert_new_line();

        let mut outcome = CommandOutcome::NotHandled;
        if self.config.auto_generate {
            if let Some(snapshot) = self.snapshot(transaction.text(), cancel, "enter") {
                let edit = self.engine.on_enter(
                    &snapshot,
                    transaction.caret(),
                    original_position,
                    transaction.formatting(),
                );
                outcome = apply(&mut *transaction, edit);
            }
        }

        // The newline is part of the step even when nothing was generated
        transaction.complete();
        outcome
    }

    fn insert_comment<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        cancel: &CancellationToken,
    ) -> CommandOutcome {
        if !self.config.insert_on_command {
            return CommandOutcome::NotHandled;
        }

        let Some(snapshot) = self.snapshot(host.text(), cancel, "insert comment") else {
            return CommandOutcome::NotHandled;
        };
        let edit = self
            .engine
            .on_insert_command(&snapshot, host.caret(), host.formatting());
        apply(host, edit)
    }

    fn open_line<H, F>(&self, host: &mut H, cancel: &CancellationToken, open: F) -> CommandOutcome
    where
        H: EditorHost + ?Sized,
        F: FnOnce(&mut H),
    {
        let starts_with_marker = self.line_starts_with_marker(host.text(), host.caret());
        open(&mut *host);
        if !starts_with_marker {
            return CommandOutcome::NotHandled;
        }

        // Nothing to parse, but a cancelled gesture must not edit
        if cancel.is_cancelled() {
            debug!("open line cancelled before carrying the marker over");
            return CommandOutcome::NotHandled;
        }

        let edit = self
            .engine
            .on_open_line(host.text(), host.caret(), host.formatting());
        apply(host, edit)
    }

    fn line_starts_with_marker(&self, text: &str, position: usize) -> bool {
        TextLines::new(text)
            .line_from_position(position)
            .starts_with_marker(self.engine.marker())
    }

    /// Parse the current text, turning failures into "defer"
    fn snapshot(
        &self,
        text: &str,
        cancel: &CancellationToken,
        operation: &str,
    ) -> Option<SyntaxSnapshot> {
        match self.engine.facts().parse(text, cancel) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(
                    operation,
                    code = %e.status_code(),
                    error = %e,
                    "falling back to default behavior"
                );
                None
            }
        }
    }
}

fn apply<V: TextView + ?Sized>(view: &mut V, edit: Option<Edit>) -> CommandOutcome {
    match edit {
        Some(edit) => {
            view.apply(&edit);
            CommandOutcome::Handled
        }
        None => CommandOutcome::NotHandled,
    }
}

//! Language registry for picking a syntax facts implementation
//!
//! The registry separates "available" from "enabled":
//! - Available: all grammars compiled into the binary
//! - Enabled: grammars switched on in settings.toml
//!
//! Hosts resolve a language once, when a document is opened, and keep
//! the resulting [`SyntaxFacts`] for the lifetime of the handler.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use super::SyntaxFacts;
use crate::error::{DocStubError, DocStubResult};
use crate::Settings;

/// Type-safe language identifier
///
/// Uses &'static str for zero-cost comparisons and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageId(&'static str);

impl LanguageId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for language modules to implement
pub trait LanguageDefinition: Send + Sync {
    /// Unique identifier, must match the key used in settings.toml
    fn id(&self) -> LanguageId;

    /// Human-readable name (e.g., "C#")
    fn name(&self) -> &'static str;

    /// Built-in file extensions, without the dot prefix
    fn extensions(&self) -> &'static [&'static str];

    /// Create the syntax facts for this language
    fn create_facts(&self) -> DocStubResult<Box<dyn SyntaxFacts>>;

    fn default_enabled(&self) -> bool {
        false
    }

    /// Default implementation checks `settings.languages[id].enabled`
    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.language_enabled(self.id().as_str(), self.default_enabled())
    }
}

pub struct LanguageRegistry {
    definitions: HashMap<LanguageId, Arc<dyn LanguageDefinition>>,
    extension_map: HashMap<&'static str, LanguageId>,
}

impl LanguageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
            extension_map: HashMap::new(),
        }
    }

    /// Registry with every grammar compiled into the crate
    pub fn with_builtin_languages() -> Self {
        let mut registry = Self::new();
        super::csharp::register(&mut registry);
        registry
    }

    pub fn register(&mut self, definition: Arc<dyn LanguageDefinition>) {
        let id = definition.id();
        crate::debug_print!("registering language {id} ({})", definition.name());
        for ext in definition.extensions() {
            self.extension_map.insert(ext, id);
        }
        self.definitions.insert(id, definition);
    }

    #[must_use]
    pub fn get(&self, id: LanguageId) -> Option<&dyn LanguageDefinition> {
        self.definitions.get(&id).map(|def| def.as_ref())
    }

    /// Resolve an extension, honoring `languages.<id>.extensions` in the
    /// settings before the built-in mapping
    #[must_use]
    pub fn get_by_extension(
        &self,
        extension: &str,
        settings: &Settings,
    ) -> Option<&dyn LanguageDefinition> {
        let ext = extension.strip_prefix('.').unwrap_or(extension);

        let configured = self.definitions.values().find(|def| {
            settings
                .languages
                .get(def.id().as_str())
                .is_some_and(|config| config.extensions.iter().any(|e| e == ext))
        });

        configured
            .map(|def| def.as_ref())
            .or_else(|| self.extension_map.get(ext).and_then(|id| self.get(*id)))
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &dyn LanguageDefinition> {
        self.definitions.values().map(|def| def.as_ref())
    }

    #[must_use]
    pub fn is_enabled(&self, id: LanguageId, settings: &Settings) -> bool {
        self.get(id)
            .map(|def| def.is_enabled(settings))
            .unwrap_or(false)
    }

    /// Create syntax facts for a language, checking availability and
    /// settings first
    pub fn create_facts(
        &self,
        id: LanguageId,
        settings: &Settings,
    ) -> DocStubResult<Box<dyn SyntaxFacts>> {
        let def = self.get(id).ok_or(DocStubError::LanguageNotFound(id))?;
        if !def.is_enabled(settings) {
            return Err(DocStubError::LanguageDisabled(id));
        }
        def.create_facts()
    }

    pub fn create_facts_for_extension(
        &self,
        extension: &str,
        settings: &Settings,
    ) -> DocStubResult<Box<dyn SyntaxFacts>> {
        let def = self
            .get_by_extension(extension, settings)
            .ok_or_else(|| DocStubError::ExtensionNotMapped(extension.to_string()))?;
        self.create_facts(def.id(), settings)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: LazyLock<Mutex<LanguageRegistry>> =
    LazyLock::new(|| Mutex::new(LanguageRegistry::with_builtin_languages()));

/// Get the global registry
pub fn get_registry() -> &'static Mutex<LanguageRegistry> {
    &REGISTRY
}

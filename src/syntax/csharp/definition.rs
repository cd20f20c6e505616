//! C# language definition and registration

use std::sync::Arc;

use super::CSharpSyntaxFacts;
use super::facts::CSHARP;
use crate::error::DocStubResult;
use crate::syntax::{LanguageDefinition, LanguageId, LanguageRegistry, SyntaxFacts};
use crate::Settings;

/// C# language definition
pub struct CSharpLanguage;

impl LanguageDefinition for CSharpLanguage {
    fn id(&self) -> LanguageId {
        CSHARP
    }

    fn name(&self) -> &'static str {
        "C#"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cs", "csx"]
    }

    fn create_facts(&self) -> DocStubResult<Box<dyn SyntaxFacts>> {
        Ok(Box::new(CSharpSyntaxFacts::new()?))
    }

    fn default_enabled(&self) -> bool {
        true // Enable C# by default
    }

    fn is_enabled(&self, settings: &Settings) -> bool {
        settings.language_enabled("csharp", self.default_enabled())
    }
}

/// Register C# language with the registry
pub(crate) fn register(registry: &mut LanguageRegistry) {
    registry.register(Arc::new(CSharpLanguage));
}

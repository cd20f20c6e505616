//! Configuration module for documentation comment synthesis.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.docstub/settings.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCSTUB_` and use double
//! underscores to separate nested levels:
//! - `DOCSTUB_FORMATTING__TAB_SIZE=2` sets `formatting.tab_size`
//! - `DOCSTUB_FORMATTING__USE_TABS=true` sets `formatting.use_tabs`
//! - `DOCSTUB_DOC_COMMENTS__AUTO_GENERATE=false` sets `doc_comments.auto_generate`

use crate::error::{DocStubError, DocStubResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

static GLOBAL_DEBUG: AtomicBool = AtomicBool::new(false);

/// Turn the `debug_print!` output on or off for the whole process
pub fn set_global_debug(enabled: bool) {
    GLOBAL_DEBUG.store(enabled, Ordering::Relaxed);
}

pub fn is_global_debug_enabled() -> bool {
    GLOBAL_DEBUG.load(Ordering::Relaxed)
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Default formatting for buffers that do not carry their own
    #[serde(default)]
    pub formatting: FormattingOptions,

    /// Feature switches for the gesture handlers
    #[serde(default)]
    pub doc_comments: DocCommentConfig,

    /// Language-specific settings
    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,
}

/// Per-buffer indentation and line-break settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FormattingOptions {
    /// Width of a tab stop in columns
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Indent with tabs (plus spaces for the remainder) instead of spaces
    #[serde(default = "default_false")]
    pub use_tabs: bool,

    /// Line terminator for generated text. When unset, the first line
    /// break found in the buffer is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DocCommentConfig {
    /// Generate stubs and continue markers while typing and on Enter
    #[serde(default = "default_true")]
    pub auto_generate: bool,

    /// Allow the explicit "insert comment" command
    #[serde(default = "default_true")]
    pub insert_on_command: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguageConfig {
    /// Whether this language is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File extensions for this language
    #[serde(default)]
    pub extensions: Vec<String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_tab_size() -> usize {
    4
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            formatting: FormattingOptions::default(),
            doc_comments: DocCommentConfig::default(),
            languages: default_languages(),
        }
    }
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            use_tabs: false,
            new_line: None,
        }
    }
}

impl Default for DocCommentConfig {
    fn default() -> Self {
        Self {
            auto_generate: true,
            insert_on_command: true,
        }
    }
}

fn default_languages() -> HashMap<String, LanguageConfig> {
    let mut langs = HashMap::new();

    langs.insert(
        "csharp".to_string(),
        LanguageConfig {
            enabled: true,
            extensions: vec!["cs".to_string(), "csx".to_string()],
        },
    );

    langs
}

impl FormattingOptions {
    pub fn with_tabs(tab_size: usize) -> Self {
        Self {
            tab_size,
            use_tabs: true,
            new_line: None,
        }
    }

    pub fn with_spaces(tab_size: usize) -> Self {
        Self {
            tab_size,
            use_tabs: false,
            new_line: None,
        }
    }

    /// Resolve the line terminator for edits against `text`
    pub fn new_line_for(&self, text: &str) -> String {
        if let Some(new_line) = &self.new_line {
            return new_line.clone();
        }

        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => "\r\n".to_string(),
            Some(_) => "\n".to_string(),
            None => match text.find('\r') {
                Some(_) => "\r".to_string(),
                None => "\n".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        // Try to find the workspace root by looking for .docstub directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".docstub/settings.toml"));

        Self::extract_valid(Self::figment(config_path))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::extract_valid(Self::figment(path.as_ref().to_path_buf()))
    }

    fn extract_valid(figment: Figment) -> Result<Self, Box<figment::Error>> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings
            .validate()
            .map_err(|err| Box::new(figment::Error::from(err.to_string())))?;
        Ok(settings)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscore
            // stays inside field names
            .merge(Env::prefixed("DOCSTUB_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Find the workspace config by looking for .docstub directory
    /// Searches from current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(".docstub");
            if config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    /// Reject values the indentation calculator cannot work with
    pub fn validate(&self) -> DocStubResult<()> {
        if self.formatting.tab_size == 0 {
            return Err(DocStubError::Config {
                reason: "formatting.tab_size must be greater than zero".to_string(),
            });
        }
        if let Some(new_line) = &self.formatting.new_line {
            if !matches!(new_line.as_str(), "\n" | "\r\n" | "\r") {
                return Err(DocStubError::Config {
                    reason: format!("formatting.new_line must be a line break, got {new_line:?}"),
                });
            }
        }
        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Whether a language id is switched on, falling back to `default`
    /// when the settings do not mention it
    pub fn language_enabled(&self, id: &str, default: bool) -> bool {
        self.languages
            .get(id)
            .map(|config| config.enabled)
            .unwrap_or(default)
    }
}

//! Shared configuration loader for the quire toolchain.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuireConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_babel::edit::Editor;
use quire_babel::formats::markdown::MarkdownRules;
use quire_babel::ir::nodes::Document;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub export: ExportConfig,
    pub editor: EditorConfig,
    pub convert: ConvertConfig,
}

/// Markdown export configuration groups.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub rules: MarkdownRulesConfig,
}

/// Mirrors the knobs exposed by the markdown exporter.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownRulesConfig {
    pub normalize_markers: bool,
    pub join_list_lines: bool,
    pub list_indent: usize,
}

impl From<&MarkdownRulesConfig> for MarkdownRules {
    fn from(config: &MarkdownRulesConfig) -> Self {
        MarkdownRules {
            normalize_markers: config.normalize_markers,
            join_list_lines: config.join_list_lines,
            list_indent: config.list_indent,
        }
    }
}

impl From<MarkdownRulesConfig> for MarkdownRules {
    fn from(config: MarkdownRulesConfig) -> Self {
        MarkdownRules::from(&config)
    }
}

impl MarkdownRulesConfig {
    /// The rules as `--extra-*` style options, for formats that take string options.
    pub fn to_options(&self) -> HashMap<String, String> {
        HashMap::from([
            (
                "normalize-markers".to_string(),
                self.normalize_markers.to_string(),
            ),
            (
                "join-list-lines".to_string(),
                self.join_list_lines.to_string(),
            ),
            ("list-indent".to_string(), self.list_indent.to_string()),
        ])
    }
}

/// Editing session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    pub history_limit: usize,
}

impl EditorConfig {
    /// Open an editing session over `document` with these settings.
    pub fn open(&self, document: Document) -> Editor {
        Editor::with_history_limit(document, self.history_limit)
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_babel::edit::UndoManager;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.export.rules.normalize_markers);
        assert_eq!(config.editor.history_limit, 100);
        assert!(!config.convert.json.pretty);
    }

    #[test]
    fn defaults_match_the_exporter_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        let rules: MarkdownRules = config.export.rules.into();
        assert_eq!(rules, MarkdownRules::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("export.rules.list_indent", 4_i64)
            .expect("override to apply")
            .set_override("convert.json.pretty", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.export.rules.list_indent, 4);
        assert!(config.convert.json.pretty);
    }

    #[test]
    fn rules_round_trip_through_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options = config.export.rules.to_options();
        let rules = MarkdownRules::from_options(&options).expect("options to parse");
        assert_eq!(rules, MarkdownRules::from(&config.export.rules));
    }

    #[test]
    fn editor_honors_history_limit() {
        let config = Loader::new()
            .set_override("editor.history_limit", 1_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let mut editor = config.editor.open(Document::default());
        editor.insert_paragraphs(0, "one");
        editor.insert_paragraphs(3, "two");
        assert!(editor.undo());
        assert!(!editor.undo());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
    }
}

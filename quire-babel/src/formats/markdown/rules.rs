use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Knobs for the markdown exporter. The defaults are the canonical export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownRules {
    /// Repair heading/list markers typed without their trailing space
    /// (`##title` → `## title`).
    pub normalize_markers: bool,

    /// Join consecutive list-looking blocks with a single newline instead of
    /// a blank line.
    pub join_list_lines: bool,

    /// Spaces of indentation per list nesting level.
    pub list_indent: usize,
}

impl Default for MarkdownRules {
    fn default() -> Self {
        Self {
            normalize_markers: true,
            join_list_lines: true,
            list_indent: 2,
        }
    }
}

impl MarkdownRules {
    /// Build rules from `--extra-*` style string options, starting at the defaults.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut rules = Self::default();
        for (key, value) in options {
            match key.as_str() {
                "normalize-markers" => rules.normalize_markers = parse_bool(key, value)?,
                "join-list-lines" => rules.join_list_lines = parse_bool(key, value)?,
                "list-indent" => {
                    rules.list_indent = value.parse().map_err(|_| FormatError::InvalidOption {
                        key: key.clone(),
                        message: format!("expected a non-negative integer, got '{value}'"),
                    })?
                }
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "markdown export has no option '{key}'"
                    )))
                }
            }
        }
        Ok(rules)
    }
}

pub(crate) fn parse_bool(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::InvalidOption {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

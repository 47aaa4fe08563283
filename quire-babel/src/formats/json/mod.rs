//! JSON tree format
//!
//! Reads and writes the persisted node tree (see [`crate::ir::json`]). Parsing
//! fails only when the input is not JSON at all; any JSON value decodes, with
//! unrecognized nodes dropped.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::rules::parse_bool;
use crate::ir::json::{document_from_value, document_to_value};
use crate::ir::nodes::Document;
use serde_json::Value;
use std::collections::HashMap;

/// Format implementation for the JSON node tree
pub struct JsonFormat;

impl JsonFormat {
    fn render(doc: &Document, pretty: bool) -> Result<String, FormatError> {
        let value = document_to_value(doc);
        let rendered = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON node tree (type/attrs/content/marks)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let value: Value =
            serde_json::from_str(source).map_err(|err| FormatError::ParseError(err.to_string()))?;
        Ok(document_from_value(&value))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Self::render(doc, false)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = false;
        for (key, value) in options {
            match key.as_str() {
                "pretty" => pretty = parse_bool(key, value)?,
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "json export has no option '{key}'"
                    )))
                }
            }
        }
        Self::render(doc, pretty)
    }
}

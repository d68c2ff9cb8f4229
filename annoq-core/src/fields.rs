//! Field-selection normalization.
//!
//! The backend projects annotation columns through one canonical JSON shape,
//! `{"_source": [names...]}`. Callers hand the selection over in any of three
//! equivalent forms: an inline list of names, the canonical JSON as a string,
//! or a path to a file holding that JSON. Every form resolves to a
//! [`FieldSpec`] once, at the API boundary, before anything touches the
//! network.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::consts::{MAX_SOURCE_FIELDS, SOURCE_FIELDS_KEY};
use crate::errors::{AnnoqError, Result};

/// A field selection as the caller supplied it, before normalization.
///
/// String input is classified by shape: a trimmed string wrapped in `{`/`}`
/// is inline JSON, anything else is a file path. A brace-wrapped string that
/// fails to parse reports the parse error rather than falling back to a path
/// probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// An inline collection of field names.
    Inline(Vec<String>),
    /// The canonical JSON object as a string, e.g. `{"_source": ["chr", "pos"]}`.
    JsonText(String),
    /// Path to a file containing the canonical JSON object.
    FilePath(PathBuf),
}

impl FieldInput {
    /// Classify a string form as inline JSON or a file path.
    pub fn from_text(text: &str) -> FieldInput {
        let trimmed = text.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            FieldInput::JsonText(trimmed.to_string())
        } else {
            FieldInput::FilePath(PathBuf::from(text))
        }
    }
}

impl From<Vec<String>> for FieldInput {
    fn from(names: Vec<String>) -> FieldInput {
        FieldInput::Inline(names)
    }
}

impl From<&[&str]> for FieldInput {
    fn from(names: &[&str]) -> FieldInput {
        FieldInput::Inline(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldInput {
    fn from(names: [&str; N]) -> FieldInput {
        FieldInput::Inline(names.iter().map(|name| name.to_string()).collect())
    }
}

/// A normalized field selection: ordered, de-duplicated annotation names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    names: Vec<String>,
}

impl FieldSpec {
    /// Normalize any accepted input form into a field selection.
    ///
    /// File input fails with [`AnnoqError::FileNotFound`] when the path does
    /// not name a readable file, and with the underlying JSON or shape error
    /// when the file content is not the canonical object.
    pub fn normalize(input: impl Into<FieldInput>) -> Result<FieldSpec> {
        let names = match input.into() {
            FieldInput::Inline(names) => names,
            FieldInput::JsonText(text) => parse_source_object(&text)?,
            FieldInput::FilePath(path) => {
                if !path.is_file() {
                    return Err(AnnoqError::FileNotFound(path.display().to_string()));
                }
                parse_source_object(&fs::read_to_string(&path)?)?
            }
        };
        Ok(FieldSpec::from_names(names))
    }

    /// Selection from a list of names, first occurrence of a duplicate wins.
    pub fn from_names(names: Vec<String>) -> FieldSpec {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        FieldSpec { names: unique }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The canonical JSON object form, `{"_source": [names...]}`.
    pub fn to_json(&self) -> String {
        let mut object = serde_json::Map::new();
        object.insert(
            SOURCE_FIELDS_KEY.to_string(),
            Value::from(self.names.clone()),
        );
        Value::Object(object).to_string()
    }

    /// The comma-joined form the REST endpoints take as a query parameter.
    pub fn as_query_param(&self) -> String {
        self.names.join(",")
    }

    /// Check the selection against the REST per-request field cap.
    pub fn ensure_within_rest_limit(&self) -> Result<()> {
        if self.names.len() > MAX_SOURCE_FIELDS {
            return Err(AnnoqError::InvalidArgument(format!(
                "{} fields selected but the REST endpoints accept at most {} per request",
                self.names.len(),
                MAX_SOURCE_FIELDS
            )));
        }
        Ok(())
    }
}

/// Parse the canonical `{"_source": [names...]}` object.
fn parse_source_object(text: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(object) = value else {
        return Err(AnnoqError::InvalidArgument(format!(
            "field selection must be a JSON object with a `{SOURCE_FIELDS_KEY}` key"
        )));
    };
    let Some(source) = object.get(SOURCE_FIELDS_KEY) else {
        return Err(AnnoqError::InvalidArgument(format!(
            "field selection object is missing the `{SOURCE_FIELDS_KEY}` key"
        )));
    };
    let Value::Array(items) = source else {
        return Err(AnnoqError::InvalidArgument(format!(
            "`{SOURCE_FIELDS_KEY}` must hold a list of field names, not {}",
            json_kind(source)
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AnnoqError::InvalidArgument(format!(
                    "field names must be strings, found {}",
                    json_kind(item)
                ))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

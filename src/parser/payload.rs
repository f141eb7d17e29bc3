//! Detection of the two payload shapes the review service emits.
//!
//! Raw-block payloads map each filename to one combined review string. Structured
//! payloads map each filename to an object keyed by category, each holding the
//! `{fast, deep}` pair of strings. The shape is decided once here so the parsers
//! never have to re-check it.

use super::Category;
use crate::error::PayloadError;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewPayload {
    RawBlock(Vec<(String, String)>),
    StructuredField(Vec<(String, StructuredReview)>),
}

/// The two reviewers' raw text for one category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPair {
    pub fast: String,
    pub deep: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredReview {
    pub bugs: FieldPair,
    pub code_style: FieldPair,
    pub security: FieldPair,
    pub suggestions: FieldPair,
}

impl StructuredReview {
    pub fn field(&self, category: Category) -> Option<&FieldPair> {
        match category {
            Category::Bugs => Some(&self.bugs),
            Category::CodeStyle => Some(&self.code_style),
            Category::Security => Some(&self.security),
            Category::Suggestions => Some(&self.suggestions),
            Category::CodeBlocks | Category::Explanation => None,
        }
    }

    fn field_mut(&mut self, category: Category) -> Option<&mut FieldPair> {
        match category {
            Category::Bugs => Some(&mut self.bugs),
            Category::CodeStyle => Some(&mut self.code_style),
            Category::Security => Some(&mut self.security),
            Category::Suggestions => Some(&mut self.suggestions),
            Category::CodeBlocks | Category::Explanation => None,
        }
    }
}

fn invalid(reason: impl Into<String>) -> PayloadError {
    PayloadError::InvalidPayloadShape(reason.into())
}

impl ReviewPayload {
    /// Parse a JSON response body.
    ///
    /// Returns `Ok(None)` when no payload is available (blank body or a `null`
    /// review), which callers treat as an empty collection.
    pub fn parse(raw: &str) -> Result<Option<Self>, PayloadError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| invalid(format!("body is not valid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Option<Self>, PayloadError> {
        let root = value
            .as_object()
            .ok_or_else(|| invalid("top-level payload is not a JSON object"))?;

        let review = match root.get("review") {
            None => return Err(invalid("missing `review` field")),
            Some(Value::Null) => return Ok(None),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(invalid("`review` is not an object")),
        };

        let mut raw = Vec::new();
        let mut structured = Vec::new();

        for (filename, entry) in review {
            match entry {
                Value::String(text) => raw.push((filename.clone(), text.clone())),
                Value::Object(fields) => {
                    structured.push((filename.clone(), parse_structured(filename, fields)?))
                }
                _ => {
                    return Err(invalid(format!(
                        "entry for '{}' is neither a string nor an object",
                        filename
                    )))
                }
            }
        }

        match (raw.is_empty(), structured.is_empty()) {
            (_, true) => Ok(Some(ReviewPayload::RawBlock(raw))),
            (true, false) => Ok(Some(ReviewPayload::StructuredField(structured))),
            (false, false) => Err(invalid(
                "payload mixes raw-block and structured-field entries",
            )),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReviewPayload::RawBlock(files) => files.len(),
            ReviewPayload::StructuredField(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn filenames(&self) -> Vec<&str> {
        match self {
            ReviewPayload::RawBlock(files) => files.iter().map(|(n, _)| n.as_str()).collect(),
            ReviewPayload::StructuredField(files) => {
                files.iter().map(|(n, _)| n.as_str()).collect()
            }
        }
    }
}

fn parse_structured(
    filename: &str,
    fields: &Map<String, Value>,
) -> Result<StructuredReview, PayloadError> {
    let mut review = StructuredReview::default();
    let mut known = 0usize;

    for (key, value) in fields {
        let Some(category) = Category::from_key(key) else {
            debug!("Ignoring unknown field '{}' for {}", key, filename);
            continue;
        };
        known += 1;

        let pair = parse_pair(value).ok_or_else(|| {
            invalid(format!(
                "field '{}' for '{}' is not a {{fast, deep}} pair",
                key, filename
            ))
        })?;
        if let Some(slot) = review.field_mut(category) {
            *slot = pair;
        }
    }

    if known == 0 {
        return Err(invalid(format!(
            "entry for '{}' has no known category fields",
            filename
        )));
    }

    Ok(review)
}

/// Accepts `{"fast": .., "deep": ..}` (or the `groq`/`gemini` names) and `[fast, deep]`
fn parse_pair(value: &Value) -> Option<FieldPair> {
    match value {
        Value::Object(map) => {
            let fast = text_member(map, &["fast", "groq"])?;
            let deep = text_member(map, &["deep", "gemini"])?;
            Some(FieldPair { fast, deep })
        }
        Value::Array(items) if items.len() == 2 => Some(FieldPair {
            fast: text_value(&items[0])?,
            deep: text_value(&items[1])?,
        }),
        _ => None,
    }
}

/// First present member among `names`; absent or null counts as empty text
fn text_member(map: &Map<String, Value>, names: &[&str]) -> Option<String> {
    match names.iter().find_map(|n| map.get(*n)) {
        Some(value) => text_value(value),
        None => Some(String::new()),
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

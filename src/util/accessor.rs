//! Dotted attribute path access over a JSON object graph.

use serde_json::Value;

use crate::error::{CriteriaError, CriteriaResult};

static NULL: Value = Value::Null;

/// Resolves a chain of attribute names, one object level per segment.
///
/// A `null` encountered before the last segment short-circuits reads to
/// `null`. Segments that do not exist are errors, not `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAccessor {
    segments: Vec<String>,
}

impl AttributeAccessor {
    /// Accessor for `owner.address.city`
    pub fn from_dotted(path: &str) -> CriteriaResult<Self> {
        Self::from_segments(path.split('.').map(str::to_string).collect())
    }

    pub fn from_segments(segments: Vec<String>) -> CriteriaResult<Self> {
        if segments.is_empty() {
            return Err(CriteriaError::unsupported_path("", "path has no segments"));
        }
        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(CriteriaError::unsupported_path(
                segments.join("."),
                "path contains an empty segment",
            ));
        }
        Ok(Self { segments })
    }

    pub fn path(&self) -> String {
        self.segments.join(".")
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn get<'a>(&self, target: &'a Value) -> CriteriaResult<&'a Value> {
        let mut current = target;
        for segment in &self.segments {
            current = match current {
                Value::Null => return Ok(&NULL),
                Value::Object(map) => map.get(segment).ok_or_else(|| self.not_found(segment))?,
                other => return Err(self.not_an_object(segment, other)),
            };
        }
        Ok(current)
    }

    /// Replaces the value of the last segment; the attribute must already exist.
    pub fn set(&self, target: &mut Value, value: Value) -> CriteriaResult<()> {
        let mut current = target;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get_mut(segment).ok_or_else(|| self.not_found(segment))?,
                other => return Err(self.not_an_object(segment, other)),
            };
        }
        *current = value;
        Ok(())
    }

    fn not_found(&self, segment: &str) -> CriteriaError {
        CriteriaError::AttributeNotFound {
            path: self.path(),
            segment: segment.to_string(),
        }
    }

    fn not_an_object(&self, segment: &str, value: &Value) -> CriteriaError {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        CriteriaError::unsupported_path(
            self.path(),
            format!("cannot access '{}' on a {} value", segment, kind),
        )
    }
}

//! Resource locator resolution
//!
//! A locator is what the host sends for "pick an entity": either a raw id
//! string or a structured `{mode, value}` selection made from a list picker.
//! Resolution is purely local; the pickers' search runs elsewhere.

use obscreen_domain::{ObscreenError, Result};
use serde_json::Value;

/// How the locator value was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocator {
    /// Selected from a searchable list.
    List(String),
    /// Typed in as a raw identifier.
    Id(String),
}

impl ResourceLocator {
    /// Parse a locator from its JSON form.
    ///
    /// # Errors
    ///
    /// [`ObscreenError::InvalidLocator`] when the value is neither a non-empty
    /// string/number nor an object carrying one under `value`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(_) | Value::Number(_) => Ok(Self::Id(scalar_id(value)?)),
            Value::Object(map) => {
                let id = map
                    .get("value")
                    .ok_or_else(|| ObscreenError::invalid_locator("missing `value` member"))
                    .and_then(scalar_id)?;
                match map.get("mode").and_then(Value::as_str) {
                    Some("list") => Ok(Self::List(id)),
                    _ => Ok(Self::Id(id)),
                }
            }
            Value::Null => Err(ObscreenError::invalid_locator("no value given")),
            other => Err(ObscreenError::invalid_locator(format!(
                "expected a string or an object with `value`, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::List(id) | Self::Id(id) => id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Self::List(id) | Self::Id(id) => id,
        }
    }
}

fn scalar_id(value: &Value) -> Result<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(ObscreenError::invalid_locator(format!(
                "`value` must be a string or number, got {}",
                json_kind(other)
            )))
        }
    };

    if id.is_empty() {
        return Err(ObscreenError::invalid_locator("identifier is empty"));
    }
    Ok(id)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolve a locator to a non-empty identifier string.
pub fn resolve_locator_id(value: &Value) -> Result<String> {
    ResourceLocator::from_value(value).map(ResourceLocator::into_id)
}

/// Like [`resolve_locator_id`], but treats "nothing selected" as `None`.
///
/// Absent, `null`, `""` and `{value: ""}` all mean no selection (e.g. the
/// root folder). Malformed shapes still fail.
pub fn resolve_optional_locator(value: Option<&Value>) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let blank = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => match map.get("value") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        },
        _ => false,
    };

    if blank {
        Ok(None)
    } else {
        resolve_locator_id(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_plain_string_is_id() {
        assert_eq!(resolve_locator_id(&json!("42")).unwrap(), "42");
        assert_eq!(resolve_locator_id(&json!(42)).unwrap(), "42");
    }

    #[test]
    fn test_structured_locator() {
        assert_eq!(resolve_locator_id(&json!({"mode": "list", "value": "42"})).unwrap(), "42");
        assert_eq!(resolve_locator_id(&json!({"mode": "id", "value": 7})).unwrap(), "7");
        assert_eq!(
            ResourceLocator::from_value(&json!({"mode": "list", "value": "9"})).unwrap(),
            ResourceLocator::List("9".into())
        );
    }

    #[test]
    fn test_invalid_shapes() {
        for value in [json!({}), json!(null), json!(""), json!(true), json!([1]), json!({"value": ""})]
        {
            let err = resolve_locator_id(&value).unwrap_err();
            assert!(matches!(err, ObscreenError::InvalidLocator { .. }), "{value}");
        }
    }

    #[test]
    fn test_optional_locator_blank_means_none() {
        assert_eq!(resolve_optional_locator(None).unwrap(), None);
        assert_eq!(resolve_optional_locator(Some(&json!(null))).unwrap(), None);
        assert_eq!(resolve_optional_locator(Some(&json!(""))).unwrap(), None);
        assert_eq!(
            resolve_optional_locator(Some(&json!({"mode": "list", "value": ""}))).unwrap(),
            None
        );
        assert_eq!(resolve_optional_locator(Some(&json!("3"))).unwrap(), Some("3".into()));
        assert!(resolve_optional_locator(Some(&json!([]))).is_err());
    }
}

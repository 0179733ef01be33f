//! Typed access to an input item's parameter bag
//!
//! Every getter distinguishes "absent" (`None`) from "explicitly set",
//! including `false`, `0` and `""`. A value of the wrong JSON type fails with
//! a [`ObscreenError::Validation`] naming the parameter.

use std::collections::BTreeMap;
use std::str::FromStr;

use obscreen_domain::{BinaryData, InputItem, ObscreenError, Result};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::locator::{json_kind, resolve_locator_id, resolve_optional_locator};

static EMPTY_PARAMS: Lazy<Map<String, Value>> = Lazy::new(Map::new);
static EMPTY_BINARY: BTreeMap<String, BinaryData> = BTreeMap::new();

/// Read-only view over one item's parameters and binaries
#[derive(Debug, Clone, Copy)]
pub struct ParameterBag<'a> {
    params: &'a Map<String, Value>,
    binary: &'a BTreeMap<String, BinaryData>,
}

impl<'a> ParameterBag<'a> {
    pub fn new(params: &'a Map<String, Value>) -> Self {
        Self { params, binary: &EMPTY_BINARY }
    }

    pub fn from_item(item: &'a InputItem) -> Self {
        Self { params: &item.json, binary: &item.binary }
    }

    /// Raw value, with `null` treated as absent.
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name).filter(|value| !value.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    pub fn string(&self, name: &str) -> Result<Option<String>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(wrong_type(name, "a string", other)),
        }
    }

    /// String that is present and non-empty; `""` counts as unset.
    pub fn non_empty_string(&self, name: &str) -> Result<Option<String>> {
        Ok(self.string(name)?.filter(|s| !s.is_empty()))
    }

    pub fn required_string(&self, name: &str) -> Result<String> {
        self.non_empty_string(name)?
            .ok_or_else(|| ObscreenError::validation(name, "a value is required"))
    }

    pub fn string_or(&self, name: &str, default: &str) -> Result<String> {
        Ok(self.non_empty_string(name)?.unwrap_or_else(|| default.to_string()))
    }

    /// Integer, accepting integral floats (`3.0`) as hosts often emit them.
    pub fn integer(&self, name: &str) -> Result<Option<i64>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integral_f64))
                .map(Some)
                .ok_or_else(|| ObscreenError::validation(name, format!("{n} is not an integer"))),
            Some(other) => Err(wrong_type(name, "an integer", other)),
        }
    }

    pub fn integer_or(&self, name: &str, default: i64) -> Result<i64> {
        Ok(self.integer(name)?.unwrap_or(default))
    }

    pub fn boolean(&self, name: &str) -> Result<Option<bool>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_type(name, "a boolean", other)),
        }
    }

    pub fn boolean_or(&self, name: &str, default: bool) -> Result<bool> {
        Ok(self.boolean(name)?.unwrap_or(default))
    }

    /// Wire enum parsed from a string parameter; `""` counts as unset.
    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = String>,
    {
        self.non_empty_string(name)?
            .map(|s| s.parse::<T>().map_err(|message| ObscreenError::validation(name, message)))
            .transpose()
    }

    pub fn parsed_or_default<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr<Err = String> + Default,
    {
        Ok(self.parsed(name)?.unwrap_or_default())
    }

    /// Required resource locator.
    pub fn locator(&self, name: &str) -> Result<String> {
        let value = self
            .raw(name)
            .ok_or_else(|| ObscreenError::invalid_locator(format!("`{name}` is missing")))?;
        resolve_locator_id(value)
    }

    pub fn optional_locator(&self, name: &str) -> Result<Option<String>> {
        resolve_optional_locator(self.raw(name))
    }

    /// Nested object parameter, or `None` when absent.
    pub fn object(&self, name: &str) -> Result<Option<ParameterBag<'a>>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Self { params: map, binary: self.binary })),
            Some(other) => Err(wrong_type(name, "an object", other)),
        }
    }

    pub fn array(&self, name: &str) -> Result<&'a [Value]> {
        match self.raw(name) {
            None => Ok(&[]),
            Some(Value::Array(values)) => Ok(values.as_slice()),
            Some(other) => Err(wrong_type(name, "an array", other)),
        }
    }

    /// Resource-mapper values.
    ///
    /// Accepts the host's `{mappingMode, value: {..}}` envelope or a plain
    /// object. Absent or `value: null` yields an empty bag.
    pub fn fields(&self, name: &str) -> Result<ParameterBag<'a>> {
        let map = match self.raw(name) {
            None => &*EMPTY_PARAMS,
            Some(Value::Object(map)) => match map.get("value") {
                Some(Value::Object(inner)) => inner,
                Some(Value::Null) => &*EMPTY_PARAMS,
                _ if map.contains_key("mappingMode") => &*EMPTY_PARAMS,
                _ => map,
            },
            Some(other) => return Err(wrong_type(name, "an object", other)),
        };
        Ok(Self { params: map, binary: &EMPTY_BINARY })
    }

    /// Binary attached to the item under `property`.
    pub fn binary(&self, property: &str) -> Result<&'a BinaryData> {
        self.binary.get(property).ok_or_else(|| {
            ObscreenError::validation(
                "binaryPropertyName",
                format!("no binary data found under property \"{property}\""),
            )
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.params.keys().map(String::as_str)
    }
}

/// `2^63`; integral floats in `[-2^63, 2^63)` fit an `i64` exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn integral_f64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f)).then(|| f as i64)
}

fn wrong_type(name: &str, expected: &str, actual: &Value) -> ObscreenError {
    ObscreenError::validation(name, format!("expected {expected}, got {}", json_kind(actual)))
}

//! Batch input parsing
//!
//! A batch is a JSON array (or a single value). Each element is either a full
//! item `{"json": {...}, "binary": {...}}` or a bare parameter object.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use obscreen_domain::InputItem;
use serde_json::Value;

/// Read a batch from `path`, or stdin for `-`/no path. Empty input is one
/// empty item.
pub fn read_batch(path: Option<&Path>) -> Result<Vec<InputItem>> {
    let text = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            buffer
        }
    };
    parse_batch(&text)
}

pub fn parse_batch(text: &str) -> Result<Vec<InputItem>> {
    if text.trim().is_empty() {
        return Ok(vec![InputItem::default()]);
    }

    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    match value {
        Value::Array(values) => values.into_iter().enumerate().map(|(i, v)| parse_item(i, v)).collect(),
        value => Ok(vec![parse_item(0, value)?]),
    }
}

fn parse_item(index: usize, value: Value) -> Result<InputItem> {
    let Value::Object(map) = value else {
        bail!("Input item {index} is not a JSON object");
    };

    if map.get("json").is_some_and(Value::is_object) {
        serde_json::from_value(Value::Object(map))
            .with_context(|| format!("Input item {index} has an invalid shape"))
    } else {
        Ok(InputItem::new(map))
    }
}

//! Endpoint, query string and body construction

use obscreen_domain::{BinaryData, FilePart, MultipartPayload};
use serde_json::{Map, Value};

/// Append the query parameters that carry a value to `path`.
///
/// `null` and `""` are skipped. Keys and values are percent-encoded and kept
/// in the given order.
pub fn build_url(path: &str, params: &[(&str, Value)]) -> String {
    let query = params
        .iter()
        .filter_map(|(key, value)| {
            query_value(value).map(|value| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(&value))
            })
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Ordered query parameter list feeding [`build_url`]
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(&'static str, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn param_opt<T: Into<Value>>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn build(&self, path: &str) -> String {
        build_url(path, &self.params)
    }
}

/// Shallow JSON body holding only the fields that were set
#[derive(Debug, Clone, Default)]
pub struct JsonBody {
    fields: Map<String, Value>,
}

impl JsonBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Set `key` only when `value` is `Some`; `Some(false)` is still sent.
    pub fn set_opt<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

/// Multipart form builder: text parts in order plus at most one file
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    payload: MultipartPayload,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.payload.fields.push((name.to_string(), value.into()));
        self
    }

    /// Add a text part unless `value` is `None` or empty.
    pub fn text_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::<String>::into) {
            Some(value) if !value.is_empty() => self.text(name, value),
            _ => self,
        }
    }

    pub fn file(mut self, field: &str, file: BinaryData) -> Self {
        self.payload.file = Some(FilePart { field: field.to_string(), file });
        self
    }

    pub fn build(self) -> MultipartPayload {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_build_url_skips_blank_values() {
        let url = build_url(
            "/api/contents/",
            &[("a", json!("")), ("b", Value::Null), ("c", json!("v"))],
        );
        assert_eq!(url, "/api/contents/?c=v");
    }

    #[test]
    fn test_build_url_without_params() {
        assert_eq!(build_url("/api/contents/types", &[]), "/api/contents/types");
        assert_eq!(build_url("/api/x", &[("a", Value::Null)]), "/api/x");
    }

    #[test]
    fn test_build_url_encodes_and_keeps_order() {
        let url = build_url(
            "/api/contents-folders/from-path",
            &[("path", json!("/Lobby/Spring 2024")), ("folder_id", json!(12)), ("x&y", json!(true))],
        );
        assert_eq!(
            url,
            "/api/contents-folders/from-path?path=%2FLobby%2FSpring%202024&folder_id=12&x%26y=true"
        );
    }

    #[test]
    fn test_query_params_builder() {
        let url = QueryParams::new()
            .param_opt("name", Some("Cat"))
            .param_opt::<String>("type", None)
            .param("folder_id", "3")
            .build("/api/contents/");
        assert_eq!(url, "/api/contents/?name=Cat&folder_id=3");
    }

    #[test]
    fn test_json_body_keeps_explicit_falsy_values() {
        let body = JsonBody::new()
            .set_opt("enabled", Some(false))
            .set_opt("duration", Some(0))
            .set_opt("name", Some(""))
            .set_opt::<bool>("loop_mode", None)
            .into_map();

        assert_eq!(Value::Object(body), json!({"enabled": false, "duration": 0, "name": ""}));
    }

    #[test]
    fn test_multipart_body() {
        let payload = MultipartBody::new()
            .text("name", "Logo")
            .text_opt("parent_folder_id", None::<String>)
            .text_opt("parent_folder_path", Some(""))
            .file("object", BinaryData::new("logo.png", "image/png", vec![1, 2]))
            .build();

        assert_eq!(payload.fields, vec![("name".to_string(), "Logo".to_string())]);
        let file = payload.file.unwrap();
        assert_eq!(file.field, "object");
        assert_eq!(file.file.file_name, "logo.png");
    }
}

//! Records emitted back to the host

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of one output record
#[derive(Debug, Clone, PartialEq)]
pub enum OutputRecord {
    Data(Value),
    Error(ErrorPayload),
}

/// Failure recorded in place of data when continue-on-fail is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: String,
    pub kind: String,
    pub status: Option<u16>,
}

/// One emitted record, tagged with the originating input position.
///
/// On the wire a data record is `{pairedItem, data}` and an error record is
/// `{pairedItem, error: <message>, errorKind, status?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutputWire", from = "OutputWire")]
pub struct OutputItem {
    pub paired_item: usize,
    pub record: OutputRecord,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputWire {
    paired_item: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl From<OutputItem> for OutputWire {
    fn from(item: OutputItem) -> Self {
        let paired_item = item.paired_item;
        match item.record {
            OutputRecord::Data(data) => Self {
                paired_item,
                data: Some(data),
                error: None,
                error_kind: None,
                status: None,
            },
            OutputRecord::Error(payload) => Self {
                paired_item,
                data: None,
                error: Some(payload.message),
                error_kind: Some(payload.kind),
                status: payload.status,
            },
        }
    }
}

impl From<OutputWire> for OutputItem {
    fn from(wire: OutputWire) -> Self {
        let record = match wire.error {
            Some(message) => OutputRecord::Error(ErrorPayload {
                message,
                kind: wire.error_kind.unwrap_or_default(),
                status: wire.status,
            }),
            None => OutputRecord::Data(wire.data.unwrap_or(Value::Null)),
        };
        Self { paired_item: wire.paired_item, record }
    }
}

impl OutputItem {
    pub fn data(paired_item: usize, json: Value) -> Self {
        Self { paired_item, record: OutputRecord::Data(json) }
    }

    pub fn error(paired_item: usize, payload: ErrorPayload) -> Self {
        Self { paired_item, record: OutputRecord::Error(payload) }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.record, OutputRecord::Error(_))
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.record {
            OutputRecord::Data(json) => Some(json),
            OutputRecord::Error(_) => None,
        }
    }
}

/// Outcome of a single file within a bulk upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResult {
    pub filename: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate of a bulk upload, one entry per file in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadResult {
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<FileUploadResult>,
}

impl BulkUploadResult {
    pub fn record_success(&mut self, filename: impl Into<String>, content_id: Option<i64>) {
        self.successful += 1;
        self.results.push(FileUploadResult {
            filename: filename.into(),
            success: true,
            content_id,
            error: None,
        });
    }

    pub fn record_failure(&mut self, filename: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.results.push(FileUploadResult {
            filename: filename.into(),
            success: false,
            content_id: None,
            error: Some(error.into()),
        });
    }
}

/// Entry returned by the list pickers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub value: Value,
    pub description: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_data_item_shape() {
        let item = OutputItem::data(2, json!({"id": 7}));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"pairedItem": 2, "data": {"id": 7}})
        );
    }

    #[test]
    fn test_error_item_shape() {
        let item = OutputItem::error(
            0,
            ErrorPayload { message: "nope".into(), kind: "api".into(), status: Some(404) },
        );
        assert!(item.is_error());
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"pairedItem": 0, "error": "nope", "errorKind": "api", "status": 404})
        );
    }

    #[test]
    fn test_error_item_reads_back() {
        let item: OutputItem =
            serde_json::from_value(json!({"pairedItem": 3, "error": "boom", "errorKind": "transport"}))
                .unwrap();
        assert_eq!(item.paired_item, 3);
        assert_eq!(
            item.record,
            OutputRecord::Error(ErrorPayload {
                message: "boom".into(),
                kind: "transport".into(),
                status: None
            })
        );
    }

    #[test]
    fn test_bulk_result_counts() {
        let mut result = BulkUploadResult::default();
        result.record_success("a.png", Some(1));
        result.record_failure("b.png", "boom");

        assert_eq!(result.successful, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.results[1].error.as_deref(), Some("boom"));
        assert_eq!(
            serde_json::to_value(&result.results[0]).unwrap(),
            json!({"filename": "a.png", "success": true, "contentId": 1})
        );
    }
}

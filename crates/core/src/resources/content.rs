//! Content operations

use obscreen_domain::constants::{
    is_binary_content_type, DEFAULT_BINARY_PROPERTY, DEFAULT_CONTENT_LOCATION,
    DEFAULT_CONTENT_TYPE, EXTERNAL_LOCATIONS,
};
use obscreen_domain::{
    ApiRequest, BulkUploadResult, ContentOperation, FolderDestination, ObscreenError,
    ResourceOperation, Result,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::{collect_entity_ids, deleted, entity_path, id_value};
use crate::mappings::MappedFields;
use crate::params::ParameterBag;
use crate::ports::ApiExecutor;
use crate::request_builder::{build_url, JsonBody, MultipartBody, QueryParams};

const CONTENTS: &str = "/api/contents/";
const CONTENT_TYPES: &str = "/api/contents/types";
const CONTENT_LOCATION: &str = "/api/contents/location/";
const MOVE_BULK: &str = "/api/contents/folder/move-bulk";
const UPLOAD_BULK: &str = "/api/contents/upload-bulk";

pub async fn execute(
    operation: ContentOperation,
    executor: &dyn ApiExecutor,
    params: &ParameterBag<'_>,
) -> Result<Value> {
    match operation {
        ContentOperation::Create => executor.execute(create_request(params)?).await,
        ContentOperation::Delete => {
            let id = params.locator("contentId")?;
            executor.execute(ApiRequest::delete(entity_path(CONTENTS, &id))).await?;
            Ok(deleted())
        }
        ContentOperation::Get => {
            let id = params.locator("contentId")?;
            executor.execute(ApiRequest::get(entity_path(CONTENTS, &id))).await
        }
        ContentOperation::GetAll => executor.execute(get_all_request(params)?).await,
        ContentOperation::GetLocation => {
            let id = params.locator("contentId")?;
            executor.execute(ApiRequest::get(entity_path(CONTENT_LOCATION, &id))).await
        }
        ContentOperation::GetTypes => executor.execute(ApiRequest::get(CONTENT_TYPES)).await,
        ContentOperation::MoveToFolder => executor.execute(move_to_folder_request(params)?).await,
        ContentOperation::Update => executor.execute(update_request(params)?).await,
        ContentOperation::UploadBulk => upload_bulk(executor, params).await,
    }
}

fn create_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let name = params.string("name")?;
    let content_type = params.string_or("type", DEFAULT_CONTENT_TYPE)?;
    let (folder_id, folder_path) = destination(params)?;

    if is_binary_content_type(&content_type) {
        let property = params.string_or("binaryPropertyName", DEFAULT_BINARY_PROPERTY)?;
        let file = params.binary(&property)?.clone();
        let name = name.unwrap_or_else(|| file.file_name.clone());

        let form = MultipartBody::new()
            .text("name", name)
            .text("type", content_type)
            .text_opt("parent_folder_id", folder_id)
            .text_opt("parent_folder_path", folder_path)
            .file("object", file)
            .build();
        return Ok(ApiRequest::post(CONTENTS).with_multipart(form));
    }

    let location = params.string_or("location", DEFAULT_CONTENT_LOCATION)?;
    if !EXTERNAL_LOCATIONS.contains(&location.as_str()) {
        return Err(ObscreenError::validation(
            "location",
            format!("\"{location}\" is not one of {}", EXTERNAL_LOCATIONS.join(", ")),
        ));
    }
    let object = params.required_string("object")?;

    let body = JsonBody::new()
        .set_opt("name", name)
        .set("type", content_type)
        .set("location", location)
        .set("object", object)
        .set_opt("parent_folder_id", folder_id.as_deref().map(id_value))
        .set_opt("parent_folder_path", folder_path)
        .into_map();
    Ok(ApiRequest::post(CONTENTS).with_json(body))
}

/// Parent folder for new content: `(folder id, folder path)`, at most one set.
fn destination(params: &ParameterBag<'_>) -> Result<(Option<String>, Option<String>)> {
    match params.parsed_or_default::<FolderDestination>("folderDestination")? {
        FolderDestination::List => Ok((params.optional_locator("folderId")?, None)),
        FolderDestination::Path => Ok((None, Some(params.required_string("path")?))),
        FolderDestination::Root => Ok((None, None)),
    }
}

fn get_all_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let folder_id = params.optional_locator("folderId")?;
    let folder_path = match folder_id {
        Some(_) => None,
        None => params.non_empty_string("path")?,
    };

    let path = QueryParams::new()
        .param_opt("name", params.non_empty_string("name")?)
        .param_opt("type", params.non_empty_string("type")?)
        .param_opt("folder_id", folder_id)
        .param_opt("folder_path", folder_path)
        .build(CONTENTS);
    Ok(ApiRequest::get(path))
}

fn update_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let id = params.locator("contentId")?;
    let fields = MappedFields::read(params, ResourceOperation::Content(ContentOperation::Update))?;
    let name = fields.non_empty_string("name")?;

    let path = build_url(&entity_path(CONTENTS, &id), &[("name", name.map_or(Value::Null, Value::from))]);
    Ok(ApiRequest::put(path))
}

/// Bulk move of contents into a folder. Shared with the content-folder registry.
pub(crate) fn move_to_folder_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let entity_ids = collect_entity_ids(params, "contentCollection", "contentIds", "contentId")?;
    let folder_id = params.optional_locator("folderId")?;
    let path = params.non_empty_string("path")?;

    let body = JsonBody::new()
        .set("entity_ids", entity_ids)
        .set_opt("folder_id", folder_id.as_deref().map(id_value))
        .set_opt("path", path)
        .into_map();
    Ok(ApiRequest::post(MOVE_BULK).with_json(body))
}

/// Upload each URL in turn, recording per-file outcomes without aborting.
///
/// No URLs means nothing to upload and an all-zero result.
async fn upload_bulk(executor: &dyn ApiExecutor, params: &ParameterBag<'_>) -> Result<Value> {
    let urls = bulk_urls(params)?;
    let endpoint = QueryParams::new()
        .param_opt("path", params.non_empty_string("path")?)
        .param_opt("folder_id", params.optional_locator("folderId")?)
        .build(UPLOAD_BULK);

    let mut result = BulkUploadResult::default();
    for url in urls {
        let form = MultipartBody::new().text("object", url.clone()).build();
        match executor.execute(ApiRequest::post(endpoint.clone()).with_multipart(form)).await {
            Ok(response) => {
                debug!(file = %url, "Bulk upload entry stored");
                result.record_success(url, response.get("id").and_then(Value::as_i64));
            }
            Err(err) => {
                warn!(file = %url, error = %err, "Bulk upload entry failed");
                let message = upload_error_message(&err, &url);
                result.record_failure(url, message);
            }
        }
    }

    serde_json::to_value(result).map_err(|e| ObscreenError::internal(e.to_string()))
}

fn bulk_urls(params: &ParameterBag<'_>) -> Result<Vec<String>> {
    let entries = match params.object("object")? {
        Some(object) => object.array("urls")?,
        None => &[],
    };

    let urls: Vec<String> = entries
        .iter()
        .map(|entry| match entry {
            Value::String(url) => Some(url.clone()),
            other => other.get("url").and_then(Value::as_str).map(str::to_string),
        })
        .map(|url| {
            url.filter(|u| !u.trim().is_empty())
                .ok_or_else(|| ObscreenError::validation("object.urls", "every entry needs a `url`"))
        })
        .collect::<Result<_>>()?;
    Ok(urls)
}

/// Per-file failure text for bulk uploads.
pub fn upload_error_message(error: &ObscreenError, filename: &str) -> String {
    match error.status() {
        Some(413) => format!("File \"{filename}\" is too large"),
        Some(415) => format!("File \"{filename}\" has unsupported format"),
        _ => format!("Failed to upload \"{filename}\": {error}"),
    }
}

#[cfg(test)]
mod tests {
    use obscreen_domain::{BinaryData, HttpMethod, InputItem, RequestBody};
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingExecutor;

    async fn run(op: ContentOperation, item: &InputItem, executor: &RecordingExecutor) -> Result<Value> {
        execute(op, executor, &ParameterBag::from_item(item)).await
    }

    #[tokio::test]
    async fn test_create_picture_is_multipart() {
        let item = InputItem::from_value(json!({
            "name": "Logo",
            "type": "picture",
            "folderDestination": "list",
            "folderId": {"mode": "list", "value": "4"}
        }))
        .with_binary("data", BinaryData::new("logo.png", "image/png", vec![1, 2, 3]));
        let executor = RecordingExecutor::new().respond(json!({"id": 10}));

        let result = run(ContentOperation::Create, &item, &executor).await.unwrap();
        assert_eq!(result, json!({"id": 10}));

        let request = executor.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/contents/");
        let form = request.body.as_multipart().unwrap();
        assert_eq!(form.field("name"), Some("Logo"));
        assert_eq!(form.field("type"), Some("picture"));
        assert_eq!(form.field("parent_folder_id"), Some("4"));
        let file = form.file.as_ref().unwrap();
        assert_eq!(file.field, "object");
        assert_eq!(file.file.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_create_binary_without_data_fails_before_request() {
        let item = InputItem::from_value(json!({"name": "Clip", "type": "video"}));
        let executor = RecordingExecutor::new();

        let err = run(ContentOperation::Create, &item, &executor).await.unwrap_err();
        assert!(matches!(err, ObscreenError::Validation { .. }));
        assert_eq!(executor.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_url_content_is_json_with_path_destination() {
        let item = InputItem::from_value(json!({
            "name": "Site",
            "type": "url",
            "object": "https://example.com",
            "folderDestination": "path",
            "path": "/Lobby"
        }));
        let executor = RecordingExecutor::new();

        run(ContentOperation::Create, &item, &executor).await.unwrap();

        let request = executor.last_request().unwrap();
        assert_eq!(
            Value::Object(request.body.as_json().unwrap().clone()),
            json!({
                "name": "Site",
                "type": "url",
                "location": "url",
                "object": "https://example.com",
                "parent_folder_path": "/Lobby"
            })
        );
    }

    #[tokio::test]
    async fn test_create_root_destination_sends_no_folder() {
        let item = InputItem::from_value(json!({
            "type": "youtube",
            "object": "dQw4w9WgXcQ",
            "folderDestination": "root",
            "folderId": "9"
        }));
        let executor = RecordingExecutor::new();

        run(ContentOperation::Create, &item, &executor).await.unwrap();

        let body = executor.last_request().unwrap().body;
        let json = body.as_json().unwrap();
        assert!(!json.contains_key("parent_folder_id"));
        assert!(!json.contains_key("name"));
    }

    #[tokio::test]
    async fn test_delete_emits_deleted_marker() {
        let item = InputItem::from_value(json!({"contentId": "42"}));
        let executor = RecordingExecutor::new();

        let result = run(ContentOperation::Delete, &item, &executor).await.unwrap();
        assert_eq!(result, json!({"deleted": true}));
        let request = executor.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "/api/contents/42");
    }

    #[tokio::test]
    async fn test_get_all_filters() {
        let item = InputItem::from_value(json!({"name": "cat", "type": "", "path": "/Lobby"}));
        let executor = RecordingExecutor::new().respond(json!([]));

        run(ContentOperation::GetAll, &item, &executor).await.unwrap();
        assert_eq!(executor.last_request().unwrap().path, "/api/contents/?name=cat&folder_path=%2FLobby");

        let item = InputItem::from_value(json!({"folderId": {"mode": "list", "value": "5"}, "path": "/x"}));
        run(ContentOperation::GetAll, &item, &executor).await.unwrap();
        assert_eq!(executor.last_request().unwrap().path, "/api/contents/?folder_id=5");
    }

    #[tokio::test]
    async fn test_location_and_types() {
        let executor = RecordingExecutor::new();
        let item = InputItem::from_value(json!({"contentId": "3"}));

        run(ContentOperation::GetLocation, &item, &executor).await.unwrap();
        run(ContentOperation::GetTypes, &item, &executor).await.unwrap();

        let paths: Vec<_> = executor.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/api/contents/location/3", "/api/contents/types"]);
    }

    #[tokio::test]
    async fn test_update_sends_name_as_query() {
        let item = InputItem::from_value(json!({
            "contentId": "8",
            "fields": {"mappingMode": "defineBelow", "value": {"name": "New name", "type": "video"}}
        }));
        let executor = RecordingExecutor::new();

        run(ContentOperation::Update, &item, &executor).await.unwrap();

        let request = executor.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/api/contents/8?name=New%20name");
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_update_without_name_omits_query() {
        let item = InputItem::from_value(json!({"contentId": "8", "fields": {"value": {"name": ""}}}));
        let executor = RecordingExecutor::new();

        run(ContentOperation::Update, &item, &executor).await.unwrap();
        assert_eq!(executor.last_request().unwrap().path, "/api/contents/8");
    }

    #[tokio::test]
    async fn test_move_to_folder_body() {
        let item = InputItem::from_value(json!({
            "contentCollection": {"contentIds": [{"contentId": "1"}, {"contentId": {"mode": "list", "value": 2}}]},
            "folderId": "6"
        }));
        let executor = RecordingExecutor::new();

        run(ContentOperation::MoveToFolder, &item, &executor).await.unwrap();

        let request = executor.last_request().unwrap();
        assert_eq!(request.path, "/api/contents/folder/move-bulk");
        assert_eq!(
            Value::Object(request.body.as_json().unwrap().clone()),
            json!({"entity_ids": [1, 2], "folder_id": 6})
        );
    }

    #[tokio::test]
    async fn test_upload_bulk_partial_failure() {
        let item = InputItem::from_value(json!({
            "path": "/Lobby",
            "object": {"urls": [
                {"url": "https://a.test/1.png"},
                {"url": "https://a.test/2.png"},
                {"url": "https://a.test/3.png"}
            ]}
        }));
        let executor = RecordingExecutor::new()
            .respond(json!({"id": 11}))
            .fail(ObscreenError::api(413, "Payload Too Large"))
            .respond(json!({"id": 13}));

        let result = run(ContentOperation::UploadBulk, &item, &executor).await.unwrap();

        assert_eq!(result["successful"], 2);
        assert_eq!(result["failed"], 1);
        let results = result["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["success"], true);
        assert_eq!(results[0]["contentId"], 11);
        assert_eq!(results[1]["success"], false);
        assert_eq!(results[1]["error"], "File \"https://a.test/2.png\" is too large");
        assert_eq!(results[2]["filename"], "https://a.test/3.png");

        let requests = executor.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].path, "/api/contents/upload-bulk?path=%2FLobby");
        assert_eq!(requests[1].body.as_multipart().unwrap().field("object"), Some("https://a.test/2.png"));
    }

    #[tokio::test]
    async fn test_upload_bulk_without_urls_is_empty_result() {
        let executor = RecordingExecutor::new();
        for params in [json!({"object": {"urls": []}}), json!({})] {
            let item = InputItem::from_value(params);
            let result = run(ContentOperation::UploadBulk, &item, &executor).await.unwrap();
            assert_eq!(result, json!({"successful": 0, "failed": 0, "results": []}));
        }
        assert_eq!(executor.request_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_bulk_entry_without_url_fails() {
        let item = InputItem::from_value(json!({"object": {"urls": [{"url": " "}]}}));
        let executor = RecordingExecutor::new();

        let err = run(ContentOperation::UploadBulk, &item, &executor).await.unwrap_err();
        assert!(matches!(err, ObscreenError::Validation { .. }));
        assert_eq!(executor.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_location() {
        let item = InputItem::from_value(json!({
            "type": "url",
            "location": "ftp",
            "object": "ftp://example.com/a"
        }));
        let executor = RecordingExecutor::new();

        let err = run(ContentOperation::Create, &item, &executor).await.unwrap_err();
        assert!(matches!(err, ObscreenError::Validation { ref field, .. } if field == "location"));
        assert_eq!(executor.request_count(), 0);
    }

    #[test]
    fn test_upload_error_messages() {
        assert_eq!(
            upload_error_message(&ObscreenError::api(415, "x"), "a.bmp"),
            "File \"a.bmp\" has unsupported format"
        );
        assert_eq!(
            upload_error_message(&ObscreenError::transport("refused"), "a.png"),
            "Failed to upload \"a.png\": Transport error: refused"
        );
    }
}

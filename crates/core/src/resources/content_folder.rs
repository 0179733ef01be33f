//! Content folder operations

use obscreen_domain::{ApiRequest, ContentFolderOperation, FolderLookup, ObscreenError, Result};
use serde_json::Value;

use super::{collect_entity_ids, content, deleted, entity_path, id_value};
use crate::params::ParameterBag;
use crate::ports::ApiExecutor;
use crate::request_builder::{build_url, JsonBody};

const FOLDERS: &str = "/api/contents-folders/";
const FROM_PATH: &str = "/api/contents-folders/from-path";
const MOVE_BULK: &str = "/api/contents-folders/move-bulk";

pub async fn execute(
    operation: ContentFolderOperation,
    executor: &dyn ApiExecutor,
    params: &ParameterBag<'_>,
) -> Result<Value> {
    let request = match operation {
        ContentFolderOperation::Create => create_request(params)?,
        ContentFolderOperation::Delete => {
            let id = params.locator("folderId")?;
            executor.execute(ApiRequest::delete(entity_path(FOLDERS, &id))).await?;
            return Ok(deleted());
        }
        ContentFolderOperation::Get => get_request(params)?,
        ContentFolderOperation::GetAll => ApiRequest::get(FOLDERS),
        ContentFolderOperation::MoveContentsToFolder => content::move_to_folder_request(params)?,
        ContentFolderOperation::MoveFolderToFolder => move_folders_request(params)?,
        ContentFolderOperation::Update => update_request(params)?,
    };
    executor.execute(request).await
}

fn create_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let body = JsonBody::new()
        .set("name", params.required_string("name")?)
        .set_opt(
            "parent_folder_id",
            params.optional_locator("parentFolderId")?.as_deref().map(id_value),
        )
        .into_map();
    Ok(ApiRequest::post(FOLDERS).with_json(body))
}

fn get_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    match params.parsed_or_default::<FolderLookup>("lookupBy")? {
        FolderLookup::Id => {
            let id = params.locator("folderId")?;
            Ok(ApiRequest::get(entity_path(FOLDERS, &id)))
        }
        FolderLookup::Path => {
            let path = params.required_string("path")?;
            Ok(ApiRequest::get(build_url(FROM_PATH, &[("path", Value::String(path))])))
        }
    }
}

fn update_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let id = params.locator("folderId")?;
    let name = params.non_empty_string("name")?;
    let parent = params.optional_locator("parentFolderId")?;

    if name.is_none() && parent.is_none() {
        return Err(ObscreenError::validation(
            "name",
            "set a new name, a new parent folder, or both",
        ));
    }

    let body = JsonBody::new()
        .set_opt("name", name)
        .set_opt("parent_folder_id", parent.as_deref().map(id_value))
        .into_map();
    Ok(ApiRequest::put(entity_path(FOLDERS, &id)).with_json(body))
}

fn move_folders_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let entity_ids = collect_entity_ids(params, "folderCollection", "folderIds", "folderId")?;
    // No parent selected moves the folders to the root.
    let parent = params
        .optional_locator("parentFolderId")?
        .as_deref()
        .map_or(Value::Null, id_value);

    let body = JsonBody::new()
        .set("entity_ids", entity_ids)
        .set("parent_folder_id", parent)
        .into_map();
    Ok(ApiRequest::post(MOVE_BULK).with_json(body))
}

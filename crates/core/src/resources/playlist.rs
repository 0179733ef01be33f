//! Playlist operations

use obscreen_domain::{ApiRequest, LoopMode, PlaylistOperation, ResourceOperation, Result};
use serde_json::Value;

use super::{deleted, entity_path};
use crate::mappings::MappedFields;
use crate::params::ParameterBag;
use crate::ports::ApiExecutor;
use crate::request_builder::JsonBody;

const PLAYLISTS: &str = "/api/playlists/";

pub async fn execute(
    operation: PlaylistOperation,
    executor: &dyn ApiExecutor,
    params: &ParameterBag<'_>,
) -> Result<Value> {
    let request = match operation {
        PlaylistOperation::Create => create_request(params)?,
        PlaylistOperation::Delete => {
            let id = params.locator("playlistId")?;
            executor.execute(ApiRequest::delete(entity_path(PLAYLISTS, &id))).await?;
            return Ok(deleted());
        }
        PlaylistOperation::Get => ApiRequest::get(entity_path(PLAYLISTS, &params.locator("playlistId")?)),
        PlaylistOperation::GetAll => ApiRequest::get(PLAYLISTS),
        PlaylistOperation::GetNotifications => ApiRequest::get(format!(
            "{}/notifications",
            entity_path(PLAYLISTS, &params.locator("playlistId")?)
        )),
        PlaylistOperation::GetSlides => ApiRequest::get(format!(
            "{}/slides",
            entity_path(PLAYLISTS, &params.locator("playlistId")?)
        )),
        PlaylistOperation::Update => update_request(params)?,
    };
    executor.execute(request).await
}

fn create_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let name = params.required_string("name")?;
    let fields = MappedFields::read(params, ResourceOperation::Playlist(PlaylistOperation::Create))?;

    let body = JsonBody::new()
        .set("name", name)
        .set_opt("loop_mode", fields.parsed::<LoopMode>("loopMode")?.map(|m| m.as_str()))
        .set_opt("enabled", fields.boolean("enabled")?)
        .into_map();
    Ok(ApiRequest::post(PLAYLISTS).with_json(body))
}

fn update_request(params: &ParameterBag<'_>) -> Result<ApiRequest> {
    let id = params.locator("playlistId")?;
    let fields = MappedFields::read(params, ResourceOperation::Playlist(PlaylistOperation::Update))?;

    let body = JsonBody::new()
        .set_opt("name", fields.non_empty_string("name")?)
        .set_opt("loop_mode", fields.parsed::<LoopMode>("loopMode")?.map(|m| m.as_str()))
        .set_opt("enabled", fields.boolean("enabled")?)
        .into_map();
    Ok(ApiRequest::put(entity_path(PLAYLISTS, &id)).with_json(body))
}

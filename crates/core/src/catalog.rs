//! Display metadata for every operation

use obscreen_domain::{
    ContentFolderOperation, ContentOperation, PlaylistOperation, ProcessOperation, Resource,
    ResourceOperation, SlideOperation,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub value: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

const fn info(
    value: &'static str,
    name: &'static str,
    description: &'static str,
    action: &'static str,
) -> OperationInfo {
    OperationInfo { value, name, description, action }
}

pub fn operation_info(operation: ResourceOperation) -> OperationInfo {
    let value = operation.operation_name();
    match operation {
        ResourceOperation::Content(op) => match op {
            ContentOperation::Create => {
                info(value, "Create", "Upload new content to Obscreen", "Create content")
            }
            ContentOperation::Delete => {
                info(value, "Delete", "Delete content permanently", "Delete content")
            }
            ContentOperation::Get => info(value, "Get", "Get content information by ID", "Get content"),
            ContentOperation::GetAll => {
                info(value, "Get Many", "Retrieve a list of contents", "Get many contents")
            }
            ContentOperation::GetLocation => {
                info(value, "Get Location", "Get content location by ID", "Get content location")
            }
            ContentOperation::GetTypes => {
                info(value, "Get Types", "List the available content types", "Get content types")
            }
            ContentOperation::MoveToFolder => info(
                value,
                "Move to Folder",
                "Move multiple content items to another folder",
                "Move content to folder",
            ),
            ContentOperation::Update => info(value, "Update", "Update existing content", "Update content"),
            ContentOperation::UploadBulk => info(
                value,
                "Upload Multiple Files",
                "Upload multiple content files at once",
                "Upload multiple files",
            ),
        },
        ResourceOperation::ContentFolder(op) => match op {
            ContentFolderOperation::Create => info(
                value,
                "Create Folder",
                "Create a new content folder",
                "Create content folder",
            ),
            ContentFolderOperation::Delete => {
                info(value, "Delete Folder", "Delete a content folder", "Delete content folder")
            }
            ContentFolderOperation::Get => info(
                value,
                "Get Folder",
                "Get a content folder by ID or by path",
                "Get content folder",
            ),
            ContentFolderOperation::GetAll => info(
                value,
                "Get Many",
                "Retrieve a list of content folders",
                "Get many content folders",
            ),
            ContentFolderOperation::MoveContentsToFolder => info(
                value,
                "Move Contents to Folder",
                "Move multiple content items into a folder",
                "Move contents to folder",
            ),
            ContentFolderOperation::MoveFolderToFolder => info(
                value,
                "Move Folders to Folder",
                "Move multiple folders under another folder",
                "Move folders to folder",
            ),
            ContentFolderOperation::Update => {
                info(value, "Update Folder", "Update a content folder", "Update content folder")
            }
        },
        ResourceOperation::Playlist(op) => match op {
            PlaylistOperation::Create => info(value, "Create", "Create new playlist", "Create playlist"),
            PlaylistOperation::Delete => {
                info(value, "Delete", "Delete playlist permanently", "Delete playlist")
            }
            PlaylistOperation::Get => {
                info(value, "Get", "Get playlist information by ID", "Get playlist")
            }
            PlaylistOperation::GetAll => {
                info(value, "Get Many", "Retrieve list of playlists", "Get many playlists")
            }
            PlaylistOperation::GetNotifications => info(
                value,
                "Get Notifications",
                "Get notifications associated with playlist",
                "Get playlist notifications",
            ),
            PlaylistOperation::GetSlides => info(
                value,
                "Get Slides",
                "Get slides associated with playlist",
                "Get playlist slides",
            ),
            PlaylistOperation::Update => info(value, "Update", "Update playlist", "Update playlist"),
        },
        ResourceOperation::Slide(op) => match op {
            SlideOperation::Create => info(value, "Create", "Add a new slide to a playlist", "Create slide"),
            SlideOperation::Delete => info(value, "Delete", "Delete a slide permanently", "Delete slide"),
            SlideOperation::Get => info(value, "Get", "Get slide information by ID", "Get slide"),
            SlideOperation::GetAll => info(value, "Get Many", "Retrieve a list of slides", "Get many slides"),
            SlideOperation::Update => info(value, "Update", "Update an existing slide", "Update slide"),
            SlideOperation::UpdatePositions => info(
                value,
                "Update Positions",
                "Update positions of multiple slides",
                "Update slide positions",
            ),
        },
        ResourceOperation::Process(ProcessOperation::RefreshPlayer) => info(
            value,
            "Refresh Player",
            "Ask connected players to reload their playlist",
            "Refresh player",
        ),
    }
}

/// Every operation of `resource`, in tag order.
pub fn resource_catalog(resource: Resource) -> Vec<OperationInfo> {
    resource
        .operation_tags()
        .iter()
        .filter_map(|tag| ResourceOperation::parse(resource, tag).ok())
        .map(operation_info)
        .collect()
}

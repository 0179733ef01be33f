//! Resource families and their operations
//!
//! The host selects a resource once per batch and an operation per item.
//! Each resource owns a closed set of operations; [`ResourceOperation`] is
//! the only way to pair them, so an operation can never be routed to the
//! wrong registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ObscreenError, Result};

/// One of the five manageable entity families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "contents")]
    Content,
    #[serde(rename = "contentFolders")]
    ContentFolder,
    #[serde(rename = "playlists")]
    Playlist,
    #[serde(rename = "slides")]
    Slide,
    #[serde(rename = "process")]
    Process,
}

impl Resource {
    pub const ALL: [Resource; 5] =
        [Self::Content, Self::ContentFolder, Self::Playlist, Self::Process, Self::Slide];

    /// Host-facing resource tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "contents",
            Self::ContentFolder => "contentFolders",
            Self::Playlist => "playlists",
            Self::Slide => "slides",
            Self::Process => "process",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::ContentFolder => "Content Folder",
            Self::Playlist => "Playlist",
            Self::Slide => "Slide",
            Self::Process => "Process",
        }
    }

    /// Operation tags accepted for this resource.
    pub fn operation_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Content => ContentOperation::tags(),
            Self::ContentFolder => ContentFolderOperation::tags(),
            Self::Playlist => PlaylistOperation::tags(),
            Self::Slide => SlideOperation::tags(),
            Self::Process => ProcessOperation::tags(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ObscreenError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String =
            s.chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();

        match normalized.as_str() {
            "contents" | "content" => Ok(Self::Content),
            "contentfolders" | "contentfolder" => Ok(Self::ContentFolder),
            "playlists" | "playlist" => Ok(Self::Playlist),
            "slides" | "slide" => Ok(Self::Slide),
            "process" | "processes" => Ok(Self::Process),
            _ => Err(ObscreenError::UnsupportedResource { resource: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentOperation {
    Create,
    Delete,
    Get,
    GetAll,
    GetLocation,
    GetTypes,
    MoveToFolder,
    Update,
    UploadBulk,
}

impl_wire_enum_conversions!(ContentOperation {
    Create => "create",
    Delete => "delete",
    Get => "get",
    GetAll => "getAll",
    GetLocation => "getLocation",
    GetTypes => "getTypes",
    MoveToFolder => "moveToFolder",
    Update => "update",
    UploadBulk => "uploadBulk",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentFolderOperation {
    Create,
    Delete,
    Get,
    GetAll,
    MoveContentsToFolder,
    MoveFolderToFolder,
    Update,
}

impl_wire_enum_conversions!(ContentFolderOperation {
    Create => "create",
    Delete => "delete",
    Get => "get",
    GetAll => "getAll",
    MoveContentsToFolder => "moveContentsToFolder",
    MoveFolderToFolder => "moveFolderToFolder",
    Update => "update",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistOperation {
    Create,
    Delete,
    Get,
    GetAll,
    GetNotifications,
    GetSlides,
    Update,
}

impl_wire_enum_conversions!(PlaylistOperation {
    Create => "create",
    Delete => "delete",
    Get => "get",
    GetAll => "getAll",
    GetNotifications => "getNotifications",
    GetSlides => "getSlides",
    Update => "update",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideOperation {
    Create,
    Delete,
    Get,
    GetAll,
    Update,
    UpdatePositions,
}

impl_wire_enum_conversions!(SlideOperation {
    Create => "create",
    Delete => "delete",
    Get => "get",
    GetAll => "getAll",
    Update => "update",
    UpdatePositions => "updatePositions",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessOperation {
    RefreshPlayer,
}

impl_wire_enum_conversions!(ProcessOperation {
    RefreshPlayer => "refreshPlayer",
});

/// A validated (resource, operation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    Content(ContentOperation),
    ContentFolder(ContentFolderOperation),
    Playlist(PlaylistOperation),
    Slide(SlideOperation),
    Process(ProcessOperation),
}

impl ResourceOperation {
    /// Pair `operation` with `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`ObscreenError::UnsupportedOperation`] when the resource has
    /// no operation with that tag.
    pub fn parse(resource: Resource, operation: &str) -> Result<Self> {
        let unsupported = |_| ObscreenError::UnsupportedOperation {
            resource: resource.as_str().to_string(),
            operation: operation.to_string(),
        };

        Ok(match resource {
            Resource::Content => Self::Content(operation.parse().map_err(unsupported)?),
            Resource::ContentFolder => {
                Self::ContentFolder(operation.parse().map_err(unsupported)?)
            }
            Resource::Playlist => Self::Playlist(operation.parse().map_err(unsupported)?),
            Resource::Slide => Self::Slide(operation.parse().map_err(unsupported)?),
            Resource::Process => Self::Process(operation.parse().map_err(unsupported)?),
        })
    }

    pub fn resource(&self) -> Resource {
        match self {
            Self::Content(_) => Resource::Content,
            Self::ContentFolder(_) => Resource::ContentFolder,
            Self::Playlist(_) => Resource::Playlist,
            Self::Slide(_) => Resource::Slide,
            Self::Process(_) => Resource::Process,
        }
    }

    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Content(op) => op.as_str(),
            Self::ContentFolder(op) => op.as_str(),
            Self::Playlist(op) => op.as_str(),
            Self::Slide(op) => op.as_str(),
            Self::Process(op) => op.as_str(),
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource(), self.operation_name())
    }
}

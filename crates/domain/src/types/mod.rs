//! Wire and host-facing types

pub mod input;
pub mod models;
pub mod output;
pub mod request;
pub mod resource;

pub use input::InputItem;
pub use models::{FolderDestination, FolderLookup, LoopMode, SchedulingEnd, SchedulingStart};
pub use output::{
    BulkUploadResult, ErrorPayload, FileUploadResult, OutputItem, OutputRecord, SearchResult,
};
pub use request::{
    ApiRequest, BinaryData, FilePart, HttpMethod, MultipartPayload, RequestBody,
};
pub use resource::{
    ContentFolderOperation, ContentOperation, PlaylistOperation, ProcessOperation, Resource,
    ResourceOperation, SlideOperation,
};

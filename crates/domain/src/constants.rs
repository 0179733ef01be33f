//! Adapter constants
//!
//! Process-wide immutable values shared by the registries, the executor and
//! the list pickers.

// Search pickers
pub const SEARCH_LIMIT: usize = 50;

// Content types uploaded as multipart binaries; everything else is a JSON body
pub const BINARY_CONTENT_TYPES: &[&str] = &["picture", "video"];
pub const EXTERNAL_LOCATIONS: &[&str] = &["url", "youtube", "external_storage"];
pub const DEFAULT_CONTENT_TYPE: &str = "picture";
pub const DEFAULT_CONTENT_LOCATION: &str = "url";
pub const DEFAULT_BINARY_PROPERTY: &str = "data";
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// Slide defaults
pub const DEFAULT_SLIDE_DURATION: i64 = 3;
pub const DEFAULT_SLIDE_POSITION: i64 = 999;
pub const DEFAULT_INWEEK_DAY: i64 = 1;
pub const DEFAULT_INWEEK_TIME_START: &str = "09:00";
pub const DEFAULT_INWEEK_TIME_END: &str = "17:00";

// Connection defaults
pub const DEFAULT_INSTANCE_URL: &str = "https://demo.obscreen.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CREDENTIAL_PROBE_PATH: &str = "/api/playlists";

// Host defaults
pub const DEFAULT_RESOURCE: &str = "contents";
pub const DEFAULT_OPERATION: &str = "get";

/// True when `content_type` is uploaded as a multipart binary.
pub fn is_binary_content_type(content_type: &str) -> bool {
    BINARY_CONTENT_TYPES.contains(&content_type)
}

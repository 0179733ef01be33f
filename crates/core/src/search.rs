//! List pickers
//!
//! Fetch a collection unfiltered, keep the entries whose display label
//! contains the query (case-insensitive), and return at most
//! [`SEARCH_LIMIT`] of them in source order.

use std::fmt;
use std::str::FromStr;

use obscreen_domain::constants::SEARCH_LIMIT;
use obscreen_domain::{ApiRequest, ObscreenError, Result, SearchResult};
use serde_json::Value;
use tracing::debug;

use crate::ports::ApiExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Playlists,
    Contents,
    Folders,
    Slides,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [Self::Playlists, Self::Contents, Self::Folders, Self::Slides];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Playlists => "/api/playlists",
            Self::Contents => "/api/contents/",
            Self::Folders => "/api/contents-folders/",
            Self::Slides => "/api/slides",
        }
    }

    /// Member used as the display label and matched against the query.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Slides => "label",
            _ => "name",
        }
    }

    fn fallback_prefix(&self) -> &'static str {
        match self {
            Self::Playlists => "Playlist",
            Self::Contents => "Content",
            Self::Folders => "Folder",
            Self::Slides => "Slide",
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Playlists => "searchPlaylists",
            Self::Contents => "searchContents",
            Self::Folders => "searchFolders",
            Self::Slides => "searchSlides",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playlists => "playlists",
            Self::Contents => "contents",
            Self::Folders => "folders",
            Self::Slides => "slides",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = ObscreenError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                lower == kind.as_str()
                    || lower == kind.as_str().trim_end_matches('s')
                    || s.eq_ignore_ascii_case(kind.method_name())
            })
            .ok_or_else(|| ObscreenError::UnsupportedResource { resource: s.to_string() })
    }
}

/// Filter and shape a collection response.
///
/// Anything other than a JSON array yields no results.
pub fn filter_results(kind: SearchKind, collection: &Value, query: Option<&str>) -> Vec<SearchResult> {
    let Some(items) = collection.as_array() else {
        return Vec::new();
    };

    let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

    items
        .iter()
        .filter(|item| match &needle {
            None => true,
            Some(needle) => item
                .get(kind.label_key())
                .and_then(Value::as_str)
                .is_some_and(|label| label.to_lowercase().contains(needle.as_str())),
        })
        .take(SEARCH_LIMIT)
        .map(|item| to_result(kind, item))
        .collect()
}

fn to_result(kind: SearchKind, item: &Value) -> SearchResult {
    let text = |key: &str| {
        item.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
    };
    let id = item.get("id").cloned().unwrap_or(Value::Null);

    let name = text(kind.label_key()).unwrap_or_else(|| {
        let id_text = match &id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!("{} {id_text}", kind.fallback_prefix())
    });

    let description = match kind {
        SearchKind::Folders => text("description").or_else(|| text("path")),
        _ => text("description"),
    };

    SearchResult {
        name,
        value: id,
        description: description.unwrap_or_default(),
        url: text("url").unwrap_or_default(),
    }
}

/// Run one picker search against the instance.
pub async fn search(
    executor: &dyn ApiExecutor,
    kind: SearchKind,
    query: Option<&str>,
) -> Result<Vec<SearchResult>> {
    let collection = executor.execute(ApiRequest::get(kind.endpoint())).await?;
    let results = filter_results(kind, &collection, query);
    debug!(kind = %kind, query = ?query, results = results.len(), "List search completed");
    Ok(results)
}

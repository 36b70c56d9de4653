use serde::{Deserialize, Serialize};

use crate::parsers::timestamp::TimeStamp;

/// Which record shape a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Search,
    Watch,
    Chrome,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Search => "search",
            RecordKind::Watch => "watch",
            RecordKind::Chrome => "chrome",
        }
    }
}

/// A watched video. All four fields are empty for private or removed videos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchedVideo {
    pub video_link: String,
    pub video_name: String,
    pub channel_link: String,
    pub channel_name: String,
}

/// A page visited from the browser activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitedSite {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordPayload {
    Search { query: String },
    Watch(WatchedVideo),
    Chrome(VisitedSite),
}

/// One activity entry. `product` and `action` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub product: String,
    pub action: String,
    pub timestamp: TimeStamp,
    #[serde(flatten)]
    pub payload: RecordPayload,
}

impl HistoryRecord {
    pub fn kind(&self) -> RecordKind {
        match self.payload {
            RecordPayload::Search { .. } => RecordKind::Search,
            RecordPayload::Watch(_) => RecordKind::Watch,
            RecordPayload::Chrome(_) => RecordKind::Chrome,
        }
    }

    pub fn query(&self) -> Option<&str> {
        match &self.payload {
            RecordPayload::Search { query } => Some(query),
            _ => None,
        }
    }

    pub fn video(&self) -> Option<&WatchedVideo> {
        match &self.payload {
            RecordPayload::Watch(video) => Some(video),
            _ => None,
        }
    }

    pub fn site(&self) -> Option<&VisitedSite> {
        match &self.payload {
            RecordPayload::Chrome(site) => Some(site),
            _ => None,
        }
    }
}

//! Turns activity-log record containers into [`HistoryRecord`]s.
//!
//! A record container holds one title element (the product name) and one
//! action element: `Verb&nbsp;<a href=..>..</a>...<br>TIMESTAMP`. The
//! timestamp is the text of the action element's last child.

use serde::Deserialize;
use tracing::debug;

use crate::html::NodeRef;
use crate::html::entities::{decode_entities, split_nbsp};
use crate::parsers::history::{
    HistoryRecord, RecordKind, RecordPayload, VisitedSite, WatchedVideo,
};
use crate::parsers::timestamp::{TimeStamp, parse_timestamp};
use crate::parsers::{ParseError, StructuralError};

pub const RECORD_CONTAINER_CLASS: &str = "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp";
pub const TITLE_CLASS: &str = "mdl-typography--title";
pub const ACTION_CLASS: &str = "content-cell mdl-cell mdl-cell--6-col mdl-typography--body-1";

const CHROME_IDLE_ACTION: &str = "Used Chrome";

/// Class names that mark out the parts of a record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassNames {
    pub record_container: String,
    pub title: String,
    pub action: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            record_container: RECORD_CONTAINER_CLASS.to_string(),
            title: TITLE_CLASS.to_string(),
            action: ACTION_CLASS.to_string(),
        }
    }
}

/// Records built from one document, in document order, plus how many
/// candidates were skipped.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<HistoryRecord>,
    pub errors: u64,
}

pub fn record_containers<'a>(root: NodeRef<'a>, classes: &ClassNames) -> Vec<NodeRef<'a>> {
    root.tags_by_class(&classes.record_container)
}

pub fn extract_records(root: NodeRef<'_>, kind: RecordKind, classes: &ClassNames) -> Extraction {
    let mut out = Extraction::default();
    for (index, container) in record_containers(root, classes).into_iter().enumerate() {
        match parse_record(container, kind, classes) {
            Ok(record) => out.records.push(record),
            Err(err) => {
                debug!("skipping {} record {index}: {err}", kind.as_str());
                out.errors += 1;
            }
        }
    }
    out
}

pub fn parse_record(
    container: NodeRef<'_>,
    kind: RecordKind,
    classes: &ClassNames,
) -> Result<HistoryRecord, ParseError> {
    if container.class_name() != classes.record_container {
        return Err(StructuralError::WrongContainerClass {
            found: container.class_name().to_string(),
        }
        .into());
    }

    let product = product(container, classes)?;
    let action_element = single_by_class(container, &classes.action)
        .map_err(StructuralError::ActionCount)?;
    let action = action_verb(action_element)?;
    let timestamp = timestamp(action_element)?;

    let payload = match kind {
        RecordKind::Search => RecordPayload::Search {
            query: search_query(action_element)?,
        },
        RecordKind::Watch => RecordPayload::Watch(watched_video(action_element)),
        RecordKind::Chrome => RecordPayload::Chrome(visited_site(action_element)?),
    };

    Ok(HistoryRecord {
        product,
        action,
        timestamp,
        payload,
    })
}

/// The one descendant with `class_name`; the error carries the actual count.
fn single_by_class<'a>(node: NodeRef<'a>, class_name: &str) -> Result<NodeRef<'a>, usize> {
    let mut found = node.tags_by_class(class_name);
    if found.len() == 1 {
        Ok(found.remove(0))
    } else {
        Err(found.len())
    }
}

fn product(container: NodeRef<'_>, classes: &ClassNames) -> Result<String, StructuralError> {
    let title = single_by_class(container, &classes.title).map_err(StructuralError::TitleCount)?;
    let text = decode_entities(title.text());
    let text = text.trim();
    if text.is_empty() {
        return Err(StructuralError::EmptyTitle);
    }
    Ok(text.to_string())
}

fn action_verb(action_element: NodeRef<'_>) -> Result<String, StructuralError> {
    let text = action_element.text();
    let verb = split_nbsp(text).map_or(text, |(verb, _)| verb);
    let verb = decode_entities(verb);
    let verb = verb.trim();
    if verb.is_empty() {
        return Err(StructuralError::EmptyAction);
    }
    Ok(verb.to_string())
}

fn timestamp(action_element: NodeRef<'_>) -> Result<TimeStamp, ParseError> {
    let last = action_element
        .last_child()
        .ok_or(StructuralError::MissingTimestamp)?;
    Ok(parse_timestamp(last.text())?)
}

fn search_query(action_element: NodeRef<'_>) -> Result<String, StructuralError> {
    let links = action_element.tags_by_name("a");
    match links.as_slice() {
        [link] => Ok(field_text(link.text())),
        [] => split_nbsp(action_element.text())
            .map(|(_, rest)| field_text(rest))
            .ok_or(StructuralError::MissingQuery),
        more => Err(StructuralError::LinkCount(more.len())),
    }
}

fn watched_video(action_element: NodeRef<'_>) -> WatchedVideo {
    match action_element.tags_by_name("a").as_slice() {
        [video, channel] => WatchedVideo {
            video_link: field_text(&video.link()),
            video_name: field_text(video.text()),
            channel_link: field_text(&channel.link()),
            channel_name: field_text(channel.text()),
        },
        _ => WatchedVideo::default(),
    }
}

fn visited_site(action_element: NodeRef<'_>) -> Result<VisitedSite, StructuralError> {
    match action_element.tags_by_name("a").as_slice() {
        [link] => Ok(VisitedSite {
            name: field_text(link.text()),
            url: field_text(&link.link()),
        }),
        [] if decode_entities(action_element.text()).trim() == CHROME_IDLE_ACTION => {
            Ok(VisitedSite::default())
        }
        other => Err(StructuralError::LinkCount(other.len())),
    }
}

fn field_text(raw: &str) -> String {
    decode_entities(raw).trim().to_string()
}

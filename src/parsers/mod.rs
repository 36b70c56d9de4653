pub mod activity;
pub mod history;
pub mod timestamp;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::html::{BuildOutcome, TreeError, parse_html};

pub use activity::{ClassNames, Extraction, extract_records, parse_record, record_containers};
pub use history::{HistoryRecord, RecordKind, RecordPayload, VisitedSite, WatchedVideo};
pub use timestamp::{Interval, TimeStamp, parse_timestamp};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// The tree or a record does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("element has class {found:?}, not the record container class")]
    WrongContainerClass { found: String },
    #[error("expected exactly one title element, found {0}")]
    TitleCount(usize),
    #[error("title element has no text")]
    EmptyTitle,
    #[error("expected exactly one action element, found {0}")]
    ActionCount(usize),
    #[error("action element has no text")]
    EmptyAction,
    #[error("action element has no child carrying a timestamp")]
    MissingTimestamp,
    #[error("search entry has neither a link nor inline query text")]
    MissingQuery,
    #[error("unexpected hyperlink count {0} in action element")]
    LinkCount(usize),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Timestamp text does not match `Mon D, YYYY, H:MM:SS AM ZONE`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{0:?} does not match the timestamp pattern")]
    Pattern(String),
    #[error("unknown month abbreviation {0:?}")]
    UnknownMonth(String),
    #[error("{field} is not a number: {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("{field} {value} out of range")]
    OutOfRange { field: &'static str, value: u32 },
    #[error("no such date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Reads a whole document as UTF-8 and builds its tag tree.
pub fn load_document(path: &Path) -> Result<BuildOutcome, ParseError> {
    let html = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_html(&html))
}

//! Error types for message parsing, addressing and serialization

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("message text is empty")]
    EmptyMessage,

    #[error("message text contains no recognizable segment")]
    NoSegments,

    #[error("message has no MSH header segment")]
    MissingHeader,

    #[error("header segment '{0}' is too short to establish the encoding characters")]
    ShortHeader(String),

    #[error("delimiter set '{0}' is invalid; expected 4 distinct encoding characters, optionally preceded by the field separator")]
    InvalidDelimiters(String),

    #[error("invalid segment name '{0}'; expected exactly 3 uppercase ASCII letters or digits")]
    InvalidSegmentName(String),

    #[error("segment '{0}' does not continue with the field separator after its name")]
    MalformedSegment(String),

    #[error("'{0}' is not a valid HL7 date/time (DTM); expected YYYY[MM[DD[HH[MM[SS[.S[S[S[S]]]]]]]]][+/-ZZZZ]")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Path(#[from] nuntius_path::Error),

    #[error("segment '{name}' occurrence {occurrence} not found")]
    SegmentNotFound { name: String, occurrence: usize },

    #[error("field {index} does not exist at '{path}'")]
    FieldNotFound { path: String, index: usize },

    #[error("component {index} does not exist at '{path}'")]
    ComponentNotFound { path: String, index: usize },

    #[error("subcomponent {index} does not exist at '{path}'")]
    SubComponentNotFound { path: String, index: usize },

    #[error("path '{0}' must address at least a field to be writable")]
    SegmentLevelWrite(String),

    #[error("cannot build an acknowledgment for a message that is itself an acknowledgment")]
    SourceIsAcknowledgment,
}

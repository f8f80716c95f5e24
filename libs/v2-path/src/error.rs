//! Error types for path parsing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("path is empty; expected SEGMENT[(occurrence)].field[.component[.subcomponent]]")]
    Empty,

    #[error("invalid segment name '{0}'; expected exactly 3 uppercase ASCII letters or digits")]
    InvalidSegmentName(String),

    #[error("invalid occurrence '{0}'; expected a non-negative integer in parentheses, e.g. PID(1)")]
    InvalidOccurrence(String),

    #[error("invalid index '{0}' in path '{1}'; field/component/subcomponent positions are integers starting at 1")]
    InvalidIndex(String, String),

    #[error("path '{0}' is too deep; at most segment.field.component.subcomponent is addressable")]
    TooDeep(String),
}

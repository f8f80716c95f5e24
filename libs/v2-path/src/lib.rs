//! Typed element paths for HL7 v2 messages.
//!
//! A path addresses a single element of a message hierarchy:
//!
//! ```text
//! SEGMENT[(occurrence)].field[.component[.subcomponent]]
//! ```
//!
//! - `SEGMENT` is the 3-character segment name (`MSH`, `PID`, `NK1`, ...).
//! - `occurrence` (optional, 0-based, default 0) picks one of several
//!   segments sharing that name.
//! - `field`, `component` and `subcomponent` are 1-based positions.
//!
//! The grammar is parsed once into a [`Path`] value; resolution against a
//! message tree lives with the message model, keeping the two concerns
//! independently testable.
//!
//! # Example
//!
//! ```rust
//! use nuntius_path::Path;
//!
//! let path: Path = "NK1(1).2.1".parse().unwrap();
//! assert_eq!(path.segment, "NK1");
//! assert_eq!(path.occurrence, 1);
//! assert_eq!(path.field, Some(2));
//! assert_eq!(path.component, Some(1));
//! assert_eq!(path.subcomponent, None);
//! ```

#![forbid(unsafe_code)]

mod error;
mod path;

pub use error::{Error, Result};
pub use path::Path;

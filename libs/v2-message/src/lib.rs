//! HL7 v2 message codec
//!
//! This crate models the classic pipe-delimited HL7 v2 wire format as a
//! navigable tree — Message → Segment → Field → Repetition → Component →
//! SubComponent — with a parser/serializer pair that round-trips accepted
//! text byte for byte, path-addressed reads and writes, acknowledgment
//! derivation, the DTM variable-precision timestamp codec and MLLP stream
//! splitting.
//!
//! # Example
//!
//! ```rust
//! use nuntius_message::Message;
//!
//! let text = "MSH|^~\\&|SA|SF|RA|RF|20110613083617||ADT^A04|123|P|2.7\r";
//! let message = Message::parse_text(text)?;
//!
//! assert_eq!(message.get("MSH.9.1")?.unwrap(), "ADT");
//! assert_eq!(message.serialize(false)?, text);
//!
//! let ack = message.build_ack("AA")?;
//! assert_eq!(ack.get("MSA.2")?.unwrap(), "123");
//! # Ok::<(), nuntius_message::Error>(())
//! ```
//!
//! All operations are synchronous, bounded, in-memory transformations;
//! concurrent reads of an unmutated message are safe, mutation needs
//! external synchronization.

#![forbid(unsafe_code)]

mod ack;
mod component;
mod encoding;
mod error;
mod field;
mod message;
mod mllp;
mod parser;
mod query;
mod segment;
mod serializer;
mod timestamp;

pub use component::{Component, SubComponent};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use field::{Field, Repetition};
pub use message::{HeaderFields, Message};
pub use mllp::split_stream;
pub use segment::{Segment, HEADER_NAME};
pub use timestamp::{format_timestamp, parse_timestamp};

// The path grammar is a separate crate; re-exported so most callers only
// depend on this one.
pub use nuntius_path::Path;

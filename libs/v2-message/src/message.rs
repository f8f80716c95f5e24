//! Message level of the value tree
//!
//! A [`Message`] is an ordered run of segments plus the delimiter set they
//! were (or will be) written with. Segment order is the serialization
//! order and is semantically significant; repeated segments with the same
//! name are kept in insertion order and addressed by occurrence.

use std::str::FromStr;

use chrono::Local;

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::parser;
use crate::segment::{Segment, HEADER_NAME};
use crate::serializer;
use crate::timestamp::format_timestamp;

/// An HL7 v2 message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    raw: String,
    encoding: Encoding,
    segments: Vec<Segment>,
}

/// Caller-supplied header values for [`Message::add_header`]. Field 7
/// (the header timestamp) is generated, not supplied.
#[derive(Debug, Clone, Default)]
pub struct HeaderFields<'a> {
    pub sending_application: &'a str,
    pub sending_facility: &'a str,
    pub receiving_application: &'a str,
    pub receiving_facility: &'a str,
    pub security: &'a str,
    pub message_type: &'a str,
    pub control_id: &'a str,
    pub processing_id: &'a str,
    pub version: &'a str,
}

impl Message {
    /// Message holding raw text, not yet parsed. Call [`parse`](Self::parse)
    /// to build the tree.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    /// Empty message with an explicit delimiter set, for building replies
    /// or fresh messages in memory.
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Parse the stored raw text into the segment tree. On failure the
    /// message is left unchanged and the error says what was wrong with
    /// the envelope; a success replaces any previously built tree.
    pub fn parse(&mut self) -> Result<()> {
        let outcome = parser::parse_message(&self.raw)?;
        self.encoding = outcome.encoding;
        self.segments = outcome.segments;
        Ok(())
    }

    /// Construct and parse in one step.
    pub fn parse_text(text: &str) -> Result<Self> {
        let mut message = Self::new(text);
        message.parse()?;
        Ok(message)
    }

    /// Render the tree back to wire text. With `validate` the structural
    /// invariants (header present and first, well-formed segment names)
    /// are checked before any text is produced.
    pub fn serialize(&self, validate: bool) -> Result<String> {
        serializer::serialize_message(self, validate)
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// Raw text this message was constructed from; empty for messages
    /// built in memory.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All segments in serialization order.
    pub fn all_segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Every segment with the given name, in message order.
    pub fn segments(&self, name: &str) -> Vec<&Segment> {
        self.segments.iter().filter(|s| s.name() == name).collect()
    }

    /// First segment with the given name.
    pub fn default_segment(&self, name: &str) -> Result<&Segment> {
        self.segments
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SegmentNotFound {
                name: name.to_string(),
                occurrence: 0,
            })
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove one occurrence (0-based) of a named segment, or every
    /// occurrence when `occurrence` is `None`. Returns how many segments
    /// were removed; addressing an occurrence that does not exist is an
    /// error.
    pub fn remove_segment(&mut self, name: &str, occurrence: Option<usize>) -> Result<usize> {
        match occurrence {
            Some(occurrence) => {
                let position = self
                    .segments
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.name() == name)
                    .map(|(i, _)| i)
                    .nth(occurrence)
                    .ok_or_else(|| Error::SegmentNotFound {
                        name: name.to_string(),
                        occurrence,
                    })?;
                self.segments.remove(position);
                Ok(1)
            }
            None => {
                let before = self.segments.len();
                self.segments.retain(|s| s.name() != name);
                Ok(before - self.segments.len())
            }
        }
    }

    /// Build and append a header segment from caller values, generating
    /// the header timestamp (field 7) from the current time.
    pub fn add_header(&mut self, fields: HeaderFields<'_>) {
        let mut header = Segment::new(HEADER_NAME);
        header.add_field(Field::new(self.encoding.field.to_string()));
        header.add_field(Field::new(self.encoding.all_delimiters()));
        header.set_field(3, Field::new(fields.sending_application));
        header.set_field(4, Field::new(fields.sending_facility));
        header.set_field(5, Field::new(fields.receiving_application));
        header.set_field(6, Field::new(fields.receiving_facility));
        header.set_field(7, Field::new(format_timestamp(&Local::now())));
        header.set_field(8, Field::new(fields.security));
        header.set_field(9, Field::parse(fields.message_type, &self.encoding));
        header.set_field(10, Field::new(fields.control_id));
        header.set_field(11, Field::new(fields.processing_id));
        header.set_field(12, Field::new(fields.version));
        self.segments.insert(0, header);
    }

    /// Header control identifier (MSH.10), when present and not null.
    pub fn control_id(&self) -> Option<String> {
        self.header_field_value(10)
    }

    /// Header processing id (MSH.11).
    pub fn processing_id(&self) -> Option<String> {
        self.header_field_value(11)
    }

    /// Header version id (MSH.12).
    pub fn version(&self) -> Option<String> {
        self.header_field_value(12)
    }

    /// First component of the header message type field (MSH.9), e.g.
    /// `ADT` for `ADT^A04` or `ACK` for an acknowledgment.
    pub fn message_type(&self) -> Option<String> {
        self.header()?
            .field(9)?
            .component(1)
            .map(|c| c.value(&self.encoding))
    }

    pub(crate) fn header(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.is_header())
    }

    pub(crate) fn segment_occurrence(&self, name: &str, occurrence: usize) -> Option<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.name() == name)
            .nth(occurrence)
    }

    pub(crate) fn segment_occurrence_mut(
        &mut self,
        name: &str,
        occurrence: usize,
    ) -> Option<&mut Segment> {
        self.segments
            .iter_mut()
            .filter(|s| s.name() == name)
            .nth(occurrence)
    }

    fn header_field_value(&self, position: usize) -> Option<String> {
        self.header()?
            .field(position)
            .and_then(|f| f.value(&self.encoding))
    }
}

impl FromStr for Message {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse_text(text)
    }
}

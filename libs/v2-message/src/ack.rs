//! Acknowledgment derivation
//!
//! An acknowledgment reuses the source message's delimiter set, swaps the
//! sender and receiver roles (header fields 3/4 with 5/6), and echoes the
//! source control identifier in the status segment so the sender can match
//! the reply to its request.

use chrono::Local;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::message::Message;
use crate::segment::{Segment, HEADER_NAME};
use crate::timestamp::format_timestamp;

impl Message {
    /// Build a positive acknowledgment carrying the given status code
    /// (typically `AA`).
    pub fn build_ack(&self, code: &str) -> Result<Message> {
        self.build_reply(code, None)
    }

    /// Build a negative acknowledgment: like [`build_ack`](Self::build_ack)
    /// but with the error text in field 3 of the status segment. Typical
    /// codes are `AE` and `AR`.
    pub fn build_nack(&self, code: &str, error_text: &str) -> Result<Message> {
        self.build_reply(code, Some(error_text))
    }

    fn build_reply(&self, code: &str, error_text: Option<&str>) -> Result<Message> {
        let source = self.header().ok_or(Error::MissingHeader)?;
        if self.message_type().as_deref() == Some("ACK") {
            return Err(Error::SourceIsAcknowledgment);
        }

        let stamp = format_timestamp(&Local::now());
        let encoding = self.encoding();

        let mut header = Segment::new(HEADER_NAME);
        header.add_field(Field::new(encoding.field.to_string()));
        header.add_field(Field::new(encoding.all_delimiters()));
        // Sender and receiver swap roles in the reply.
        header.set_field(3, clone_or_empty(source.field(5)));
        header.set_field(4, clone_or_empty(source.field(6)));
        header.set_field(5, clone_or_empty(source.field(3)));
        header.set_field(6, clone_or_empty(source.field(4)));
        header.set_field(7, Field::new(stamp.clone()));
        header.set_field(9, Field::new("ACK"));
        // Fresh control identifier for the reply; the source identifier is
        // echoed in the status segment below.
        header.set_field(10, Field::new(stamp));
        header.set_field(11, clone_or_empty(source.field(11)));
        header.set_field(12, clone_or_empty(source.field(12)));

        let mut status = Segment::new("MSA");
        status.set_field(1, Field::new(code));
        status.set_field(2, clone_or_empty(source.field(10)));
        if let Some(text) = error_text {
            status.set_field(3, Field::new(text));
        }

        let mut reply = Message::with_encoding(encoding.clone());
        reply.add_segment(header);
        reply.add_segment(status);
        Ok(reply)
    }
}

fn clone_or_empty(field: Option<&Field>) -> Field {
    field.cloned().unwrap_or_default()
}

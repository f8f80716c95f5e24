//! Value tree to wire text
//!
//! Exact structural inverse of the parser: walking the tree of a parsed
//! message reproduces the accepted text byte for byte, including trailing
//! empty fields and the null/empty distinction.

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::message::Message;
use crate::segment::Segment;

pub(crate) fn serialize_message(message: &Message, validate: bool) -> Result<String> {
    if validate {
        validate_structure(message)?;
    }

    let encoding = message.encoding();
    let mut out = String::new();
    for segment in message.all_segments() {
        serialize_segment(segment, encoding, &mut out);
        out.push_str(&encoding.segment_terminator);
    }
    Ok(out)
}

pub(crate) fn serialize_segment(segment: &Segment, encoding: &Encoding, out: &mut String) {
    out.push_str(segment.name());
    let fields = segment.fields();

    if segment.is_header() {
        // Fields 1 and 2 are the delimiter characters themselves; they are
        // emitted verbatim, never escaped or re-split.
        if let Some(separator) = fields.first() {
            out.push_str(raw_leaf(separator));
        }
        if let Some(run) = fields.get(1) {
            out.push_str(raw_leaf(run));
        }
        for field in fields.iter().skip(2) {
            out.push(encoding.field);
            serialize_field(field, encoding, out);
        }
    } else {
        for field in fields {
            out.push(encoding.field);
            serialize_field(field, encoding, out);
        }
    }
}

fn serialize_field(field: &Field, encoding: &Encoding, out: &mut String) {
    if field.is_null() {
        out.push_str(Encoding::PRESENT_BUT_NULL);
        return;
    }
    for (r, repetition) in field.repetitions().iter().enumerate() {
        if r > 0 {
            out.push(encoding.repetition);
        }
        for (c, component) in repetition.components().iter().enumerate() {
            if c > 0 {
                out.push(encoding.component);
            }
            for (s, subcomponent) in component.subcomponents().iter().enumerate() {
                if s > 0 {
                    out.push(encoding.subcomponent);
                }
                out.push_str(&encoding.encode(subcomponent.value()));
            }
        }
    }
}

/// First leaf of a field without re-encoding, for the header's verbatim
/// delimiter fields.
fn raw_leaf(field: &Field) -> &str {
    field
        .repetition(1)
        .and_then(|rep| rep.component(1))
        .and_then(|comp| comp.subcomponent(1))
        .map(|sub| sub.value())
        .unwrap_or("")
}

fn validate_structure(message: &Message) -> Result<()> {
    let Some(first) = message.all_segments().first() else {
        return Err(Error::MissingHeader);
    };
    if !first.is_header() {
        return Err(Error::MissingHeader);
    }
    if first.field_count() < 2 {
        return Err(Error::ShortHeader(first.name().to_string()));
    }
    for segment in message.all_segments() {
        let name = segment.name();
        if name.len() != 3
            || !name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(Error::InvalidSegmentName(name.to_string()));
        }
    }
    Ok(())
}

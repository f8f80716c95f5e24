//! Wire text to value tree
//!
//! Parsing is lenient inside a well-formed segment (any slice of text
//! becomes a leaf) but strict about the envelope: an empty input, a
//! missing or too-short header, or a segment that does not follow the
//! name-then-separator shape fails the whole call with a typed error.

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::segment::{Segment, HEADER_NAME};

#[derive(Debug)]
pub(crate) struct ParseOutcome {
    pub encoding: Encoding,
    pub segments: Vec<Segment>,
}

pub(crate) fn parse_message(raw: &str) -> Result<ParseOutcome> {
    if raw.is_empty() {
        return Err(Error::EmptyMessage);
    }

    // Whitespace-only input survives the emptiness check but yields no
    // pieces once blank segments are dropped.
    let (pieces, terminator) = split_segments(raw);
    if pieces.is_empty() {
        return Err(Error::NoSegments);
    }
    if !pieces[0].starts_with(HEADER_NAME) {
        return Err(Error::MissingHeader);
    }

    let encoding = discover_encoding(pieces[0], terminator)?;
    let mut segments = Vec::with_capacity(pieces.len());
    for piece in pieces {
        segments.push(parse_segment(piece, &encoding)?);
    }

    Ok(ParseOutcome { encoding, segments })
}

/// Split raw text into segment slices on any of CR, LF, CRLF or LFCR,
/// dropping blank pieces. Also reports the first terminator met so the
/// serializer can reproduce the input's line endings.
fn split_segments(raw: &str) -> (Vec<&str>, Option<String>) {
    let bytes = raw.as_bytes();
    let mut pieces = Vec::new();
    let mut terminator = None;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\r' && b != b'\n' {
            i += 1;
            continue;
        }
        let mut len = 1;
        if let Some(&next) = bytes.get(i + 1) {
            if (next == b'\r' || next == b'\n') && next != b {
                len = 2;
            }
        }
        if terminator.is_none() {
            terminator = Some(raw[i..i + len].to_string());
        }
        pieces.push(&raw[start..i]);
        i += len;
        start = i;
    }
    if start < bytes.len() {
        pieces.push(&raw[start..]);
    }

    let pieces = pieces
        .into_iter()
        .filter(|piece| !piece.trim().is_empty())
        .collect();
    (pieces, terminator)
}

/// Read the delimiter set out of the header segment: the field separator
/// sits right after the name, the next four characters are component,
/// repetition, escape and subcomponent.
fn discover_encoding(header: &str, terminator: Option<String>) -> Result<Encoding> {
    let chars: Vec<char> = header.chars().collect();
    if chars.len() < 8 {
        return Err(Error::ShortHeader(header.to_string()));
    }
    let field = chars[3];
    let run: Vec<char> = chars[4..]
        .iter()
        .copied()
        .take_while(|&c| c != field)
        .collect();
    if run.len() < 4 {
        return Err(Error::ShortHeader(header.to_string()));
    }

    let encoding = Encoding {
        field,
        component: run[0],
        repetition: run[1],
        escape: run[2],
        subcomponent: run[3],
        segment_terminator: terminator.unwrap_or_else(|| "\r".to_string()),
    };
    encoding.ensure_distinct()?;
    Ok(encoding)
}

fn parse_segment(text: &str, encoding: &Encoding) -> Result<Segment> {
    let name: String = text.chars().take(3).collect();
    if name.len() != 3
        || !name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(Error::InvalidSegmentName(name));
    }

    if name == HEADER_NAME {
        parse_header_segment(text, encoding)
    } else {
        let mut segment = Segment::new(&name);
        // The name is 3 ASCII characters, so byte offset 3 is a boundary.
        let rest = &text[3..];
        if rest.is_empty() {
            return Ok(segment);
        }
        let Some(fields_text) = rest.strip_prefix(encoding.field) else {
            return Err(Error::MalformedSegment(name));
        };
        for part in fields_text.split(encoding.field) {
            segment.add_field(Field::parse(part, encoding));
        }
        Ok(segment)
    }
}

/// The header's field 1 is the separator character itself and field 2 the
/// delimiter run; both are stored verbatim and never decoded or re-split.
/// Ordinary fields resume at position 3.
fn parse_header_segment(text: &str, encoding: &Encoding) -> Result<Segment> {
    let mut segment = Segment::new(HEADER_NAME);

    let after_name = &text[3..];
    let Some(separator) = after_name.chars().next() else {
        return Err(Error::ShortHeader(text.to_string()));
    };
    let rest = &after_name[separator.len_utf8()..];
    let run_end = rest.find(separator).unwrap_or(rest.len());
    let run = &rest[..run_end];
    if run.chars().count() < 4 {
        return Err(Error::ShortHeader(text.to_string()));
    }

    segment.add_field(Field::new(separator.to_string()));
    segment.add_field(Field::new(run));

    let remainder = &rest[run_end..];
    if let Some(fields_text) = remainder.strip_prefix(separator) {
        for part in fields_text.split(separator) {
            segment.add_field(Field::parse(part, encoding));
        }
    }
    Ok(segment)
}

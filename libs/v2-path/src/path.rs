//! Path grammar - parses dotted element paths into a typed structure

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed element path.
///
/// Depth is encoded by which indices are present: `field` may be absent
/// (the path addresses a whole segment), `component` requires `field`,
/// `subcomponent` requires `component`. The parser guarantees that
/// ordering, so consumers can match on the deepest `Some` level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    /// 3-character segment name, e.g. `MSH`.
    pub segment: String,
    /// 0-based occurrence among segments sharing the name. Defaults to 0.
    pub occurrence: usize,
    /// 1-based field position.
    pub field: Option<usize>,
    /// 1-based component position within the field.
    pub component: Option<usize>,
    /// 1-based subcomponent position within the component.
    pub subcomponent: Option<usize>,
}

impl Path {
    /// Path addressing a whole segment (first occurrence).
    pub fn segment(name: impl Into<String>) -> Self {
        Self {
            segment: name.into(),
            occurrence: 0,
            field: None,
            component: None,
            subcomponent: None,
        }
    }

    /// Path addressing a field of the first occurrence of a segment.
    pub fn field(name: impl Into<String>, field: usize) -> Self {
        Self {
            field: Some(field),
            ..Self::segment(name)
        }
    }

    /// Number of index levels below the segment (0..=3).
    pub fn depth(&self) -> usize {
        [self.field, self.component, self.subcomponent]
            .iter()
            .filter(|level| level.is_some())
            .count()
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::Empty);
        }

        let mut tokens = trimmed.split('.');
        let head = tokens.next().unwrap_or_default();

        let (name, occurrence) = parse_head(head)?;

        let mut indices = [None; 3];
        for slot in indices.iter_mut() {
            let Some(token) = tokens.next() else { break };
            *slot = Some(parse_index(token, trimmed)?);
        }
        if tokens.next().is_some() {
            return Err(Error::TooDeep(trimmed.to_string()));
        }

        Ok(Path {
            segment: name,
            occurrence,
            field: indices[0],
            component: indices[1],
            subcomponent: indices[2],
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment)?;
        if self.occurrence > 0 {
            write!(f, "({})", self.occurrence)?;
        }
        for level in [self.field, self.component, self.subcomponent]
            .into_iter()
            .flatten()
        {
            write!(f, ".{}", level)?;
        }
        Ok(())
    }
}

/// Split `SEG` or `SEG(n)` into name and occurrence.
fn parse_head(head: &str) -> Result<(String, usize)> {
    let (name, occurrence) = match head.find('(') {
        Some(open) => {
            let rest = &head[open + 1..];
            let Some(close) = rest.find(')') else {
                return Err(Error::InvalidOccurrence(head.to_string()));
            };
            if !rest[close + 1..].is_empty() {
                return Err(Error::InvalidOccurrence(head.to_string()));
            }
            let occurrence = rest[..close]
                .parse::<usize>()
                .map_err(|_| Error::InvalidOccurrence(head.to_string()))?;
            (&head[..open], occurrence)
        }
        None => (head, 0),
    };

    if name.len() != 3
        || !name
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return Err(Error::InvalidSegmentName(name.to_string()));
    }

    Ok((name.to_string(), occurrence))
}

fn parse_index(token: &str, path: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(Error::InvalidIndex(token.to_string(), path.to_string())),
    }
}

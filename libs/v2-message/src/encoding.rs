//! Delimiter set and escape codec
//!
//! HL7 v2 text carries its own delimiter characters in the message header:
//! field 1 of MSH is the field separator itself and field 2 lists the
//! component, repetition, escape and subcomponent characters in that order.
//! Leaf text is escaped with `\F\`-style sequences so the structural
//! characters stay unambiguous.

use crate::error::{Error, Result};

/// How far `decode` searches for the closing escape character before
/// treating the opener as literal text.
const ESCAPE_LOOKAHEAD: usize = 16;

/// The five structural characters of a message plus the segment terminator.
///
/// The default set is `|^~\&` with a CR terminator. The parser replaces the
/// terminator with whichever of CR, LF, CRLF or LFCR it meets first in the
/// input, so a reserialized message keeps its original line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encoding {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
    pub segment_terminator: String,
}

impl Default for Encoding {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
            segment_terminator: "\r".to_string(),
        }
    }
}

impl Encoding {
    /// The explicit-null token: a field holding exactly this renders as the
    /// two literal characters and is distinct from an empty field.
    pub const PRESENT_BUT_NULL: &'static str = "\"\"";

    /// Build an encoding from the delimiter run of a message header.
    ///
    /// Accepts the 4-character MSH-2 form (component, repetition, escape,
    /// subcomponent; field separator stays `|`) or the 5-character form with
    /// the field separator in front. All five characters must be distinct.
    pub fn from_delimiters(delimiters: &str) -> Result<Self> {
        let chars: Vec<char> = delimiters.chars().collect();
        let (field, run) = match chars.len() {
            4 => ('|', &chars[..]),
            5 => (chars[0], &chars[1..]),
            _ => return Err(Error::InvalidDelimiters(delimiters.to_string())),
        };
        let encoding = Self {
            field,
            component: run[0],
            repetition: run[1],
            escape: run[2],
            subcomponent: run[3],
            segment_terminator: "\r".to_string(),
        };
        encoding.ensure_distinct()?;
        Ok(encoding)
    }

    /// The MSH-2 delimiter run (`^~\&` for the default set).
    pub fn all_delimiters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    pub(crate) fn ensure_distinct(&self) -> Result<()> {
        let set = [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ];
        for (i, c) in set.iter().enumerate() {
            if set[i + 1..].contains(c) {
                let rendered: String = set.iter().collect();
                return Err(Error::InvalidDelimiters(rendered));
            }
        }
        Ok(())
    }

    /// Escape raw text for the wire: the escape character and the four
    /// structural separators become `\E\ \F\ \R\ \S\ \T\`, control
    /// characters become `\Xhh\` hex sequences.
    pub fn encode(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c == self.escape {
                self.push_code(&mut out, 'E');
            } else if c == self.field {
                self.push_code(&mut out, 'F');
            } else if c == self.repetition {
                self.push_code(&mut out, 'R');
            } else if c == self.component {
                self.push_code(&mut out, 'S');
            } else if c == self.subcomponent {
                self.push_code(&mut out, 'T');
            } else if (c as u32) < 0x20 || c as u32 == 0x7f {
                out.push(self.escape);
                out.push('X');
                out.push_str(&format!("{:02X}", c as u32));
                out.push(self.escape);
            } else {
                out.push(c);
            }
        }
        out
    }

    fn push_code(&self, out: &mut String, code: char) {
        out.push(self.escape);
        out.push(code);
        out.push(self.escape);
    }

    /// Unescape wire text. Inverse of [`encode`](Self::encode).
    ///
    /// Unknown escape codes are attempted as 2-digit hexadecimal bytes; a
    /// sequence that cannot be read that way, or an opener with no closing
    /// escape character within [`ESCAPE_LOOKAHEAD`] characters, passes
    /// through as literal text instead of failing the decode.
    pub fn decode(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c != self.escape {
                out.push(c);
                i += 1;
                continue;
            }
            let window = (i + 1 + ESCAPE_LOOKAHEAD).min(chars.len());
            let Some(close) = (i + 1..window).find(|&j| chars[j] == self.escape) else {
                out.push(c);
                i += 1;
                continue;
            };
            let code: String = chars[i + 1..close].iter().collect();
            match code.as_str() {
                "E" => out.push(self.escape),
                "F" => out.push(self.field),
                "R" => out.push(self.repetition),
                "S" => out.push(self.component),
                "T" => out.push(self.subcomponent),
                other => match decode_hex(other.strip_prefix('X').unwrap_or(other)) {
                    Some(decoded) => out.push_str(&decoded),
                    None => {
                        out.push(self.escape);
                        out.push_str(other);
                        out.push(self.escape);
                    }
                },
            }
            i = close + 1;
        }
        out
    }
}

/// Decode a run of hex digit pairs into characters; `None` when the text
/// is not such a run.
fn decode_hex(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let mut out = String::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks(2) {
        let text = std::str::from_utf8(pair).ok()?;
        let byte = u8::from_str_radix(text, 16).ok()?;
        out.push(byte as char);
    }
    Some(out)
}

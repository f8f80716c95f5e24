//! Segment level of the value tree

use crate::field::Field;

/// The header segment name. Its first two fields hold the delimiter
/// characters themselves and are treated verbatim everywhere.
pub const HEADER_NAME: &str = "MSH";

/// A named, line-like unit of a message holding fields at 1-based
/// positions.
///
/// Position 0 is the name itself; for the header segment position 1 is
/// the field separator character and position 2 the remaining delimiter
/// run, which is why header addressing starts its ordinary content at
/// field 3.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    name: String,
    fields: Vec<Field>,
}

impl Segment {
    /// New segment with no fields. The name should be a 3-character
    /// uppercase token; it is validated when the message is parsed or
    /// serialized with validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_header(&self) -> bool {
        self.name == HEADER_NAME
    }

    /// All fields in positional order, position 1 first. Trailing empty
    /// fields are kept.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// 1-based lookup.
    pub fn field(&self, position: usize) -> Option<&Field> {
        position.checked_sub(1).and_then(|i| self.fields.get(i))
    }

    pub fn field_mut(&mut self, position: usize) -> Option<&mut Field> {
        position.checked_sub(1).and_then(|i| self.fields.get_mut(i))
    }

    /// Append a field after the current maximum position.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Overwrite the field at a 1-based position, padding any missing
    /// slots in between with empty fields. Writing twice to the same
    /// position keeps only the last value.
    pub fn set_field(&mut self, position: usize, field: Field) {
        debug_assert!(position >= 1);
        if self.fields.len() < position {
            self.fields.resize_with(position, Field::default);
        }
        self.fields[position - 1] = field;
    }

    /// Mutable access to a 1-based position, creating it (and any gap
    /// before it) as empty fields when absent.
    pub fn ensure_field(&mut self, position: usize) -> &mut Field {
        debug_assert!(position >= 1);
        if self.fields.len() < position {
            self.fields.resize_with(position, Field::default);
        }
        &mut self.fields[position - 1]
    }

}

//! Path-addressed reads and writes
//!
//! Paths follow the `SEGMENT(occurrence).field.component.subcomponent`
//! grammar from `nuntius-path`. Reads resolve against the existing tree
//! and fail with a typed error naming the missing level; writes pad the
//! tree out to the addressed position first, so setting field 5 of a
//! two-field segment creates empty fields 3 and 4 on the way.

use nuntius_path::Path;

use crate::component::Component;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::message::Message;
use crate::serializer;

impl Message {
    /// Read the value a path addresses.
    ///
    /// Returns `None` for an explicit-null field and `Some("")` for an
    /// empty one. Above leaf depth the result joins the lower levels with
    /// their separators; a bare segment path yields the segment's wire
    /// text, name included.
    pub fn get(&self, path: &str) -> Result<Option<String>> {
        let path: Path = path.parse()?;
        let segment = self
            .segment_occurrence(&path.segment, path.occurrence)
            .ok_or_else(|| Error::SegmentNotFound {
                name: path.segment.clone(),
                occurrence: path.occurrence,
            })?;

        let Some(field_index) = path.field else {
            let mut out = String::new();
            serializer::serialize_segment(segment, self.encoding(), &mut out);
            return Ok(Some(out));
        };
        let field = segment
            .field(field_index)
            .ok_or_else(|| Error::FieldNotFound {
                path: path.to_string(),
                index: field_index,
            })?;

        let Some(component_index) = path.component else {
            return Ok(field.value(self.encoding()));
        };
        let component =
            field
                .component(component_index)
                .ok_or_else(|| Error::ComponentNotFound {
                    path: path.to_string(),
                    index: component_index,
                })?;

        let Some(subcomponent_index) = path.subcomponent else {
            return Ok(Some(component.value(self.encoding())));
        };
        let subcomponent =
            component
                .subcomponent(subcomponent_index)
                .ok_or_else(|| Error::SubComponentNotFound {
                    path: path.to_string(),
                    index: subcomponent_index,
                })?;
        Ok(Some(subcomponent.value().to_string()))
    }

    /// Write a value at the position a path addresses.
    ///
    /// `value` is wire text: separators in it create structure and escape
    /// sequences are decoded, exactly as during parsing. The addressed
    /// segment occurrence must exist; field, component and subcomponent
    /// positions are created with empty padding when absent, and writing
    /// to an occupied position overwrites it.
    pub fn set(&mut self, path: &str, value: &str) -> Result<()> {
        let path: Path = path.parse()?;
        let encoding = self.encoding().clone();
        let segment = self
            .segment_occurrence_mut(&path.segment, path.occurrence)
            .ok_or_else(|| Error::SegmentNotFound {
                name: path.segment.clone(),
                occurrence: path.occurrence,
            })?;

        let Some(field_index) = path.field else {
            return Err(Error::SegmentLevelWrite(path.to_string()));
        };

        match (path.component, path.subcomponent) {
            (None, _) => segment.set_field(field_index, Field::parse(value, &encoding)),
            (Some(component_index), None) => segment
                .ensure_field(field_index)
                .set_component(component_index, Component::parse(value, &encoding)),
            (Some(component_index), Some(subcomponent_index)) => {
                let decoded = encoding.decode(value);
                segment
                    .ensure_field(field_index)
                    .ensure_component(component_index)
                    .set_subcomponent(subcomponent_index, decoded);
            }
        }
        Ok(())
    }
}

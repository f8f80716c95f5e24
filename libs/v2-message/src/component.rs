//! Component and subcomponent levels of the value tree

use crate::encoding::Encoding;

/// Leaf of the message tree.
///
/// Holds decoded text; escape sequences are applied only when the tree is
/// serialized back to wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubComponent {
    value: String,
}

impl SubComponent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// One component of a repetition: an ordered run of subcomponents,
/// addressed by 1-based position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    subcomponents: Vec<SubComponent>,
}

impl Component {
    /// Component with a single, already-decoded subcomponent.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            subcomponents: vec![SubComponent::new(value)],
        }
    }

    /// Split wire text on the subcomponent separator and decode each leaf.
    pub fn parse(text: &str, encoding: &Encoding) -> Self {
        Self {
            subcomponents: text
                .split(encoding.subcomponent)
                .map(|part| SubComponent::new(encoding.decode(part)))
                .collect(),
        }
    }

    pub fn subcomponents(&self) -> &[SubComponent] {
        &self.subcomponents
    }

    /// 1-based lookup.
    pub fn subcomponent(&self, position: usize) -> Option<&SubComponent> {
        position
            .checked_sub(1)
            .and_then(|i| self.subcomponents.get(i))
    }

    pub fn subcomponent_mut(&mut self, position: usize) -> Option<&mut SubComponent> {
        position
            .checked_sub(1)
            .and_then(|i| self.subcomponents.get_mut(i))
    }

    /// Overwrite the subcomponent at a 1-based position, padding any
    /// missing slots in between with empty subcomponents.
    pub fn set_subcomponent(&mut self, position: usize, value: impl Into<String>) {
        debug_assert!(position >= 1);
        if self.subcomponents.len() < position {
            self.subcomponents
                .resize_with(position, SubComponent::default);
        }
        self.subcomponents[position - 1] = SubComponent::new(value);
    }

    /// Append after the current maximum position.
    pub fn add_subcomponent(&mut self, value: impl Into<String>) {
        self.subcomponents.push(SubComponent::new(value));
    }

    pub fn is_subcomponentized(&self) -> bool {
        self.subcomponents.len() > 1
    }

    /// Decoded text of the component, subcomponents joined by the
    /// subcomponent separator.
    pub fn value(&self, encoding: &Encoding) -> String {
        let mut out = String::new();
        for (i, sub) in self.subcomponents.iter().enumerate() {
            if i > 0 {
                out.push(encoding.subcomponent);
            }
            out.push_str(sub.value());
        }
        out
    }
}

//! Field and repetition levels of the value tree

use crate::component::{Component, SubComponent};
use crate::encoding::Encoding;

/// One repetition of a field: an ordered run of components, addressed by
/// 1-based position. Most fields have exactly one repetition; more appear
/// only when the repetition separator occurs in the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Repetition {
    components: Vec<Component>,
}

impl Repetition {
    /// Repetition with a single, already-decoded leaf value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            components: vec![Component::new(value)],
        }
    }

    /// Split wire text on the component separator.
    pub fn parse(text: &str, encoding: &Encoding) -> Self {
        Self {
            components: text
                .split(encoding.component)
                .map(|part| Component::parse(part, encoding))
                .collect(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// 1-based lookup.
    pub fn component(&self, position: usize) -> Option<&Component> {
        position.checked_sub(1).and_then(|i| self.components.get(i))
    }

    pub fn component_mut(&mut self, position: usize) -> Option<&mut Component> {
        position
            .checked_sub(1)
            .and_then(|i| self.components.get_mut(i))
    }

    /// Overwrite the component at a 1-based position, padding any missing
    /// slots in between with empty components.
    pub fn set_component(&mut self, position: usize, component: Component) {
        debug_assert!(position >= 1);
        if self.components.len() < position {
            self.components.resize_with(position, Component::default);
        }
        self.components[position - 1] = component;
    }

    /// Append after the current maximum position.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Mutable access to a 1-based position, creating it (and any gap
    /// before it) as empty slots when absent.
    pub fn ensure_component(&mut self, position: usize) -> &mut Component {
        debug_assert!(position >= 1);
        if self.components.len() < position {
            self.components.resize_with(position, Component::default);
        }
        &mut self.components[position - 1]
    }

    pub fn is_componentized(&self) -> bool {
        self.components.len() > 1
    }

    /// Decoded text of the repetition, components joined by the component
    /// separator.
    pub fn value(&self, encoding: &Encoding) -> String {
        let mut out = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(encoding.component);
            }
            out.push_str(&component.value(encoding));
        }
        out
    }
}

/// A segment field.
///
/// A field is *populated*, *empty* or *explicit null*: the null state
/// comes from the two-double-quote token, renders back as that token, and
/// is distinct from emptiness on read and on round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    repetitions: Vec<Repetition>,
    null: bool,
}

impl Field {
    /// Field with a single, already-decoded leaf value. The explicit-null
    /// token is recognized and produces a null field.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == Encoding::PRESENT_BUT_NULL {
            return Self::null();
        }
        Self {
            repetitions: vec![Repetition::new(value)],
            null: false,
        }
    }

    /// Explicit-null field.
    pub fn null() -> Self {
        Self {
            repetitions: Vec::new(),
            null: true,
        }
    }

    /// Split wire text on the repetition separator, then each repetition
    /// into components and subcomponents. A field consisting of exactly
    /// the explicit-null token becomes a null field; the token embedded in
    /// a larger field stays literal text.
    pub fn parse(text: &str, encoding: &Encoding) -> Self {
        if text == Encoding::PRESENT_BUT_NULL {
            return Self::null();
        }
        Self {
            repetitions: text
                .split(encoding.repetition)
                .map(|part| Repetition::parse(part, encoding))
                .collect(),
            null: false,
        }
    }

    pub fn is_null(&self) -> bool {
        self.null
    }

    pub fn is_empty(&self) -> bool {
        !self.null
            && self.repetitions.iter().all(|rep| {
                rep.components()
                    .iter()
                    .all(|c| c.subcomponents().iter().all(SubComponent::is_empty))
            })
    }

    pub fn repetitions(&self) -> &[Repetition] {
        &self.repetitions
    }

    /// 1-based lookup.
    pub fn repetition(&self, position: usize) -> Option<&Repetition> {
        position
            .checked_sub(1)
            .and_then(|i| self.repetitions.get(i))
    }

    pub fn repetition_mut(&mut self, position: usize) -> Option<&mut Repetition> {
        position
            .checked_sub(1)
            .and_then(|i| self.repetitions.get_mut(i))
    }

    pub fn add_repetition(&mut self, repetition: Repetition) {
        self.null = false;
        self.repetitions.push(repetition);
    }

    pub fn has_repetitions(&self) -> bool {
        self.repetitions.len() > 1
    }

    /// Component lookup within the first repetition, 1-based.
    pub fn component(&self, position: usize) -> Option<&Component> {
        self.repetition(1).and_then(|rep| rep.component(position))
    }

    /// Overwrite a component of the first repetition (created when the
    /// field is still empty or null), padding missing slots in between.
    /// Writing twice to the same position keeps only the last value.
    pub fn set_component(&mut self, position: usize, component: Component) {
        self.first_repetition_mut().set_component(position, component);
    }

    /// Append a component after the first repetition's current maximum.
    pub fn add_component(&mut self, component: Component) {
        self.first_repetition_mut().add_component(component);
    }

    pub(crate) fn ensure_component(&mut self, position: usize) -> &mut Component {
        self.first_repetition_mut().ensure_component(position)
    }

    pub fn is_componentized(&self) -> bool {
        self.repetitions.iter().any(Repetition::is_componentized)
    }

    /// Decoded field text: repetitions joined by the repetition separator.
    /// `None` marks an explicit-null field; an empty field yields
    /// `Some("")`.
    pub fn value(&self, encoding: &Encoding) -> Option<String> {
        if self.null {
            return None;
        }
        let mut out = String::new();
        for (i, repetition) in self.repetitions.iter().enumerate() {
            if i > 0 {
                out.push(encoding.repetition);
            }
            out.push_str(&repetition.value(encoding));
        }
        Some(out)
    }

    fn first_repetition_mut(&mut self) -> &mut Repetition {
        self.null = false;
        if self.repetitions.is_empty() {
            self.repetitions.push(Repetition::default());
        }
        &mut self.repetitions[0]
    }
}

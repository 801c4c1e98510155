//! Records read from the attribute definition database.
use crate::{category::AttrCategory, property::AttrProperty};

/// A single attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrDefinition {
    /// Symbolic name, unique across the catalogue (e.g. `NoReturn`).
    pub name: String,

    pub category: AttrCategory,

    /// Spelling of the attribute in textual IR (e.g. `noreturn`).
    pub display_string: String,

    /// Property tags in declaration order. Each entry holds exactly one tag.
    pub properties: Vec<AttrProperty>,
}

impl AttrDefinition {
    pub fn new(
        name: impl Into<String>,
        category: AttrCategory,
        display_string: impl Into<String>,
    ) -> Self {
        AttrDefinition {
            name: name.into(),
            category,
            display_string: display_string.into(),
            properties: Vec::new(),
        }
    }

    /// Builder-style helper appending a property tag.
    pub fn with_property(mut self, property: AttrProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Bitwise OR of all declared property tags.
    pub fn property_mask(&self) -> AttrProperty {
        self.properties
            .iter()
            .fold(AttrProperty::empty(), |acc, p| acc | *p)
    }
}

/// One function to call when checking caller/callee attribute compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompatRule {
    /// Function called as `func(Caller, Callee[, "attr"])`.
    pub func: String,

    /// Extra string literal passed to `func` when present.
    pub attr: Option<String>,
}

impl CompatRule {
    pub fn new(func: impl Into<String>) -> Self {
        CompatRule {
            func: func.into(),
            attr: None,
        }
    }

    pub fn with_attr(func: impl Into<String>, attr: impl Into<String>) -> Self {
        CompatRule {
            func: func.into(),
            attr: Some(attr.into()),
        }
    }
}

/// One function to call when merging callee attributes into the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// Function called as `func(Caller, Callee)`.
    pub func: String,
}

impl MergeRule {
    pub fn new(func: impl Into<String>) -> Self {
        MergeRule { func: func.into() }
    }
}

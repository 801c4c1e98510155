use strum::EnumIs;
use thiserror::Error;

use crate::{category::AttrCategory, property::AttrProperty};

#[derive(Debug, EnumIs, Error)]
pub enum Error {
    /// A category-restricted property tag is attached to a definition of another category.
    #[error(
        "'{property}' only compatible with '{required}'. Attribute `{attr}` is declared as '{found}'."
    )]
    IncompatibleProperty {
        attr: String,
        property: AttrProperty,
        required: AttrCategory,
        found: AttrCategory,
    },

    /// A property tag name does not resolve to any known property.
    #[error("Attribute `{attr}` refers to an unknown property `{property}`.")]
    UnknownProperty { attr: String, property: String },

    /// Attribute names must be unique across the whole catalogue.
    #[error(
        "Attribute `{name}` is defined more than once. Attribute names must be unique across all categories."
    )]
    DuplicateAttribute { name: String },

    /// Attribute names are emitted as enumerators and macro arguments.
    #[error("Attribute name `{name}` is not a valid C identifier.")]
    InvalidAttributeName { name: String },

    /// Display strings are emitted as bare macro arguments.
    #[error(
        "Attribute `{attr}` has display string {display:?} which cannot be used as a macro argument."
    )]
    InvalidDisplayString { attr: String, display: String },

    /// A compatibility or merge rule does not name a function to call.
    #[error("A {rule} rule has an empty function name.")]
    EmptyRuleFunction { rule: &'static str },

    #[error("Failed to parse attribute manifest '{file}': {source}")]
    ManifestParse {
        file: String,
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format generated output")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns true if `name` is a valid C identifier.
pub(crate) fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Escape `s` for use inside a C string literal.
pub(crate) fn c_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            // Octal escapes end after three digits.
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

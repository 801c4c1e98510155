//! Attribute table generator.
//!
//! `hyattr` turns a catalogue of attribute definitions into the source text a
//! compiler includes to describe its attributes: integer codes per attribute,
//! name tables, a per-attribute property byte table, and the glue functions
//! that check and merge attribute sets across a call edge.
//!
//! Typical use loads an [`AttrRegistry`] from a TOML manifest and hands it to
//! an [`AttrEmitter`]:
//!
//! ```rust
//! # use hyattr::{AttrEmitter, EmitOptions, manifest::registry_from_str};
//! let registry = registry_from_str(
//!     "inline",
//!     r#"
//! [[attr]]
//! name = "NoReturn"
//! kind = "EnumAttr"
//! display_string = "noreturn"
//! "#,
//! )
//! .unwrap();
//! let text = AttrEmitter::new(&registry, EmitOptions::default()).run().unwrap();
//! assert!(text.contains("NoReturn = 1,"));
//! ```

pub mod category;
pub mod database;
pub mod emit;
pub mod layout;
pub mod manifest;
pub mod property;
pub mod record;
pub mod utils;

pub use category::AttrCategory;
pub use database::{AttrDatabase, AttrRegistry};
pub use emit::{AttrEmitter, EmitOptions, PropertyStyle, Section};
pub use property::AttrProperty;
pub use record::{AttrDefinition, CompatRule, MergeRule};
pub use utils::{Error, Result};

//! Property table.
//!
//! One byte per code-bearing attribute, in code order: entry `i` describes the
//! attribute with code `i + 1`.
use std::fmt::Write;

use log::debug;

use crate::{
    category::AttrCategory,
    database::AttrDatabase,
    emit::{PropertyStyle, Section, begin_block},
    layout::FIRST_CODE,
    property::AttrProperty,
    utils::{Error, Result},
};

pub const PROP_TABLE_NAME: &str = "AttrPropTable";

/// Validated property entry of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: String,
    pub category: AttrCategory,

    /// Declared tags, in declaration order.
    pub tags: Vec<AttrProperty>,

    /// OR of `tags`.
    pub flags: AttrProperty,
}

/// Property bytes of every code-bearing attribute, in code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    entries: Vec<PropertyEntry>,
}

impl PropertyTable {
    /// Fold the property tags of every code-bearing definition.
    ///
    /// Fails on the first category-restricted tag attached to a definition of
    /// another category.
    pub fn build<D: AttrDatabase>(db: &D) -> Result<Self> {
        let mut entries = Vec::new();

        for def in db.code_bearing() {
            let mut flags = AttrProperty::empty();
            for tag in &def.properties {
                for single in tag.iter() {
                    if let Some(required) = single.required_category() {
                        if required != def.category {
                            return Err(Error::IncompatibleProperty {
                                attr: def.name.clone(),
                                property: single,
                                required,
                                found: def.category,
                            });
                        }
                    }
                }
                flags |= *tag;
            }

            entries.push(PropertyEntry {
                name: def.name.clone(),
                category: def.category,
                tags: def.properties.clone(),
                flags,
            });
        }

        debug!("Property table holds {} entries", entries.len());
        Ok(PropertyTable { entries })
    }

    /// Flags of the attribute with the given code.
    pub fn get(&self, code: u32) -> Option<AttrProperty> {
        let index = code.checked_sub(FIRST_CODE)? as usize;
        self.entries.get(index).map(|entry| entry.flags)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Emit the `GET_ATTR_PROP_TABLE` block.
pub fn emit_prop_table<W: Write>(
    table: &PropertyTable,
    style: PropertyStyle,
    out: &mut W,
) -> std::fmt::Result {
    begin_block(out, Section::PropTable)?;
    writeln!(out, "static const uint8_t {}[] = {{", PROP_TABLE_NAME)?;

    for entry in table.iter() {
        match style {
            PropertyStyle::Numeric => writeln!(out, "{},", entry.flags.bits())?,
            PropertyStyle::Symbolic => {
                write!(out, "0")?;
                for tag in entry.tags.iter().flat_map(|tag| tag.iter()) {
                    write!(out, " | AttributeProperty::{}", tag.to_str())?;
                }
                writeln!(out, ",")?;
            }
        }
    }

    writeln!(out, "}};")?;
    writeln!(out, "#endif")
}

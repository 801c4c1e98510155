//! Generated source emission.
//!
//! The output is made of four blocks, each guarded by its own toggle symbol so
//! that the consumer can include the file several times and pick one block per
//! inclusion:
//!
//! - `GET_ATTR_NAMES`: name tables (see [`names`])
//! - `GET_ATTR_ENUM`: enum code assignments (see [`names`])
//! - `GET_ATTR_COMPAT_FUNC`: compatibility and merge functions (see [`compat`])
//! - `GET_ATTR_PROP_TABLE`: property table (see [`props`])
//!
//! [`AttrEmitter::run`] validates everything before writing a single byte and
//! returns the complete text, so a failed run never produces partial output.
use std::fmt::Write;

use log::info;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    database::AttrDatabase,
    emit::props::PropertyTable,
    layout::CodeLayout,
    utils::Result,
};

pub mod compat;
pub mod names;
pub mod props;

/// Description shown in the generated file banner.
pub const BACKEND_DESCRIPTION: &str = "Generate attributes";

/// How property table entries are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStyle {
    /// Decimal value of the folded byte (e.g. `32,`).
    #[default]
    Numeric,

    /// OR-expression over the consumer's `AttributeProperty` enumerators
    /// (e.g. `0 | AttributeProperty::IntersectMin,`).
    Symbolic,
}

/// Options controlling the generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    pub property_style: PropertyStyle,

    /// Emit the "do not edit" banner at the top of the output.
    pub header: bool,

    /// Name of the input shown in the banner.
    pub source_name: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            property_style: PropertyStyle::default(),
            header: true,
            source_name: None,
        }
    }
}

/// The independently toggled blocks of the generated file, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Section {
    Names,
    Enum,
    CompatFunc,
    PropTable,
}

impl Section {
    /// Preprocessor symbol the consumer defines to include this block.
    pub fn toggle(&self) -> &'static str {
        match self {
            Section::Names => "GET_ATTR_NAMES",
            Section::Enum => "GET_ATTR_ENUM",
            Section::CompatFunc => "GET_ATTR_COMPAT_FUNC",
            Section::PropTable => "GET_ATTR_PROP_TABLE",
        }
    }
}

/// Open a toggled block. The toggle is undefined right away so that the
/// consumer can include the file again with another toggle.
pub(crate) fn begin_block<W: Write>(out: &mut W, section: Section) -> std::fmt::Result {
    writeln!(out, "#ifdef {}", section.toggle())?;
    writeln!(out, "#undef {}", section.toggle())
}

/// Drives the emitters over one database.
pub struct AttrEmitter<'a, D: AttrDatabase> {
    db: &'a D,
    options: EmitOptions,
}

impl<'a, D: AttrDatabase> AttrEmitter<'a, D> {
    pub fn new(db: &'a D, options: EmitOptions) -> Self {
        AttrEmitter { db, options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Generate the complete output.
    ///
    /// Fails without producing any text if a definition violates a
    /// property/category constraint.
    pub fn run(&self) -> Result<String> {
        let layout = CodeLayout::assign(self.db);
        let table = PropertyTable::build(self.db)?;

        let mut out = String::new();
        if self.options.header {
            self.emit_header(&mut out)?;
        }
        names::emit_names(self.db, &mut out)?;
        names::emit_enum(&layout, &mut out)?;
        compat::emit_compat_funcs(self.db, &mut out)?;
        props::emit_prop_table(&table, self.options.property_style, &mut out)?;

        info!(
            "Generated {} attribute codes, {} compat rules, {} merge rules ({} bytes)",
            layout.len(),
            self.db.compat_rules().len(),
            self.db.merge_rules().len(),
            out.len()
        );
        Ok(out)
    }

    /// Emit a single block into `out`.
    pub fn emit_section<W: Write>(&self, section: Section, out: &mut W) -> Result<()> {
        match section {
            Section::Names => names::emit_names(self.db, out)?,
            Section::Enum => names::emit_enum(&CodeLayout::assign(self.db), out)?,
            Section::CompatFunc => compat::emit_compat_funcs(self.db, out)?,
            Section::PropTable => {
                let table = PropertyTable::build(self.db)?;
                props::emit_prop_table(&table, self.options.property_style, out)?
            }
        }
        Ok(())
    }

    /// Emit the selected blocks, in [`Section`] order, without the banner.
    pub fn run_sections(&self, sections: &[Section]) -> Result<String> {
        // Validate first so that a failing table never leaves earlier blocks behind.
        if sections.contains(&Section::PropTable) {
            PropertyTable::build(self.db)?;
        }

        let mut out = String::new();
        for section in Section::iter().filter(|s| sections.contains(s)) {
            self.emit_section(section, &mut out)?;
        }
        Ok(out)
    }

    fn emit_header<W: Write>(&self, out: &mut W) -> std::fmt::Result {
        let title = "/*===- Generated file ";
        let suffix = "*- C++ -*-===*\\";
        let fill = BANNER_WIDTH.saturating_sub(title.len() + suffix.len());
        writeln!(out, "{}{}{}", title, "-".repeat(fill), suffix)?;
        banner_line(out, "")?;
        banner_line(out, BACKEND_DESCRIPTION)?;
        banner_line(out, "")?;
        banner_line(out, "Automatically generated file, do not edit!")?;
        if let Some(source) = &self.options.source_name {
            banner_line(out, &format!("From: {}", source))?;
        }
        banner_line(out, "")?;
        writeln!(out, "\\*{}*/", "=".repeat(BANNER_WIDTH - 4))?;
        writeln!(out)
    }
}

const BANNER_WIDTH: usize = 80;

fn banner_line<W: Write>(out: &mut W, text: &str) -> std::fmt::Result {
    let pad = (BANNER_WIDTH - 6).saturating_sub(text.len());
    writeln!(out, "|* {}{} *|", text, " ".repeat(pad))
}

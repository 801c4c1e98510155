//! Name tables and enum code assignments.
use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::{
    category::NameGroup,
    database::AttrDatabase,
    emit::{Section, begin_block},
    layout::CodeLayout,
};

/// Fallback callback receiving every `(name, display string)` pair.
pub const ATTRIBUTE_ALL: &str = "ATTRIBUTE_ALL";

/// Emit the `GET_ATTR_NAMES` block.
///
/// Each grouping invokes its own callback macro, which defaults to
/// [`ATTRIBUTE_ALL`] when the consumer did not define it, and is undefined at
/// the end of its list.
pub fn emit_names<D: AttrDatabase, W: Write>(db: &D, out: &mut W) -> std::fmt::Result {
    begin_block(out, Section::Names)?;

    writeln!(out, "#ifndef {}", ATTRIBUTE_ALL)?;
    writeln!(out, "#define {}(FIRST, SECOND)", ATTRIBUTE_ALL)?;
    writeln!(out, "#endif")?;
    writeln!(out)?;

    for group in NameGroup::iter() {
        let macro_name = group.macro_name();
        writeln!(out, "#ifndef {}", macro_name)?;
        writeln!(
            out,
            "#define {}(FIRST, SECOND) {}(FIRST, SECOND)",
            macro_name, ATTRIBUTE_ALL
        )?;
        writeln!(out, "#endif")?;
        writeln!(out)?;

        for category in group.categories() {
            for def in db.definitions(*category) {
                writeln!(out, "{}({},{})", macro_name, def.name, def.display_string)?;
            }
        }

        writeln!(out, "#undef {}", macro_name)?;
        writeln!(out)?;
    }

    writeln!(out, "#undef {}", ATTRIBUTE_ALL)?;
    writeln!(out, "#endif")?;
    writeln!(out)
}

/// Emit the `GET_ATTR_ENUM` block: `First<Category>`, one line per
/// definition, then `Last<Category>`, for every code-bearing category.
pub fn emit_enum<W: Write>(layout: &CodeLayout, out: &mut W) -> std::fmt::Result {
    begin_block(out, Section::Enum)?;

    let mut codes = layout.iter().peekable();
    for (category, range) in layout.ranges() {
        writeln!(out, "First{} = {},", category, range.first)?;
        while let Some(attr) = codes.next_if(|attr| attr.category == category) {
            writeln!(out, "{} = {},", attr.name, attr.code)?;
        }
        writeln!(out, "Last{} = {},", category, range.last)?;
    }

    writeln!(out, "#endif")?;
    writeln!(out)
}

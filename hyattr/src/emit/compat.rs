//! Caller/callee compatibility and merge functions.
//!
//! Both functions are plain call sequences built from the rules in declaration
//! order. The compatibility check folds every result with `&=` so that all
//! rules run even after one of them failed.
use std::fmt::Write;

use crate::{
    database::AttrDatabase,
    emit::{Section, begin_block},
    utils::c_escape,
};

pub const COMPAT_FUNC_NAME: &str = "hasCompatibleFnAttrs";
pub const MERGE_FUNC_NAME: &str = "mergeFnAttrs";

/// Emit the `GET_ATTR_COMPAT_FUNC` block.
pub fn emit_compat_funcs<D: AttrDatabase, W: Write>(db: &D, out: &mut W) -> std::fmt::Result {
    begin_block(out, Section::CompatFunc)?;

    let open = format!("static inline bool {}(", COMPAT_FUNC_NAME);
    writeln!(out, "{}const Function &Caller,", open)?;
    writeln!(out, "{}const Function &Callee) {{", " ".repeat(open.len()))?;
    writeln!(out, "  bool Ret = true;")?;
    writeln!(out)?;

    for rule in db.compat_rules() {
        write!(out, "  Ret &= {}(Caller, Callee", rule.func)?;
        if let Some(attr) = &rule.attr {
            write!(out, ", \"{}\"", c_escape(attr))?;
        }
        writeln!(out, ");")?;
    }

    writeln!(out)?;
    writeln!(out, "  return Ret;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    let open = format!("static inline void {}(", MERGE_FUNC_NAME);
    writeln!(out, "{}Function &Caller,", open)?;
    writeln!(out, "{}const Function &Callee) {{", " ".repeat(open.len()))?;

    for rule in db.merge_rules() {
        writeln!(out, "  {}(Caller, Callee);", rule.func)?;
    }

    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "#endif")?;
    writeln!(out)
}

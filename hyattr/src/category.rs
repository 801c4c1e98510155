//! Attribute categories.
//!
//! Every attribute definition belongs to exactly one [`AttrCategory`]. The
//! category decides whether the attribute receives an integer code, which
//! name-table grouping it is listed in, and which property tags it may carry.
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumIter, IntoEnumIterator};

/// Closed classification of attribute definitions.
///
/// The declaration order of the variants is the order in which codes are
/// assigned. It must match the ordering the consuming compiler uses when
/// comparing attribute kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum, EnumIs, EnumIter, Serialize, Deserialize,
)]
pub enum AttrCategory {
    /// Attribute without a value (e.g. `noreturn`).
    EnumAttr,
    /// Attribute carrying a type (e.g. `byval(<ty>)`).
    TypeAttr,
    /// Attribute carrying an integer (e.g. `align(<n>)`).
    IntAttr,
    /// Attribute carrying a constant range.
    ConstantRangeAttr,
    /// Attribute carrying a list of constant ranges.
    ConstantRangeListAttr,
    /// String attribute with a boolean value.
    StrBoolAttr,
    /// String attribute with a complex value. No code, no property table entry.
    ComplexStrAttr,
}

impl AttrCategory {
    /// Categories that receive integer codes and property table entries, in code order.
    pub const CODE_BEARING: [AttrCategory; 5] = [
        AttrCategory::EnumAttr,
        AttrCategory::TypeAttr,
        AttrCategory::IntAttr,
        AttrCategory::ConstantRangeAttr,
        AttrCategory::ConstantRangeListAttr,
    ];

    /// Creates an [`AttrCategory`] from its schema name.
    pub fn from_str(s: &str) -> Option<Self> {
        AttrCategory::iter().find(|c| c.to_str() == s)
    }

    /// Returns the schema name of the category, as used in `First<Category>` markers.
    pub fn to_str(&self) -> &'static str {
        match self {
            AttrCategory::EnumAttr => "EnumAttr",
            AttrCategory::TypeAttr => "TypeAttr",
            AttrCategory::IntAttr => "IntAttr",
            AttrCategory::ConstantRangeAttr => "ConstantRangeAttr",
            AttrCategory::ConstantRangeListAttr => "ConstantRangeListAttr",
            AttrCategory::StrBoolAttr => "StrBoolAttr",
            AttrCategory::ComplexStrAttr => "ComplexStrAttr",
        }
    }

    /// Returns true if definitions of this category receive an integer code.
    pub fn is_code_bearing(&self) -> bool {
        !matches!(self, AttrCategory::StrBoolAttr | AttrCategory::ComplexStrAttr)
    }

    /// Name-table grouping this category is listed under.
    pub fn name_group(&self) -> NameGroup {
        match self {
            AttrCategory::StrBoolAttr => NameGroup::StrBool,
            AttrCategory::ComplexStrAttr => NameGroup::ComplexStr,
            _ => NameGroup::Enum,
        }
    }
}

impl std::fmt::Display for AttrCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Groupings of the name table. Each grouping gets its own callback macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum NameGroup {
    /// All code-bearing categories, concatenated in code order.
    Enum,
    StrBool,
    ComplexStr,
}

impl NameGroup {
    /// Callback macro invoked once per definition of the grouping.
    pub fn macro_name(&self) -> &'static str {
        match self {
            NameGroup::Enum => "ATTRIBUTE_ENUM",
            NameGroup::StrBool => "ATTRIBUTE_STRBOOL",
            NameGroup::ComplexStr => "ATTRIBUTE_COMPLEXSTR",
        }
    }

    /// Categories listed under this grouping, in emission order.
    pub fn categories(&self) -> &'static [AttrCategory] {
        match self {
            NameGroup::Enum => &AttrCategory::CODE_BEARING,
            NameGroup::StrBool => &[AttrCategory::StrBoolAttr],
            NameGroup::ComplexStr => &[AttrCategory::ComplexStrAttr],
        }
    }
}

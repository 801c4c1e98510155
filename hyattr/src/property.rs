//! Attribute property tags.
//!
//! Property tags are folded into one byte per code-bearing attribute. The bit
//! assignment below is contiguous in declaration order of the tags and is part
//! of the generated table's contract: consumers reading the numeric table must
//! use the same values.
use bitflags::bitflags;

use crate::category::AttrCategory;

bitflags! {
    /// Properties attached to an attribute definition.
    #[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct AttrProperty: u8 {
        /// Attribute may be placed on a function.
        const FN_ATTR = 1 << 0;

        /// Attribute may be placed on a parameter.
        const PARAM_ATTR = 1 << 1;

        /// Attribute may be placed on a return value.
        const RET_ATTR = 1 << 2;

        /// Intersecting two attribute sets keeps the attribute only if both sides agree exactly.
        const INTERSECT_PRESERVE = 1 << 3;

        /// Intersecting two attribute sets keeps the attribute only if present on both sides.
        ///
        /// Only meaningful for valueless attributes, hence restricted to [`AttrCategory::EnumAttr`].
        const INTERSECT_AND = 1 << 4;

        /// Intersecting two attribute sets keeps the minimum of both integer values.
        ///
        /// Restricted to [`AttrCategory::IntAttr`].
        const INTERSECT_MIN = 1 << 5;

        /// Intersection is handled by custom code in the consumer.
        const INTERSECT_CUSTOM = 1 << 6;
    }
}

/// Schema name of every single-tag property, in bit order.
const PROPERTY_NAMES: [(AttrProperty, &str); 7] = [
    (AttrProperty::FN_ATTR, "FnAttr"),
    (AttrProperty::PARAM_ATTR, "ParamAttr"),
    (AttrProperty::RET_ATTR, "RetAttr"),
    (AttrProperty::INTERSECT_PRESERVE, "IntersectPreserve"),
    (AttrProperty::INTERSECT_AND, "IntersectAnd"),
    (AttrProperty::INTERSECT_MIN, "IntersectMin"),
    (AttrProperty::INTERSECT_CUSTOM, "IntersectCustom"),
];

impl AttrProperty {
    /// Creates a single-tag [`AttrProperty`] from its schema name.
    pub fn from_str(s: &str) -> Option<Self> {
        PROPERTY_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(property, _)| *property)
    }

    /// Returns the schema name of a single-tag property.
    ///
    /// Returns `"<multiple>"` for combined flag sets and `"<none>"` for the empty set.
    pub fn to_str(&self) -> &'static str {
        if self.is_empty() {
            return "<none>";
        }
        PROPERTY_NAMES
            .iter()
            .find(|(property, _)| property == self)
            .map_or("<multiple>", |(_, name)| *name)
    }

    /// Category a restricted tag is limited to, or `None` for unrestricted tags.
    pub fn required_category(&self) -> Option<AttrCategory> {
        if *self == AttrProperty::INTERSECT_AND {
            Some(AttrCategory::EnumAttr)
        } else if *self == AttrProperty::INTERSECT_MIN {
            Some(AttrCategory::IntAttr)
        } else {
            None
        }
    }

    /// Returns true if a single-tag property may be attached to a definition of `category`.
    pub fn allowed_on(&self, category: AttrCategory) -> bool {
        self.required_category().is_none_or(|required| required == category)
    }
}

impl std::fmt::Display for AttrProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        let mut first = true;
        for tag in self.iter() {
            if first {
                first = false;
            } else {
                write!(f, " | ")?;
            }
            write!(f, "{}", tag.to_str())?;
        }
        Ok(())
    }
}

//! Attribute definition database.
//!
//! The generator only needs ordered, read-only access to the definitions of
//! each category and to the two rule lists. [`AttrDatabase`] captures that
//! interface; [`AttrRegistry`] is the in-memory implementation used by the
//! manifest loader and the tests.
use std::collections::BTreeSet;

use enum_map::EnumMap;
use log::{debug, warn};

use crate::{
    category::AttrCategory,
    record::{AttrDefinition, CompatRule, MergeRule},
    utils::{Error, Result, is_c_identifier},
};

/// Read-only view over the attribute catalogue.
pub trait AttrDatabase {
    /// Definitions of `category` in declaration order.
    fn definitions(&self, category: AttrCategory) -> &[AttrDefinition];

    /// Compatibility rules in declaration order.
    fn compat_rules(&self) -> &[CompatRule];

    /// Merge rules in declaration order.
    fn merge_rules(&self) -> &[MergeRule];

    /// Iterate over every code-bearing definition in code order.
    fn code_bearing(&self) -> impl Iterator<Item = &AttrDefinition> {
        AttrCategory::CODE_BEARING
            .into_iter()
            .flat_map(move |category| self.definitions(category).iter())
    }
}

/// Insertion-ordered registry of attribute definitions keyed by category.
#[derive(Debug, Clone, Default)]
pub struct AttrRegistry {
    definitions: EnumMap<AttrCategory, Vec<AttrDefinition>>,
    names: BTreeSet<String>,
    compat_rules: Vec<CompatRule>,
    merge_rules: Vec<MergeRule>,
}

impl AttrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition at the end of its category.
    pub fn insert(&mut self, definition: AttrDefinition) -> Result<()> {
        if !is_c_identifier(&definition.name) {
            return Err(Error::InvalidAttributeName {
                name: definition.name,
            });
        }

        if definition.display_string.is_empty()
            || definition
                .display_string
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        {
            return Err(Error::InvalidDisplayString {
                attr: definition.name,
                display: definition.display_string,
            });
        }

        if self.names.contains(&definition.name) {
            return Err(Error::DuplicateAttribute {
                name: definition.name,
            });
        }

        if !definition.category.is_code_bearing() && !definition.properties.is_empty() {
            warn!(
                "Attribute `{}` of category '{}' declares properties; they are ignored",
                definition.name, definition.category
            );
        }

        debug!(
            "Registered attribute `{}` ({})",
            definition.name, definition.category
        );
        let category = definition.category;
        self.names.insert(definition.name.clone());
        self.definitions[category].push(definition);
        Ok(())
    }

    /// Append a compatibility rule.
    ///
    /// An empty attribute name is the same as no attribute name.
    pub fn push_compat_rule(&mut self, mut rule: CompatRule) -> Result<()> {
        if rule.func.is_empty() {
            return Err(Error::EmptyRuleFunction { rule: "compat" });
        }
        if rule.attr.as_deref() == Some("") {
            rule.attr = None;
        }
        self.compat_rules.push(rule);
        Ok(())
    }

    /// Append a merge rule.
    pub fn push_merge_rule(&mut self, rule: MergeRule) -> Result<()> {
        if rule.func.is_empty() {
            return Err(Error::EmptyRuleFunction { rule: "merge" });
        }
        self.merge_rules.push(rule);
        Ok(())
    }

    /// Total number of definitions across all categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&AttrDefinition> {
        if !self.names.contains(name) {
            return None;
        }
        self.definitions
            .values()
            .flat_map(|defs| defs.iter())
            .find(|def| def.name == name)
    }

    /// Build a formatting helper that dumps every record of the registry.
    pub fn fmt(&self) -> impl std::fmt::Display + '_ {
        struct Fmt<'a> {
            registry: &'a AttrRegistry,
        }

        impl std::fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                for (category, defs) in &self.registry.definitions {
                    writeln!(f, "------------- {} ({}) -------------", category, defs.len())?;
                    for def in defs {
                        writeln!(
                            f,
                            "def {} {{ display = {:?}, properties = {} }}",
                            def.name,
                            def.display_string,
                            def.property_mask()
                        )?;
                    }
                }

                writeln!(
                    f,
                    "------------- CompatRule ({}) -------------",
                    self.registry.compat_rules.len()
                )?;
                for rule in &self.registry.compat_rules {
                    match &rule.attr {
                        Some(attr) => writeln!(f, "compat {} {:?}", rule.func, attr)?,
                        None => writeln!(f, "compat {}", rule.func)?,
                    }
                }

                writeln!(
                    f,
                    "------------- MergeRule ({}) -------------",
                    self.registry.merge_rules.len()
                )?;
                for rule in &self.registry.merge_rules {
                    writeln!(f, "merge {}", rule.func)?;
                }
                Ok(())
            }
        }

        Fmt { registry: self }
    }
}

impl AttrDatabase for AttrRegistry {
    fn definitions(&self, category: AttrCategory) -> &[AttrDefinition] {
        &self.definitions[category]
    }

    fn compat_rules(&self) -> &[CompatRule] {
        &self.compat_rules
    }

    fn merge_rules(&self) -> &[MergeRule] {
        &self.merge_rules
    }
}

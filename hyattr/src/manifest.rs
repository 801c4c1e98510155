//! TOML attribute manifest.
//!
//! A manifest lists attribute definitions and the compatibility/merge rules in
//! the order they must be emitted:
//!
//! ```toml
//! [[attr]]
//! name = "NoReturn"
//! kind = "EnumAttr"
//! display_string = "noreturn"
//! properties = ["FnAttr"]
//!
//! [[compat_rule]]
//! func = "isEqual<SanitizeAddressAttr>"
//!
//! [[merge_rule]]
//! func = "setAND<NoInfsFPMathAttr>"
//! ```
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::{
    category::AttrCategory,
    database::AttrRegistry,
    property::AttrProperty,
    record::{AttrDefinition, CompatRule, MergeRule},
    utils::{Error, Result},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestAttr {
    name: String,
    kind: AttrCategory,
    #[serde(alias = "AttrString")]
    display_string: String,
    #[serde(default, alias = "Properties")]
    properties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestCompatRule {
    #[serde(alias = "CompatFunc")]
    func: String,
    #[serde(default, alias = "AttrName")]
    attr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestMergeRule {
    #[serde(alias = "MergeFunc")]
    func: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    attr: Vec<ManifestAttr>,
    #[serde(default)]
    compat_rule: Vec<ManifestCompatRule>,
    #[serde(default)]
    merge_rule: Vec<ManifestMergeRule>,
}

impl Manifest {
    fn into_registry(self) -> Result<AttrRegistry> {
        let mut registry = AttrRegistry::new();

        for attr in self.attr {
            let mut definition = AttrDefinition::new(attr.name, attr.kind, attr.display_string);
            for property in attr.properties {
                match AttrProperty::from_str(&property) {
                    Some(tag) => definition.properties.push(tag),
                    None => {
                        return Err(Error::UnknownProperty {
                            attr: definition.name,
                            property,
                        });
                    }
                }
            }
            registry.insert(definition)?;
        }

        for rule in self.compat_rule {
            registry.push_compat_rule(CompatRule {
                func: rule.func,
                attr: rule.attr,
            })?;
        }

        for rule in self.merge_rule {
            registry.push_merge_rule(MergeRule::new(rule.func))?;
        }

        Ok(registry)
    }
}

/// Parse a manifest from a string. `file` is only used for diagnostics.
pub fn registry_from_str(file: &str, source: &str) -> Result<AttrRegistry> {
    let manifest: Manifest = toml::from_str(source).map_err(|source| Error::ManifestParse {
        file: file.to_string(),
        source,
    })?;
    let registry = manifest.into_registry()?;
    info!(
        "Loaded {} attribute definitions from '{}'",
        registry.len(),
        file
    );
    Ok(registry)
}

/// Read and parse a manifest file.
pub fn registry_from_path(path: &Path) -> Result<AttrRegistry> {
    let source = std::fs::read_to_string(path)?;
    registry_from_str(&path.display().to_string(), &source)
}

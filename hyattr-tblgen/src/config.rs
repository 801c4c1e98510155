//! Generator configuration file.
//!
//! ```toml
//! input = "Attributes.toml"
//! output = "Attributes.inc"
//! write_if_changed = true
//!
//! [emit]
//! property_style = "symbolic"
//! header = true
//! ```
//!
//! Relative paths are resolved against the directory holding the
//! configuration file. Command-line flags take precedence.
use std::path::{Path, PathBuf};

use hyattr::EmitOptions;
use log::debug;
use serde::Deserialize;

use crate::error::{TblgenError, TblgenResult, io_error};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TblgenConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub depfile: Option<PathBuf>,
    pub write_if_changed: bool,
    pub emit: EmitOptions,
}

impl TblgenConfig {
    /// Parse a configuration from a string. `file` is only used for diagnostics.
    pub fn from_str(file: &str, source: &str) -> TblgenResult<Self> {
        toml::from_str(source).map_err(|source| TblgenError::Config {
            file: file.to_string(),
            source,
        })
    }

    /// Read a configuration file and resolve its relative paths.
    pub fn load(path: &Path) -> TblgenResult<Self> {
        let source = std::fs::read_to_string(path).map_err(io_error(path))?;
        let config = Self::from_str(&path.display().to_string(), &source)?;
        debug!("Loaded configuration from '{}'", path.display());

        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| p.map(|p| if p.is_relative() { base.join(p) } else { p });
        TblgenConfig {
            input: resolve(self.input),
            output: resolve(self.output),
            depfile: resolve(self.depfile),
            ..self
        }
    }
}

//! @ai:module:intent Configuration for package scanning and report layout
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config
//! @ai:module:depends_on language, parser, output, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::Language;
use crate::output::DEFAULT_LINE_WIDTH;
use crate::parser::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Settings loaded from an optional TOML file
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base directory relative package paths are resolved against.
    pub root: Option<PathBuf>,
    pub include_hidden: bool,
    pub languages: Option<Vec<String>>,
    pub line_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            include_hidden: false,
            languages: None,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    /// @ai:intent Parse configuration text; `origin` names it in errors
    /// @ai:effects pure
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// @ai:intent Resolve a package argument against the configured root
    /// @ai:example (root = "/go/src", "github.com/a/b") -> "/go/src/github.com/a/b"
    /// @ai:effects pure
    pub fn package_path(&self, package: &Path) -> PathBuf {
        match &self.root {
            Some(root) if package.is_relative() => root.join(package),
            _ => package.to_path_buf(),
        }
    }

    /// @ai:intent Build parser options, validating language names
    /// @ai:effects pure
    pub fn parse_options(&self) -> Result<ParseOptions> {
        let languages = self
            .languages
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<Language>())
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        Ok(ParseOptions {
            include_hidden: self.include_hidden,
            languages,
        })
    }
}

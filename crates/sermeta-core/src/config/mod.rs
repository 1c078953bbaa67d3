//! Configuration model: the nested key-value tree describing which fields
//! serialize under what names, types, and groups.
//!
//! The tree is a TOML document. Top-level structure is typed and parsed
//! eagerly; the per-attribute declaration entries stay raw so that shape
//! checking happens per class at resolve time, leaving other classes
//! unaffected by one malformed entry.

pub mod attribute;

pub use attribute::{AttributeDecl, AttributeOptions};

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("class '{class}': attribute '{key}': {reason}")]
    UnrecognizedAttribute {
        class: String,
        key: String,
        reason: String,
    },
}

///
/// ConfigSource
/// Where the configuration tree was loaded from, for cache freshness.
///

#[derive(Clone, Debug)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub modified: SystemTime,
}

///
/// MappingConfig
/// One class's mapping entry.
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Per-class visibility override; absent means inherit the global list.
    #[serde(default)]
    pub default_visibility: Option<Vec<String>>,

    /// Per-class discriminator override; absent means inherit the global.
    #[serde(default)]
    pub meta_property: Option<bool>,

    /// Raw attribute declarations, in document order. Shape-checked per
    /// class at resolve time.
    #[serde(default)]
    pub attributes: Vec<toml::Value>,
}

///
/// ResolverConfig
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Global default-visibility list for property discovery.
    #[serde(default)]
    pub default_visibility: Vec<String>,

    /// Global discriminator default.
    #[serde(default)]
    pub meta_property: bool,

    /// Gates the schema-version freshness check.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub mappings: BTreeMap<String, MappingConfig>,

    #[serde(skip)]
    pub source: Option<ConfigSource>,
}

impl ResolverConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration file, capturing its modification time as the
    /// configuration's contribution to the freshness fingerprint.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let raw = fs::read_to_string(path).map_err(io_err)?;
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(io_err)?;

        let mut config = Self::from_toml_str(&raw)?;
        config.source = Some(ConfigSource {
            path: path.to_path_buf(),
            modified,
        });

        Ok(config)
    }

    #[must_use]
    pub fn mapping(&self, class: &str) -> Option<&MappingConfig> {
        self.mappings.get(class)
    }

    /// Whether a discriminator field is synthesized for `class`.
    #[must_use]
    pub fn meta_property_for(&self, class: &str) -> bool {
        self.mapping(class)
            .and_then(|mapping| mapping.meta_property)
            .unwrap_or(self.meta_property)
    }

    /// Visibility list for `class`: the per-class override layered on the
    /// global default.
    #[must_use]
    pub fn default_visibility_for(&self, class: &str) -> &[String] {
        self.mapping(class)
            .and_then(|mapping| mapping.default_visibility.as_deref())
            .unwrap_or(&self.default_visibility)
    }

    /// Every class name with a mapping entry, in sorted order.
    pub fn known_class_names(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }
}

use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf, time::SystemTime};

///
/// Visibility
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

///
/// DefaultValue
///
/// A declared default property value, as far as metadata resolution needs
/// one. The persistence-model convention reads a `visible` text list.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DefaultValue {
    Bool(bool),
    Text(String),
    TextList(Vec<String>),
}

///
/// SourceFile
/// Identity of the file a class was declared in, for cache invalidation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

///
/// PropertyDecl
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub visibility: Visibility,
}

///
/// ClassDescriptor
///
/// One class as the host reflection facility reports it: qualified path,
/// parent, directly implemented interfaces, declared instance properties,
/// and declared default values. Interfaces are descriptors too, with no
/// parent and no properties.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassDescriptor {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDecl>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, DefaultValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceFile>,

    /// Marks participation in the persistence-model convention. Ancestry
    /// propagates the flag: subclasses of a flagged class are models too.
    #[serde(default)]
    pub model: bool,
}

impl ClassDescriptor {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            parent: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            defaults: BTreeMap::new(),
            source: None,
            model: false,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.properties.push(PropertyDecl {
            name: name.into(),
            visibility,
        });
        self
    }

    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: DefaultValue) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        self.source = Some(SourceFile {
            path: path.into(),
            modified,
        });
        self
    }

    #[must_use]
    pub const fn as_model(mut self) -> Self {
        self.model = true;
        self
    }

    /// Simple class name: the last segment of the qualified path.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// Visibility of a declared instance property, if one exists.
    #[must_use]
    pub fn property_visibility(&self, name: &str) -> Option<Visibility> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.visibility)
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.property_visibility(name).is_some()
    }
}

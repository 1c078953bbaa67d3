//! Resolved metadata: the per-class property descriptors handed to the
//! serialization engine, plus the freshness contract an external cache
//! builds on.

use crate::METADATA_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// PropertyDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PropertyDescriptor {
    /// Synthesized constant field (the `_type` discriminator).
    Static { serialized_name: String, value: String },

    /// Field read directly off the instance.
    Direct {
        internal_name: String,
        serialized_name: String,
        type_hint: Option<String>,
        groups: Vec<String>,
    },

    /// Field obtained by invoking an accessor. Accessor existence is not
    /// checked here; a missing accessor surfaces when the engine invokes it.
    Virtual {
        internal_name: String,
        accessor: String,
        serialized_name: String,
        type_hint: Option<String>,
        groups: Vec<String>,
    },
}

impl PropertyDescriptor {
    #[must_use]
    pub fn serialized_name(&self) -> &str {
        match self {
            Self::Static {
                serialized_name, ..
            }
            | Self::Direct {
                serialized_name, ..
            }
            | Self::Virtual {
                serialized_name, ..
            } => serialized_name,
        }
    }
}

///
/// ClassMetadata
///
/// Final output per class: ordered property descriptors, the files that
/// contributed to them, a freshness fingerprint, and a schema version tag.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClassMetadata {
    pub class: String,
    pub properties: Vec<PropertyDescriptor>,
    pub file_resources: Vec<PathBuf>,

    /// Freshness fingerprint: the newest contributing modification time.
    pub created_at: SystemTime,
    pub version: u32,
}

impl ClassMetadata {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            properties: Vec::new(),
            file_resources: Vec::new(),
            created_at: UNIX_EPOCH,
            version: METADATA_SCHEMA_VERSION,
        }
    }

    /// Record a contributing file and fold its modification time into the
    /// fingerprint.
    pub fn add_file_resource(&mut self, path: PathBuf, modified: SystemTime) {
        self.file_resources.push(path);
        if modified > self.created_at {
            self.created_at = modified;
        }
    }

    /// True when no contributing file has changed on disk since the
    /// fingerprint was taken. See [`Self::is_fresh_since`].
    #[must_use]
    pub fn is_fresh(&self, debug: bool) -> bool {
        self.is_fresh_since(self.created_at, debug)
    }

    /// True when no contributing file is newer than `reference`. A file
    /// that can no longer be inspected counts as changed. The
    /// schema-version check (`cached <= current`) runs only while `debug`
    /// is active: outside debug, stale versions are accepted to avoid
    /// cache churn in deployed environments.
    #[must_use]
    pub fn is_fresh_since(&self, reference: SystemTime, debug: bool) -> bool {
        for path in &self.file_resources {
            let Ok(modified) = fs::metadata(path).and_then(|meta| meta.modified()) else {
                return false;
            };
            if modified > reference {
                return false;
            }
        }

        if debug && self.version > METADATA_SCHEMA_VERSION {
            return false;
        }

        true
    }
}

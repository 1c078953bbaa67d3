//! Core metadata resolution for sermeta: configuration model, hierarchy
//! walker, and the resolver that folds per-class attribute declarations
//! into one flattened metadata object per concrete class.

pub mod config;
pub mod hierarchy;
pub mod metadata;
pub mod resolve;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

/// Schema version stamped into resolved metadata. Bumped whenever the
/// metadata layout changes; cached entries from a newer version are only
/// rejected while debug mode is active.
pub const METADATA_SCHEMA_VERSION: u32 = 1;

use crate::config::ConfigError;
use sermeta_reflect::ReflectError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::ResolverConfig,
        metadata::{ClassMetadata, PropertyDescriptor},
        resolve::Resolver,
    };
    pub use sermeta_reflect::{ClassDescriptor, ClassRegistry, Visibility};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    ReflectError(#[from] ReflectError),
}

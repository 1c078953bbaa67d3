//! Reflection capability for sermeta: class descriptors and the registry
//! that stands in for a host language's runtime reflection facility.
//!
//! Descriptors are plain data. Any source — a reflection bridge, a build
//! script, a hand-written table in tests — can populate a [`ClassRegistry`]
//! and the resolver never needs to know the difference.

pub mod descriptor;
pub mod registry;

pub use descriptor::{ClassDescriptor, DefaultValue, PropertyDecl, SourceFile, Visibility};
pub use registry::ClassRegistry;

use thiserror::Error as ThisError;

///
/// ReflectError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ReflectError {
    #[error("class '{0}' already registered")]
    ClassAlreadyRegistered(String),

    #[error("class '{0}' not found")]
    ClassNotFound(String),
}

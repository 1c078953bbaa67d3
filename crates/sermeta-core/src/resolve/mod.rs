//! Metadata resolver: walks a class's hierarchy, normalizes each class's
//! declared attribute mappings, merges them under the override policy, and
//! renders the flattened property list the serialization engine consumes.

pub mod mapping;

mod merge;


pub use mapping::AttributeMapping;

use crate::{
    Error,
    config::{AttributeDecl, ResolverConfig},
    hierarchy::object_hierarchy,
    metadata::{ClassMetadata, PropertyDescriptor},
};
use convert_case::{Case, Casing};
use log::{debug, trace};
use merge::MergedProperties;
use sermeta_reflect::{ClassDescriptor, ClassRegistry};

/// Serialized name of the synthesized discriminator field.
pub const DISCRIMINATOR_NAME: &str = "_type";

///
/// Resolver
///
/// Pure function of (configuration snapshot, descriptor table). Safe to
/// call concurrently for different classes; no internal locking.
///

#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
    registry: ClassRegistry,
}

impl Resolver {
    #[must_use]
    pub const fn new(config: ResolverConfig, registry: ClassRegistry) -> Self {
        Self { config, registry }
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Every class name with a mapping entry, in sorted order.
    #[must_use]
    pub fn known_class_names(&self) -> Vec<&str> {
        self.config.known_class_names().collect()
    }

    /// Resolve the flattened serialization metadata for `class`.
    pub fn resolve(&self, class: &str) -> Result<ClassMetadata, Error> {
        let descriptor = self.registry.get(class)?;
        debug!("resolving metadata for class '{class}'");

        let mut metadata = ClassMetadata::new(class);
        if let Some(source) = &self.config.source {
            metadata.add_file_resource(source.path.clone(), source.modified);
        }

        // The synthesized discriminator goes ahead of every declared
        // property.
        if self.config.meta_property_for(class) {
            metadata.properties.push(PropertyDescriptor::Static {
                serialized_name: DISCRIMINATOR_NAME.to_string(),
                value: descriptor.short_name().to_case(Case::Snake),
            });
        }

        let hierarchy = object_hierarchy(&self.registry, descriptor)?;
        let mut merged = MergedProperties::new();

        for entry in &hierarchy {
            if let Some(source) = &entry.source {
                metadata.add_file_resource(source.path.clone(), source.modified);
            }

            let mut mappings = self.declared_mappings(entry)?;
            if entry.path == descriptor.path {
                let defaults = self.model_default_mappings(descriptor, &mappings);
                if !defaults.is_empty() {
                    mappings.splice(0..0, defaults);
                }
            }

            let visibility = self.config.default_visibility_for(&entry.path);
            mappings.extend(self.visibility_mappings(entry, visibility));

            merged.merge(mappings);
        }

        trace!("class '{class}': {} merged properties", merged.len());

        metadata
            .properties
            .extend(merged.into_entries().into_iter().map(render_property));

        Ok(metadata)
    }

    /// Normalize one hierarchy class's declared attribute configuration.
    /// An absent mapping entry is legal and contributes nothing.
    fn declared_mappings(&self, class: &ClassDescriptor) -> Result<Vec<AttributeMapping>, Error> {
        let Some(mapping) = self.config.mapping(&class.path) else {
            return Ok(Vec::new());
        };

        mapping
            .attributes
            .iter()
            .map(|value| {
                let decl = AttributeDecl::from_value(&class.path, value)?;
                Ok(AttributeMapping::from_decl(class, &decl))
            })
            .collect()
    }

    /// Convenience defaults for persistence models: the class's declared
    /// `visible` field list joins the attribute list, skipping names
    /// already declared explicitly.
    fn model_default_mappings(
        &self,
        class: &ClassDescriptor,
        declared: &[AttributeMapping],
    ) -> Vec<AttributeMapping> {
        if !self.registry.is_persistence_model(class) {
            return Vec::new();
        }
        let Some(fields) = self.registry.visible_fields(class) else {
            return Vec::new();
        };

        fields
            .iter()
            .filter(|field| {
                !declared
                    .iter()
                    .any(|mapping| &mapping.internal_name == *field)
            })
            .map(|field| AttributeMapping::from_decl(class, &AttributeDecl::Bare(field.clone())))
            .collect()
    }

    /// Mappings derived from default-visibility scanning.
    ///
    /// The visibility lists are parsed and threaded through so the merge
    /// policy can gap-fill around explicit attributes, but no scan is
    /// performed yet.
    // TODO: derive mappings for declared properties matching `visibility`.
    fn visibility_mappings(
        &self,
        _class: &ClassDescriptor,
        _visibility: &[String],
    ) -> Vec<AttributeMapping> {
        Vec::new()
    }
}

/// A mapping with an accessor renders as a virtual property; the engine
/// invokes the accessor instead of reading the field.
fn render_property(mapping: AttributeMapping) -> PropertyDescriptor {
    match mapping.accessor {
        Some(accessor) => PropertyDescriptor::Virtual {
            internal_name: mapping.internal_name,
            accessor,
            serialized_name: mapping.serialized_name,
            type_hint: mapping.type_hint,
            groups: mapping.groups,
        },
        None => PropertyDescriptor::Direct {
            internal_name: mapping.internal_name,
            serialized_name: mapping.serialized_name,
            type_hint: mapping.type_hint,
            groups: mapping.groups,
        },
    }
}

use crate::{ClassDescriptor, DefaultValue, ReflectError};
use std::collections::BTreeMap;

/// Default-property key carrying the persistence-model field list.
pub const VISIBLE_DEFAULTS_KEY: &str = "visible";

///
/// ClassRegistry
///
/// Pre-generated descriptor table satisfying the reflection capability.
/// Lookups are by qualified path; iteration order is deterministic.
///

#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, ClassDescriptor>,
}

impl ClassRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class descriptor under its qualified path.
    pub fn register(&mut self, class: ClassDescriptor) -> Result<(), ReflectError> {
        if self.classes.contains_key(&class.path) {
            return Err(ReflectError::ClassAlreadyRegistered(class.path));
        }

        self.classes.insert(class.path.clone(), class);
        Ok(())
    }

    /// Look up a class descriptor by qualified path.
    pub fn get(&self, path: &str) -> Result<&ClassDescriptor, ReflectError> {
        self.find(path)
            .ok_or_else(|| ReflectError::ClassNotFound(path.to_string()))
    }

    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ClassDescriptor> {
        self.classes.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.classes.contains_key(path)
    }

    /// Iterate registered descriptors in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.values()
    }

    /// True when the class or any ancestor carries the persistence-model
    /// flag. An unregistered parent ends the chain.
    #[must_use]
    pub fn is_persistence_model(&self, class: &ClassDescriptor) -> bool {
        let mut current = Some(class);

        while let Some(descriptor) = current {
            if descriptor.model {
                return true;
            }
            current = descriptor.parent.as_deref().and_then(|path| self.find(path));
        }

        false
    }

    /// Nearest declared `visible` field list along the parent chain, the
    /// way inherited property defaults surface in the host language.
    #[must_use]
    pub fn visible_fields<'a>(&'a self, class: &'a ClassDescriptor) -> Option<&'a [String]> {
        let mut current = Some(class);

        while let Some(descriptor) = current {
            if let Some(DefaultValue::TextList(fields)) =
                descriptor.defaults.get(VISIBLE_DEFAULTS_KEY)
            {
                return Some(fields);
            }
            current = descriptor.parent.as_deref().and_then(|path| self.find(path));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Visibility;

    fn model_registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry
            .register(ClassDescriptor::new("orm::Model").as_model())
            .expect("base model registration should succeed");
        registry
            .register(
                ClassDescriptor::new("app::content::Post")
                    .with_parent("orm::Model")
                    .with_property("title", Visibility::Public)
                    .with_default(
                        VISIBLE_DEFAULTS_KEY,
                        DefaultValue::TextList(vec!["title".to_string(), "slug".to_string()]),
                    ),
            )
            .expect("post registration should succeed");
        registry
            .register(ClassDescriptor::new("app::content::Page").with_parent("orm::Model"))
            .expect("page registration should succeed");
        registry
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ClassRegistry::new();
        registry
            .register(ClassDescriptor::new("zoo::Dog"))
            .expect("initial registration should succeed");

        let err = registry
            .register(ClassDescriptor::new("zoo::Dog"))
            .expect_err("duplicate registration should fail");
        assert!(
            err.to_string().contains("class 'zoo::Dog' already registered"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn missing_class_lookup_names_the_path() {
        let registry = ClassRegistry::new();
        let err = registry
            .get("zoo::Missing")
            .expect_err("missing path should fail lookup");
        assert!(
            err.to_string().contains("class 'zoo::Missing' not found"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn model_flag_propagates_through_ancestry() {
        let registry = model_registry();
        let post = registry.get("app::content::Post").expect("post registered");
        let model = registry.get("orm::Model").expect("model registered");

        assert!(registry.is_persistence_model(post));
        assert!(registry.is_persistence_model(model));

        let detached = ClassDescriptor::new("app::Detached");
        assert!(!registry.is_persistence_model(&detached));
    }

    #[test]
    fn visible_fields_come_from_the_nearest_declaration() {
        let registry = model_registry();

        let post = registry.get("app::content::Post").expect("post registered");
        assert_eq!(
            registry.visible_fields(post),
            Some(["title".to_string(), "slug".to_string()].as_slice())
        );

        // Page declares no visible list and neither does its parent.
        let page = registry.get("app::content::Page").expect("page registered");
        assert_eq!(registry.visible_fields(page), None);
    }
}

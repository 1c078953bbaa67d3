use sermeta_reflect::{ClassDescriptor, ClassRegistry, DefaultValue, Visibility};

/// Dog extends Animal implements Pet; Animal implements Named; Cat extends
/// Animal and re-declares Named.
pub(crate) fn animal_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();

    for class in [
        ClassDescriptor::new("zoo::Named"),
        ClassDescriptor::new("zoo::Pet"),
        ClassDescriptor::new("zoo::Animal")
            .implements("zoo::Named")
            .with_property("name", Visibility::Protected),
        ClassDescriptor::new("zoo::Dog")
            .with_parent("zoo::Animal")
            .implements("zoo::Pet"),
        ClassDescriptor::new("zoo::Cat")
            .with_parent("zoo::Animal")
            .implements("zoo::Named"),
    ] {
        registry
            .register(class)
            .expect("fixture registration should succeed");
    }

    registry
}

/// A persistence-model hierarchy: BlogPost extends the flagged base and
/// carries a conventional `visible` field list.
pub(crate) fn content_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();

    for class in [
        ClassDescriptor::new("orm::Model").as_model(),
        ClassDescriptor::new("app::content::BlogPost")
            .with_parent("orm::Model")
            .with_property("title", Visibility::Public)
            .with_property("slug", Visibility::Protected)
            .with_property("secret", Visibility::Private)
            .with_default(
                "visible",
                DefaultValue::TextList(vec!["title".to_string(), "slug".to_string()]),
            ),
    ] {
        registry
            .register(class)
            .expect("fixture registration should succeed");
    }

    registry
}

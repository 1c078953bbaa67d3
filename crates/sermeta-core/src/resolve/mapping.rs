use crate::config::AttributeDecl;
use convert_case::{Case, Casing};
use sermeta_reflect::ClassDescriptor;

///
/// AttributeMapping
///
/// Normalized intermediate representation of one declared field, keyed by
/// `internal_name` during the merge.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeMapping {
    /// Source-side property or accessor identifier.
    pub internal_name: String,

    /// Externally visible field name.
    pub serialized_name: String,

    /// Explicit serialization type; absent means the engine infers.
    pub type_hint: Option<String>,

    /// Group tags for conditional serialization.
    pub groups: Vec<String>,

    /// Getter to invoke instead of direct field access.
    pub accessor: Option<String>,

    /// True for explicit attribute declarations, false for mappings derived
    /// from default-visibility scanning. The merge tie-break.
    pub is_attribute: bool,
}

impl AttributeMapping {
    /// Normalize one declaration against the class it was declared on.
    #[must_use]
    pub fn from_decl(class: &ClassDescriptor, decl: &AttributeDecl) -> Self {
        let (internal_name, serialized_name, type_hint, groups) = match decl {
            AttributeDecl::Bare(field) => {
                (field.clone(), field.to_case(Case::Snake), None, Vec::new())
            }
            AttributeDecl::Typed { field, type_hint } => (
                field.clone(),
                field.to_case(Case::Snake),
                Some(type_hint.clone()),
                Vec::new(),
            ),
            AttributeDecl::Detailed { field, options } => {
                let serialized_name = options
                    .name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .map_or_else(|| field.to_case(Case::Snake), str::to_string);
                let type_hint = options
                    .type_hint
                    .as_deref()
                    .filter(|hint| !hint.is_empty())
                    .map(str::to_string);

                (field.clone(), serialized_name, type_hint, options.groups.clone())
            }
        };

        Self {
            accessor: infer_accessor(class, &internal_name),
            internal_name,
            serialized_name,
            type_hint,
            groups,
            is_attribute: true,
        }
    }
}

/// Direct access needs a declared public property; a non-public or
/// undeclared (virtual) name goes through the conventional getter.
fn infer_accessor(class: &ClassDescriptor, internal_name: &str) -> Option<String> {
    match class.property_visibility(internal_name) {
        Some(visibility) if visibility.is_public() => None,
        _ => Some(format!("get{}", internal_name.to_case(Case::Pascal))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeOptions;
    use sermeta_reflect::Visibility;

    fn post() -> ClassDescriptor {
        ClassDescriptor::new("app::content::Post")
            .with_property("title", Visibility::Public)
            .with_property("secret", Visibility::Private)
            .with_property("authorName", Visibility::Public)
    }

    #[test]
    fn bare_declaration_snake_cases_the_serialized_name() {
        let mapping =
            AttributeMapping::from_decl(&post(), &AttributeDecl::Bare("authorName".to_string()));

        assert_eq!(mapping.internal_name, "authorName");
        assert_eq!(mapping.serialized_name, "author_name");
        assert_eq!(mapping.type_hint, None);
        assert!(mapping.groups.is_empty());
        assert!(mapping.is_attribute);
    }

    #[test]
    fn bare_and_empty_structured_declarations_are_equivalent() {
        let class = post();
        let bare = AttributeMapping::from_decl(&class, &AttributeDecl::Bare("title".to_string()));
        let detailed = AttributeMapping::from_decl(
            &class,
            &AttributeDecl::Detailed {
                field: "title".to_string(),
                options: AttributeOptions::default(),
            },
        );

        assert_eq!(bare, detailed);
    }

    #[test]
    fn structured_overrides_beat_the_derived_defaults() {
        let mapping = AttributeMapping::from_decl(
            &post(),
            &AttributeDecl::Detailed {
                field: "title".to_string(),
                options: AttributeOptions {
                    type_hint: Some("string".to_string()),
                    name: Some("headline".to_string()),
                    groups: vec!["api".to_string()],
                },
            },
        );

        assert_eq!(mapping.serialized_name, "headline");
        assert_eq!(mapping.type_hint, Some("string".to_string()));
        assert_eq!(mapping.groups, vec!["api".to_string()]);
    }

    #[test]
    fn empty_structured_options_fall_back_to_defaults() {
        let mapping = AttributeMapping::from_decl(
            &post(),
            &AttributeDecl::Detailed {
                field: "title".to_string(),
                options: AttributeOptions {
                    type_hint: Some(String::new()),
                    name: Some(String::new()),
                    groups: Vec::new(),
                },
            },
        );

        assert_eq!(mapping.serialized_name, "title");
        assert_eq!(mapping.type_hint, None);
    }

    #[test]
    fn accessor_is_inferred_for_non_public_and_virtual_names() {
        let class = post();

        let public =
            AttributeMapping::from_decl(&class, &AttributeDecl::Bare("title".to_string()));
        assert_eq!(public.accessor, None);

        let private =
            AttributeMapping::from_decl(&class, &AttributeDecl::Bare("secret".to_string()));
        assert_eq!(private.accessor, Some("getSecret".to_string()));

        let virtual_name =
            AttributeMapping::from_decl(&class, &AttributeDecl::Bare("permalink".to_string()));
        assert_eq!(virtual_name.accessor, Some("getPermalink".to_string()));

        let camel =
            AttributeMapping::from_decl(&class, &AttributeDecl::Bare("createdAt".to_string()));
        assert_eq!(camel.accessor, Some("getCreatedAt".to_string()));
    }
}

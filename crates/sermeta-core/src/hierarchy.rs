//! Hierarchy walker: the ordered, deduplicated list of classes that
//! participate in metadata resolution for one concrete class.

use sermeta_reflect::{ClassDescriptor, ClassRegistry, ReflectError};
use std::collections::BTreeSet;

/// Enumerate the hierarchy of `class`, most-derived first: the class
/// itself, its directly implemented interfaces, then its parent's own
/// walk. Duplicates keep their first occurrence.
pub fn object_hierarchy<'r>(
    registry: &'r ClassRegistry,
    class: &ClassDescriptor,
) -> Result<Vec<&'r ClassDescriptor>, ReflectError> {
    let mut names = Vec::new();
    collect(registry, class, &mut names)?;

    // Duplicates fold only once the full recursive walk is collected.
    let mut seen = BTreeSet::new();
    names.retain(|name| seen.insert(name.clone()));

    names.iter().map(|name| registry.get(name)).collect()
}

fn collect(
    registry: &ClassRegistry,
    class: &ClassDescriptor,
    out: &mut Vec<String>,
) -> Result<(), ReflectError> {
    out.push(class.path.clone());
    out.extend(class.interfaces.iter().cloned());

    if let Some(parent) = &class.parent {
        collect(registry, registry.get(parent)?, out)?;
    }

    Ok(())
}

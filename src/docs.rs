//! Documentation metadata for named types.
//!
//! `StructInfo` and `EnumInfo` are immutable once built. Other named types are
//! referenced from field signatures by name only; resolving those names is the
//! job of [`crate::registry::SchemaRegistry`].
pub mod description;
pub mod enumeration;
pub mod field;
pub mod structure;

pub use description::{DescriptionInfo, Markup};
pub use enumeration::{EnumInfo, EnumValueInfo};
pub use field::{FieldInfo, FieldRequirement};
pub use structure::StructInfo;

use std::collections::HashSet;

use crate::ir::TypeSignature;

/// Behavior shared by every named entity in a schema.
pub trait NamedTypeInfo {
    fn name(&self) -> &str;

    fn description_info(&self) -> Option<&DescriptionInfo>;

    /// Named types referenced directly by this type, deduplicated and sorted
    /// by name. Never follows references into other types.
    fn find_named_types(&self) -> Vec<TypeSignature>;
}

/// First name that occurs twice, if any.
fn first_duplicate<'a>(names: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|n| !seen.insert(*n))
}

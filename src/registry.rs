//! Schema registry and the transitive closure driver.
//!
//! `StructInfo::find_named_types` only looks at one struct's direct fields.
//! The registry resolves the names it returns and keeps expanding newly seen
//! types until no new names turn up.
use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::closure;
use crate::docs::{DescriptionInfo, EnumInfo, NamedTypeInfo, StructInfo};
use crate::error::{Error, Result};
use crate::ir::{NamedKind, TypeSignature};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamedType {
    Struct(StructInfo),
    Enum(EnumInfo),
}

impl NamedType {
    pub fn kind(&self) -> NamedKind {
        match self {
            Self::Struct(_) => NamedKind::Struct,
            Self::Enum(_) => NamedKind::Enum,
        }
    }
    pub fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            Self::Struct(s) => Some(s),
            Self::Enum(_) => None,
        }
    }
    pub fn as_enum(&self) -> Option<&EnumInfo> {
        match self {
            Self::Enum(e) => Some(e),
            Self::Struct(_) => None,
        }
    }
}

impl NamedTypeInfo for NamedType {
    fn name(&self) -> &str {
        match self {
            Self::Struct(s) => s.name(),
            Self::Enum(e) => e.name(),
        }
    }

    fn description_info(&self) -> Option<&DescriptionInfo> {
        match self {
            Self::Struct(s) => s.description_info(),
            Self::Enum(e) => e.description_info(),
        }
    }

    fn find_named_types(&self) -> Vec<TypeSignature> {
        match self {
            Self::Struct(s) => s.find_named_types(),
            Self::Enum(e) => e.find_named_types(),
        }
    }
}

impl From<StructInfo> for NamedType {
    fn from(s: StructInfo) -> Self {
        Self::Struct(s)
    }
}

impl From<EnumInfo> for NamedType {
    fn from(e: EnumInfo) -> Self {
        Self::Enum(e)
    }
}

/// Named types keyed by name, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: IndexMap<String, NamedType>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ty: impl Into<NamedType>) -> Result<()> {
        let ty = ty.into();
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(Error::DuplicateType(name));
        }
        debug!(type_name = %name, kind = ty.kind().as_str(), "registered type");
        self.types.insert(name, ty);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<NamedKind> {
        self.get(name).map(NamedType::kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructInfo> {
        self.iter().filter_map(NamedType::as_struct)
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumInfo> {
        self.iter().filter_map(NamedType::as_enum)
    }

    /// Every named type reachable from `root`, following references through
    /// the registry until fixpoint. Sorted like
    /// [`NamedTypeInfo::find_named_types`].
    ///
    /// `root` itself is included only if something reachable refers back to
    /// it. Names missing from the registry are kept in the result but not
    /// expanded.
    pub fn transitive_named_types(&self, root: &str) -> Result<Vec<TypeSignature>> {
        let root_ty = self.get(root).ok_or_else(|| Error::UnknownType(root.to_string()))?;

        let mut expanded: HashSet<String> = HashSet::from([root.to_string()]);
        let mut found: HashSet<TypeSignature> = HashSet::new();
        let mut queue: VecDeque<&NamedType> = VecDeque::from([root_ty]);

        while let Some(ty) = queue.pop_front() {
            trace!(type_name = ty.name(), "expanding");
            for sig in ty.find_named_types() {
                let Some(named) = sig.as_named() else { continue };
                if !expanded.contains(named.name()) {
                    expanded.insert(named.name().to_string());
                    match self.get(named.name()) {
                        Some(next) => {
                            if next.kind() != named.kind() {
                                warn!(
                                    type_name = named.name(),
                                    referenced_as = named.kind().as_str(),
                                    registered_as = next.kind().as_str(),
                                    "reference kind differs from registered kind"
                                );
                            }
                            queue.push_back(next);
                        }
                        None => warn!(
                            type_name = named.name(),
                            from = ty.name(),
                            "unresolved type reference"
                        ),
                    }
                }
                found.insert(sig);
            }
        }

        let mut out: Vec<TypeSignature> = found.into_iter().collect();
        closure::sort_by_name(&mut out);
        Ok(out)
    }

    /// Closure of every registered struct, in registration order. Structs are
    /// processed in parallel.
    pub fn closures(&self, transitive: bool) -> Result<Vec<(String, Vec<TypeSignature>)>> {
        let structs: Vec<&StructInfo> = self.structs().collect();
        structs
            .par_iter()
            .map(|s| {
                let types = if transitive {
                    self.transitive_named_types(s.name())?
                } else {
                    s.find_named_types()
                };
                Ok::<_, Error>((s.name().to_string(), types))
            })
            .collect()
    }
}

// ------------------------------- Tests ------------------------------------ //

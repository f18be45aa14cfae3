//! Strongly-typed signature model for schema documentation.
//!
//! Every type occurrence in a schema is exactly one of three shapes:
//! - a primitive (terminal),
//! - a reference to a named type (terminal; the target lives in a registry and
//!   is only known here by name),
//! - a container wrapping one or more child signatures.
//!
//! Trees are built bottom-up from finished children, so they are acyclic by
//! construction. Recursive *types* only ever show up as a `Named` leaf.
//!
//! Container nesting is capped at [`MAX_NESTING_DEPTH`] levels. Equality,
//! hashing, ordering and display recurse once per level, so the cap is what
//! keeps them within the stack.
pub mod parse;

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// Deepest container nesting a signature may have. `list<Foo>` is 1 deep.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Dotted identifiers, e.g. `Foo` or `com.example.Foo`.
static TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("static regex")
});

// ————————————————————————————————————————————————————————————————————————————
// LEAVES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Binary,
    Void,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Void => "void",
        }
    }

    /// Canonical keywords plus a few common aliases.
    pub fn from_keyword(s: &str) -> Option<Self> {
        let p = match s {
            "bool" | "boolean" => Self::Bool,
            "int8" | "i8" => Self::Int8,
            "int16" | "i16" => Self::Int16,
            "int32" | "i32" => Self::Int32,
            "int64" | "i64" => Self::Int64,
            "float" | "f32" => Self::Float,
            "double" | "f64" => Self::Double,
            "string" | "str" => Self::String,
            "binary" | "bytes" => Self::Binary,
            "void" => Self::Void,
            _ => return None,
        };
        Some(p)
    }
}

/// What sort of entity a named reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedKind {
    Struct,
    Enum,
}

impl NamedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
        }
    }
}

/// A reference to a named type, by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedRef {
    name: String,
    kind: NamedKind,
}

impl NamedRef {
    pub fn new(name: impl Into<String>, kind: NamedKind) -> Result<Self> {
        let name = name.into();
        validate_type_name(&name)?;
        Ok(Self { name, kind })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> NamedKind {
        self.kind
    }
}

/// Non-empty and a (possibly dotted) identifier.
pub(crate) fn validate_type_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingValue("name"));
    }
    if !TYPE_NAME.is_match(name) {
        return Err(Error::InvalidName { name: name.to_string() });
    }
    Ok(())
}

// ————————————————————————————————————————————————————————————————————————————
// CONTAINERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    List,
    Set,
    Map,
    Optional,
    Union,
}

impl ContainerKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Optional => "optional",
            Self::Union => "union",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        let k = match s {
            "list" => Self::List,
            "set" => Self::Set,
            "map" => Self::Map,
            "optional" => Self::Optional,
            "union" => Self::Union,
            _ => return None,
        };
        Some(k)
    }

    fn check_arity(self, actual: usize) -> Result<()> {
        let (ok, expected) = match self {
            Self::List | Self::Set | Self::Optional => (actual == 1, "exactly 1"),
            Self::Map => (actual == 2, "exactly 2"),
            Self::Union => (actual >= 1, "at least 1"),
        };
        if ok {
            Ok(())
        } else {
            Err(Error::ContainerArity { kind: self.keyword(), expected, actual })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Container {
    kind: ContainerKind,
    params: Vec<TypeSignature>,
    // derived from `params`, so it never disagrees between equal containers
    depth: usize,
}

impl Container {
    pub fn new(
        kind: ContainerKind,
        params: impl IntoIterator<Item = TypeSignature>,
    ) -> Result<Self> {
        let params: Vec<TypeSignature> = params.into_iter().collect();
        kind.check_arity(params.len())?;
        let depth = 1 + params.iter().map(TypeSignature::depth).max().unwrap_or(0);
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::TooDeep { limit: MAX_NESTING_DEPTH });
        }
        Ok(Self { kind, params, depth })
    }
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }
    pub fn params(&self) -> &[TypeSignature] {
        &self.params
    }
    pub fn depth(&self) -> usize {
        self.depth
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SIGNATURE
// ————————————————————————————————————————————————————————————————————————————

/// A single type occurrence. Equality, hashing and ordering are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeSignature {
    Primitive(Primitive),
    Named(NamedRef),
    Container(Container),
}

impl TypeSignature {
    pub fn primitive(p: Primitive) -> Self {
        Self::Primitive(p)
    }

    pub fn named(name: impl Into<String>, kind: NamedKind) -> Result<Self> {
        NamedRef::new(name, kind).map(Self::Named)
    }

    pub fn container(
        kind: ContainerKind,
        params: impl IntoIterator<Item = TypeSignature>,
    ) -> Result<Self> {
        Container::new(kind, params).map(Self::Container)
    }

    pub fn list(item: TypeSignature) -> Result<Self> {
        Self::container(ContainerKind::List, [item])
    }

    pub fn set(item: TypeSignature) -> Result<Self> {
        Self::container(ContainerKind::Set, [item])
    }

    pub fn optional(inner: TypeSignature) -> Result<Self> {
        Self::container(ContainerKind::Optional, [inner])
    }

    pub fn map(key: TypeSignature, value: TypeSignature) -> Result<Self> {
        Self::container(ContainerKind::Map, [key, value])
    }

    pub fn union(members: impl IntoIterator<Item = TypeSignature>) -> Result<Self> {
        Self::container(ContainerKind::Union, members)
    }

    /// Container nesting below this node; 0 for leaves.
    pub fn depth(&self) -> usize {
        match self {
            Self::Container(c) => c.depth,
            Self::Primitive(_) | Self::Named(_) => 0,
        }
    }

    /// Display name: the primitive keyword, the registered name, or the
    /// canonical container form such as `map<string, list<Foo>>`.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Primitive(p) => Cow::Borrowed(p.keyword()),
            Self::Named(n) => Cow::Borrowed(n.name()),
            Self::Container(_) => Cow::Owned(self.to_string()),
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    pub fn as_named(&self) -> Option<&NamedRef> {
        match self {
            Self::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[TypeSignature] {
        match self {
            Self::Container(c) => c.params(),
            Self::Primitive(_) | Self::Named(_) => &[],
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.keyword()),
            Self::Named(n) => f.write_str(n.name()),
            Self::Container(c) => {
                write!(f, "{}<", c.kind.keyword())?;
                for (i, p) in c.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(">")
            }
        }
    }
}

impl Serialize for TypeSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(x: &T) -> u64 {
        let mut h = DefaultHasher::new();
        x.hash(&mut h);
        h.finish()
    }

    fn foo() -> TypeSignature {
        TypeSignature::named("Foo", NamedKind::Struct).unwrap()
    }

    #[test]
    fn container_display_is_canonical() {
        let sig = TypeSignature::map(
            TypeSignature::primitive(Primitive::String),
            TypeSignature::list(foo()).unwrap(),
        )
        .unwrap();
        assert_eq!(sig.to_string(), "map<string, list<Foo>>");
        assert_eq!(sig.name(), "map<string, list<Foo>>");
        assert_eq!(foo().name(), "Foo");
        assert_eq!(TypeSignature::primitive(Primitive::Int32).name(), "int32");
    }

    #[test]
    fn container_arity_is_enforced() {
        let err = TypeSignature::container(ContainerKind::Map, [foo()]).unwrap_err();
        assert!(matches!(err, Error::ContainerArity { kind: "map", actual: 1, .. }));

        let err = TypeSignature::container(ContainerKind::List, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::ContainerArity { kind: "list", actual: 0, .. }));

        assert!(TypeSignature::union(Vec::new()).is_err());
        assert!(TypeSignature::union([foo(), TypeSignature::primitive(Primitive::Bool)]).is_ok());
    }

    fn nested_lists(depth: usize, leaf: TypeSignature) -> Result<TypeSignature> {
        (0..depth).try_fold(leaf, |sig, _| TypeSignature::list(sig))
    }

    #[test]
    fn nesting_is_capped_at_construction() {
        let deepest = nested_lists(MAX_NESTING_DEPTH, foo()).unwrap();
        assert_eq!(deepest.depth(), MAX_NESTING_DEPTH);
        assert!(matches!(
            TypeSignature::list(deepest.clone()),
            Err(Error::TooDeep { limit: MAX_NESTING_DEPTH })
        ));
        // the deepest branch counts, not the first one
        let err = TypeSignature::map(TypeSignature::primitive(Primitive::String), deepest);
        assert!(matches!(err, Err(Error::TooDeep { .. })));
        assert_eq!(foo().depth(), 0);
    }

    #[test]
    fn deepest_signatures_compare_hash_and_display() {
        let a = nested_lists(MAX_NESTING_DEPTH, foo()).unwrap();
        let b = nested_lists(MAX_NESTING_DEPTH, foo()).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);

        let other = nested_lists(MAX_NESTING_DEPTH, TypeSignature::primitive(Primitive::Bool));
        assert_ne!(a, other.unwrap());
        assert!(a.to_string().ends_with(&format!("Foo{}", ">".repeat(MAX_NESTING_DEPTH))));
    }

    #[test]
    fn names_are_validated() {
        assert!(matches!(
            TypeSignature::named("", NamedKind::Struct),
            Err(Error::MissingValue("name"))
        ));
        assert!(matches!(
            TypeSignature::named("list<Foo>", NamedKind::Struct),
            Err(Error::InvalidName { .. })
        ));
        assert!(TypeSignature::named("com.example.Foo", NamedKind::Enum).is_ok());
    }

    #[test]
    fn equality_is_structural() {
        let a = TypeSignature::list(foo()).unwrap();
        let b = TypeSignature::list(foo()).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        // same name, different kind
        let as_enum = TypeSignature::named("Foo", NamedKind::Enum).unwrap();
        assert_ne!(foo(), as_enum);

        // same display name, different shape
        let named_string = TypeSignature::named("string", NamedKind::Struct).unwrap();
        let prim_string = TypeSignature::primitive(Primitive::String);
        assert_eq!(named_string.name(), prim_string.name());
        assert_ne!(named_string, prim_string);
    }

    #[test]
    fn serializes_as_display_string() {
        let sig = TypeSignature::optional(TypeSignature::set(foo()).unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&sig).unwrap(),
            serde_json::json!("optional<set<Foo>>")
        );
    }

    #[test]
    fn primitive_aliases_resolve_to_canonical_keyword() {
        assert_eq!(Primitive::from_keyword("i64"), Some(Primitive::Int64));
        assert_eq!(Primitive::from_keyword("bytes").map(Primitive::keyword), Some("binary"));
        assert_eq!(Primitive::from_keyword("Foo"), None);
    }
}

//! Named-type collection over signature trees.
//!
//! Every container kind is unwrapped the same way: lists, sets, maps, optionals
//! and unions all just contribute their children. Only `Named` leaves land in
//! the result.
use std::collections::HashSet;

use crate::ir::TypeSignature;

/// Add every named leaf under `sig` to `acc`.
///
/// Walks with an explicit stack, so depth is bounded by the tree itself and
/// not by the call stack.
pub fn collect_named_types<'a>(acc: &mut HashSet<&'a TypeSignature>, sig: &'a TypeSignature) {
    let mut stack = vec![sig];
    while let Some(node) = stack.pop() {
        match node {
            TypeSignature::Named(_) => {
                acc.insert(node);
            }
            TypeSignature::Container(_) => stack.extend(node.children()),
            TypeSignature::Primitive(_) => {}
        }
    }
}

/// Distinct named types under all of `signatures`, sorted by name.
///
/// Deduplication is structural, so `Foo` the struct and `Foo` the enum are
/// both kept; ties on name are ordered by kind.
pub fn find_named_types<'a, I>(signatures: I) -> Vec<TypeSignature>
where
    I: IntoIterator<Item = &'a TypeSignature>,
{
    let mut acc = HashSet::new();
    for sig in signatures {
        collect_named_types(&mut acc, sig);
    }
    let mut out: Vec<TypeSignature> = acc.into_iter().cloned().collect();
    sort_by_name(&mut out);
    out
}

/// Ascending by display name (byte-wise), then structurally.
pub fn sort_by_name(sigs: &mut [TypeSignature]) {
    sigs.sort_by(|a, b| a.name().cmp(&b.name()).then_with(|| a.cmp(b)));
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::ir::{MAX_NESTING_DEPTH, NamedKind, Primitive};

    fn named(name: &str) -> TypeSignature {
        TypeSignature::named(name, NamedKind::Struct).unwrap()
    }

    #[test]
    fn primitives_contribute_nothing() {
        let sigs = [
            TypeSignature::primitive(Primitive::String),
            TypeSignature::list(TypeSignature::primitive(Primitive::Int32)).unwrap(),
        ];
        assert!(find_named_types(&sigs).is_empty());
    }

    #[test]
    fn all_container_kinds_are_unwrapped() {
        let sigs = [
            TypeSignature::set(named("A")).unwrap(),
            TypeSignature::optional(named("B")).unwrap(),
            TypeSignature::map(named("C"), TypeSignature::list(named("D")).unwrap()).unwrap(),
            TypeSignature::union([named("E"), TypeSignature::primitive(Primitive::Void)]).unwrap(),
        ];
        let names: Vec<String> = find_named_types(&sigs).iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn same_name_different_kind_both_survive() {
        let sigs = [
            TypeSignature::named("Foo", NamedKind::Enum).unwrap(),
            named("Foo"),
            named("Foo"),
        ];
        let out = find_named_types(&sigs);
        assert_eq!(out.len(), 2);
        let kinds: Vec<NamedKind> =
            out.iter().filter_map(|s| s.as_named()).map(|n| n.kind()).collect();
        assert_eq!(kinds, [NamedKind::Struct, NamedKind::Enum]);
    }

    #[test]
    fn deepest_nesting_dedupes_and_hashes() {
        let deep = |leaf: &str| {
            (0..MAX_NESTING_DEPTH).try_fold(named(leaf), |sig, _| TypeSignature::list(sig))
        };
        let a = deep("Leaf").unwrap();
        let b = deep("Leaf").unwrap();
        let c = deep("Other").unwrap();

        // equal deep signatures collapse into one set entry
        let set: HashSet<&TypeSignature> = [&a, &b, &c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(find_named_types([&a, &b, &c]), [named("Leaf"), named("Other")]);

        assert!(matches!(TypeSignature::list(a), Err(Error::TooDeep { .. })));
    }
}

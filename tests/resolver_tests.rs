//! Property-based tests for URN resolution
//!
//! Resolution has to collapse any number of URN references into exactly one
//! package per distinct import path, independently of reference order,
//! repetition, or how the mapping is split across documents.

mod common;

use common::*;
use proptest::prelude::*;
use spirit_tool::resolver::{MappingDocument, MappingTable, PackageResolver, UrnPackage};
use spirit_tool::SpiritError;
use std::collections::BTreeSet;
use std::path::Path;

fn document(entries: &[(String, String)]) -> MappingDocument {
    MappingDocument {
        packages: entries
            .iter()
            .map(|(urn, pkg)| UrnPackage {
                urn: urn.clone(),
                pkg: pkg.clone(),
            })
            .collect(),
    }
}

fn table_from(entries: &[(String, String)]) -> MappingTable {
    let mut table = MappingTable::new();
    table
        .merge(&document(entries), Path::new("packages.json"))
        .expect("single document cannot conflict");
    table
}

proptest! {
    #[test]
    fn test_one_package_per_distinct_import_path(
        (entries, urns) in mapping_strategy().prop_flat_map(referenced_urns_strategy)
    ) {
        let table = table_from(&entries);
        let resolver = PackageResolver::new("/ws/src");
        let packages = resolver.resolve_with_table(&table, &urns).unwrap();

        let expected: BTreeSet<&str> = urns
            .iter()
            .map(|urn| table.get(urn).unwrap())
            .collect();
        let uris: Vec<&str> = packages.iter().map(|p| p.uri.as_str()).collect();

        // Sorted and duplicate free
        prop_assert_eq!(uris, expected.into_iter().collect::<Vec<_>>());
        prop_assert!(packages.iter().all(|p| p.revision.is_empty()));
    }

    #[test]
    fn test_reference_order_does_not_matter(
        (entries, urns) in mapping_strategy().prop_flat_map(referenced_urns_strategy)
    ) {
        let table = table_from(&entries);
        let resolver = PackageResolver::new("/ws/src");

        let mut reversed = urns.clone();
        reversed.reverse();

        prop_assert_eq!(
            resolver.resolve_with_table(&table, &urns).unwrap(),
            resolver.resolve_with_table(&table, &reversed).unwrap()
        );
    }

    #[test]
    fn test_split_documents_resolve_like_one(
        (entries, urns) in mapping_strategy().prop_flat_map(referenced_urns_strategy),
        split in 0usize..24
    ) {
        let split = split.min(entries.len());
        let (first, second) = entries.split_at(split);

        let mut merged = MappingTable::new();
        merged.merge(&document(first), Path::new("first.json")).unwrap();
        merged.merge(&document(second), Path::new("second.json")).unwrap();
        // Re-confirming identical bindings is not a conflict
        merged.merge(&document(&entries), Path::new("all.json")).unwrap();

        let single = table_from(&entries);
        prop_assert_eq!(merged.len(), single.len());

        let resolver = PackageResolver::new("/ws/src");
        prop_assert_eq!(
            resolver.resolve_with_table(&merged, &urns).unwrap(),
            resolver.resolve_with_table(&single, &urns).unwrap()
        );
    }

    #[test]
    fn test_rebinding_a_urn_always_conflicts(entries in mapping_strategy(), index in 0usize..24) {
        let (urn, pkg) = entries[index % entries.len()].clone();
        let rebound = vec![(urn.clone(), format!("{pkg}/other"))];

        let mut table = table_from(&entries);
        let err = table.merge(&document(&rebound), Path::new("late.json")).unwrap_err();

        match err {
            SpiritError::ConflictingMapping { urn: conflicting, existing_pkg, .. } => {
                prop_assert_eq!(conflicting, urn);
                prop_assert_eq!(existing_pkg, pkg);
            }
            other => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

#[test]
fn test_two_urns_one_package() {
    let workspace = TestWorkspace::new();
    let source = workspace.write_sources("sources.json", &[("urn:a", "pkg/x"), ("urn:b", "pkg/x")]);

    let resolver = PackageResolver::new(workspace.source_root());
    let packages = resolver
        .resolve(&[source], &["urn:a".to_string(), "urn:b".to_string()])
        .unwrap();

    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].uri, "pkg/x");
    assert_eq!(packages[0].source_dir(), workspace.source_root().join("pkg/x"));
}

#[test]
fn test_conflict_across_documents_names_both() {
    let workspace = TestWorkspace::new();
    let first = workspace.write_sources("first.json", &[("urn:a", "pkg/x")]);
    let second = workspace.write_sources("second.json", &[("urn:a", "pkg/y")]);

    let err = MappingTable::from_documents(&[first.clone(), second.clone()]).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("urn:a"));
    assert!(message.contains(&first.display().to_string()));
    assert!(message.contains(&second.display().to_string()));
}

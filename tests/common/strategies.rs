#![allow(dead_code)]

use proptest::prelude::*;

/// Strategy for generating URN to import path tables over a small domain, so
/// that many URNs share a package
pub fn mapping_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(0u8..32, 0u8..6, 1..24).prop_map(|table| {
        table
            .into_iter()
            .map(|(urn, pkg)| (format!("urn:test:{urn}"), format!("github.com/test/pkg{pkg}")))
            .collect()
    })
}

/// Strategy for picking referenced URNs (with repeats) out of a mapping table
pub fn referenced_urns_strategy(
    table: Vec<(String, String)>,
) -> impl Strategy<Value = (Vec<(String, String)>, Vec<String>)> {
    let len = table.len();
    prop::collection::vec(0..len, 0..40).prop_map(move |indexes| {
        let urns = indexes.iter().map(|i| table[*i].0.clone()).collect();
        (table.clone(), urns)
    })
}

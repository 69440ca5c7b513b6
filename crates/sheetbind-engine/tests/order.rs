//! Column ordering contract tests: the merged order space shared by static
//! and dynamic headers.

use std::collections::BTreeMap;

use proptest::prelude::*;
use sheetbind_engine::{ColumnOrder, plan};

fn dyn_headers(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| (*h).to_string()).collect()
}

#[test]
fn static_map_reorders_declared_columns() {
    let order = ColumnOrder::new().with_static_map(BTreeMap::from([
        ("Email".to_string(), 1),
        ("Name".to_string(), 2),
        ("Age".to_string(), 3),
    ]));
    let layout = plan(&["Name", "Age", "Email"], &[], Some(&order));
    assert_eq!(layout, vec!["Email", "Name", "Age"]);
}

#[test]
fn unordered_dynamic_headers_follow_ordered_static_ones() {
    let order = ColumnOrder::new().with_static_map(BTreeMap::from([
        ("Email".to_string(), 1),
        ("Name".to_string(), 2),
    ]));
    let layout = plan(&["Name", "Email"], &dyn_headers(&["Age"]), Some(&order));
    assert_eq!(layout, vec!["Email", "Name", "Age"]);
}

#[test]
fn mixed_static_and_dynamic_orders_interleave() {
    let order = ColumnOrder::new()
        .with_static_map(BTreeMap::from([
            ("Manager".to_string(), 1),
            ("Month".to_string(), 2),
        ]))
        .with_dynamic_fn(|_| {
            BTreeMap::from([
                ("Sales".to_string(), 1),
                ("Priority".to_string(), 2),
                ("Status".to_string(), 3),
            ])
        });
    // Equal numbers across the two kinds break alphabetically, so Sales
    // lands between the two static columns.
    let layout = plan(
        &["Manager", "Month"],
        &dyn_headers(&["Sales", "Priority", "Status"]),
        Some(&order),
    );
    assert_eq!(layout, vec!["Manager", "Sales", "Month", "Priority", "Status"]);
}

#[test]
fn equal_numbers_break_ties_alphabetically_across_kinds() {
    let order = ColumnOrder::new()
        .with_static_map(BTreeMap::from([
            ("Manager".to_string(), 1),
            ("Month".to_string(), 1),
        ]))
        .with_dynamic_fn(|_| {
            BTreeMap::from([("Beta".to_string(), 1), ("Alpha".to_string(), 1)])
        });
    let layout = plan(
        &["Manager", "Month"],
        &dyn_headers(&["Beta", "Alpha"]),
        Some(&order),
    );
    assert_eq!(layout, vec!["Alpha", "Beta", "Manager", "Month"]);
}

#[test]
fn static_fn_matches_static_map() {
    let map = BTreeMap::from([("B".to_string(), 1), ("A".to_string(), 2)]);
    let by_map = ColumnOrder::new().with_static_map(map.clone());
    let by_fn = ColumnOrder::new().with_static_fn(move |header| map.get(header).copied());

    let headers = ["A", "B", "C"];
    assert_eq!(
        plan(&headers, &[], Some(&by_map)),
        plan(&headers, &[], Some(&by_fn))
    );
}

#[test]
fn partially_ordered_dynamic_headers_keep_discovery_order_for_the_rest() {
    let order = ColumnOrder::new()
        .with_dynamic_fn(|_| BTreeMap::from([("Zeta".to_string(), 1)]));
    let layout = plan(
        &["Month"],
        &dyn_headers(&["Gamma", "Zeta", "Delta"]),
        Some(&order),
    );
    // Zeta is pulled to the front; Gamma and Delta stay in discovery order
    // after the unordered static block.
    assert_eq!(layout, vec!["Zeta", "Month", "Gamma", "Delta"]);
}

proptest! {
    #[test]
    fn plan_is_a_permutation_of_its_input(
        headers in proptest::collection::btree_set("[A-Z][a-z]{1,6}", 1..12),
        split in 0usize..12,
        numbered in proptest::collection::btree_map("[A-Z][a-z]{1,6}", 1u32..20, 0..8),
    ) {
        let headers: Vec<String> = headers.into_iter().collect();
        let split = split.min(headers.len());
        let static_headers: Vec<&str> =
            headers[..split].iter().map(String::as_str).collect();
        let dynamic_headers = headers[split..].to_vec();

        let order = ColumnOrder::new()
            .with_static_map(numbered.clone())
            .with_dynamic_fn(move |_| numbered.clone());
        let layout = plan(&static_headers, &dynamic_headers, Some(&order));

        prop_assert_eq!(layout.len(), headers.len());
        let mut sorted = layout;
        sorted.sort();
        let mut expected = headers;
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn no_order_spec_concatenates_static_then_dynamic(
        headers in proptest::collection::btree_set("[A-Z][a-z]{1,6}", 1..12),
        split in 0usize..12,
    ) {
        let headers: Vec<String> = headers.into_iter().collect();
        let split = split.min(headers.len());
        let static_headers: Vec<&str> =
            headers[..split].iter().map(String::as_str).collect();
        let dynamic_headers = headers[split..].to_vec();

        prop_assert_eq!(plan(&static_headers, &dynamic_headers, None), headers);
    }
}

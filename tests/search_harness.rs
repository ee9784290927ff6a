#![allow(unused)]
//! Search layer integration harness.
//!
//! # What this covers
//!
//! - **Empty query**: the first five records in dataset order, unfiltered.
//! - **Non-empty query**: case-insensitive substring match over the configured
//!   fields, first matching field wins, at most six rows.
//! - **Rendering**: row label is the id followed by the other configured
//!   fields; the target is `{route_prefix}/{id}`.
//! - **Errors**: a record missing a searched field fails the refresh and the
//!   list keeps its previous rows.
//! - **Property: results ⊆ dataset, order preserved**: search never reorders
//!   or fabricates records.
//!
//! # What this does NOT cover
//!
//! - Terminal rendering of rows (see the `app` tests in stockroom-tui)
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use stockroom_core::{
    config::Config,
    dataset::parse_records,
    search::{filter_records, EMPTY_QUERY_LIMIT, MATCH_LIMIT},
    Dataset, Error, Record, ResultList,
};

fn fruit() -> Dataset {
    DatasetBuilder::new("fruit").named(FRUIT).build()
}

// ---------------------------------------------------------------------------
// Query semantics
// ---------------------------------------------------------------------------

#[test]
fn empty_query_shows_first_five() {
    assert_eq!(
        labels(&fruit(), ""),
        vec!["1 Apple", "2 Banana", "3 Grape", "4 Mango", "5 Plum"]
    );
}

#[test]
fn an_matches_banana_and_mango() {
    // "Apple" has no "an", so it does not match.
    assert_eq!(labels(&fruit(), "an"), vec!["2 Banana", "4 Mango"]);
    assert_eq!(labels(&fruit(), "AN"), labels(&fruit(), "an"));
}

#[test]
fn no_match_renders_empty_list() {
    assert!(labels(&fruit(), "kiwi").is_empty());
}

#[test]
fn id_field_is_searchable() {
    let ds = DatasetBuilder::new("medicines").named(&["Lipitor", "Diovan"]).build();
    assert_eq!(labels(&ds, "2"), vec!["2 Diovan"]);
}

#[test]
fn first_matching_field_wins_without_duplicates() {
    let ds = DatasetBuilder::new("manufacturers")
        .fields(&["id", "name", "phone_number"])
        .record(1, &[("name", json!("Cipla")), ("phone_number", json!("555-cip"))])
        .build();
    assert_eq!(labels(&ds, "cip"), vec!["1 Cipla 555-cip"]);
}

#[test]
fn seventh_match_is_dropped() {
    let names = ["aa", "ab", "ac", "ad", "ae", "af", "ag"];
    let ds = DatasetBuilder::new("letters").named(&names).build();
    let shown = labels(&ds, "a");
    assert_eq!(shown.len(), MATCH_LIMIT);
    assert_eq!(shown.last().map(String::as_str), Some("6 af"));
}

#[test]
fn six_matches_all_shown() {
    let names = ["aa", "ab", "ac", "ad", "ae", "af", "zz"];
    let ds = DatasetBuilder::new("letters").named(&names).build();
    assert_eq!(labels(&ds, "a").len(), 6);
}

#[test]
fn empty_dataset_renders_nothing() {
    let ds = DatasetBuilder::new("empty").build();
    assert!(labels(&ds, "").is_empty());
    assert!(labels(&ds, "x").is_empty());
}

#[test]
fn mixed_value_types_stringify() {
    let records = parse_records(MIXED_JSON).unwrap();
    let mut ds = DatasetBuilder::new("stock")
        .fields(&["id", "name", "tags", "stock"])
        .build();
    ds.records = records;

    assert_eq!(labels(&ds, "otc"), vec!["A-1 Paracetamol analgesic,otc 12"]);
    assert_eq!(labels(&ds, "7.5"), vec!["A-3 Amoxicillin antibiotic 7.5"]);
}

// ---------------------------------------------------------------------------
// Rendering + navigation
// ---------------------------------------------------------------------------

#[test]
fn rows_navigate_to_prefixed_id() {
    let ds = DatasetBuilder::new("medicines")
        .route_prefix("/warehouse/medicines")
        .named(&["Lipitor", "Aspirin"])
        .build();
    let mut list = ds.result_list();
    ds.search("LIP", &mut list).unwrap();

    assert_eq!(list.id, "medicines-list");
    let targets: Vec<_> = list.rows().iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["/warehouse/medicines/1"]);
}

#[test]
fn route_prefix_is_not_escaped() {
    let ds = DatasetBuilder::new("odd")
        .route_prefix("/a b")
        .record("x/y", &[("name", json!("thing"))])
        .build();
    let mut list = ds.result_list();
    ds.search("", &mut list).unwrap();
    assert_eq!(list.rows()[0].target, "/a b/x/y");
}

#[test]
fn demo_rows_snapshot() {
    let config = Config::defaults();
    let ds = Dataset::from_config(config.dataset("manufacturers").unwrap()).unwrap();
    let mut list = ds.result_list();
    ds.search("555", &mut list).unwrap();

    let rendered: Vec<String> = list
        .rows()
        .iter()
        .map(|r| format!("{} -> {}", r.label, r.target))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    1 Pfizer 555-0101 -> /warehouse/manufacturers/1
    2 Novartis 555-0102 -> /warehouse/manufacturers/2
    3 Cipla 555-0103 -> /warehouse/manufacturers/3
    4 Sun Pharma 555-0104 -> /warehouse/manufacturers/4
    5 Bayer 555-0105 -> /warehouse/manufacturers/5
    6 Sanofi 555-0106 -> /warehouse/manufacturers/6
    ");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_field_fails_and_keeps_rows() {
    let mut ds = fruit();
    ds.records.push(Record::new().with("id", 8));
    let mut list = ds.result_list();
    ds.search("", &mut list).unwrap();
    let before = list.clone();

    let err = ds.search("a", &mut list).unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field, .. } if field == "name"));
    assert_eq!(list, before);
}

#[test]
fn object_field_is_not_searchable() {
    let ds = DatasetBuilder::new("nested")
        .record(1, &[("name", json!({"first": "a"}))])
        .build();
    let mut list = ds.result_list();
    assert!(matches!(
        ds.search("a", &mut list),
        Err(Error::NotStringifiable { .. })
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec("[a-cA-C]{0,4}", 0..20).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Record::new().with("id", i + 1).with("name", name))
            .collect()
    })
}

proptest! {
    #[test]
    fn empty_query_is_prefix_of_dataset(records in records_strategy()) {
        let fields = vec!["name".to_string()];
        let shown = filter_records(&records, &fields, "").unwrap();
        prop_assert_eq!(shown.len(), records.len().min(EMPTY_QUERY_LIMIT));
        for (shown, original) in shown.iter().zip(&records) {
            prop_assert_eq!(*shown, original);
        }
    }

    #[test]
    fn results_are_ordered_matching_subset(
        records in records_strategy(),
        query in "[a-c]{1,2}",
    ) {
        let fields = vec!["name".to_string()];
        let shown = filter_records(&records, &fields, &query).unwrap();
        prop_assert!(shown.len() <= MATCH_LIMIT);

        let expected: Vec<&Record> = records
            .iter()
            .filter(|r| r.search_text("name").unwrap().to_lowercase().contains(&query))
            .take(MATCH_LIMIT)
            .collect();
        prop_assert_eq!(shown, expected);
    }

    #[test]
    fn refresh_is_idempotent(records in records_strategy(), query in "[a-cA-C]{0,2}") {
        let mut ds = DatasetBuilder::new("p").fields(&["name"]).build();
        ds.records = records;
        let mut once = ResultList::new("p-list");
        ds.search(&query, &mut once).unwrap();
        let mut twice = once.clone();
        ds.search(&query, &mut twice).unwrap();
        prop_assert_eq!(once, twice);
    }
}

//! End-to-end: load a listings file, filter it, select rows, summarise.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::Arc;

use rusty_bnb::data::filter::{filter, neighbourhood_options, EmptySetPolicy, FilterCriteria};
use rusty_bnb::data::loader::load_listings;
use rusty_bnb::data::model::ListingTable;
use rusty_bnb::data::summary::{details, summarize, SummaryError};
use rusty_bnb::state::{AppState, Interaction};

const CSV: &str = "\
id,name,host_id,host_name,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365
1,Cozy room,10,Ann,Brooklyn,Kensington,40.64,-73.97,Private room,50,1,9,2018-10-19,0.21,6,365
2,Midtown flat,20,Bob,Manhattan,Midtown,40.75,-73.98,Entire home/apt,100,2,45,2019-05-21,0.38,2,355
3,Harlem room,30,Cat,Manhattan,Harlem,40.80,-73.94,Private room,150,3,0,,,1,365
";

fn load() -> (tempfile::NamedTempFile, ListingTable) {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    file.write_all(CSV.as_bytes()).expect("write fixture");
    let table = load_listings(file.path()).expect("fixture loads");
    (file, table)
}

fn strings(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Criteria that let every row of the fixture through.
fn open_criteria(table: &ListingTable) -> FilterCriteria {
    let mut criteria = FilterCriteria::new(table);
    criteria.room_types = strings(&["Private room", "Entire home/apt"]);
    criteria.set_neighbourhood_groups(table, strings(&["Brooklyn", "Manhattan"]));
    for n in neighbourhood_options(table, criteria.neighbourhood_groups()) {
        criteria.select_neighbourhood(table, &n);
    }
    criteria
}

#[test]
fn select_all_three_rows() {
    let (_file, table) = load();
    let criteria = open_criteria(&table);
    let view = filter(&table, &criteria, EmptySetPolicy::MatchNone);
    assert_eq!(view.len(), 3);

    let details = details(&table, &view, &BTreeSet::from([1, 2, 3])).unwrap();
    assert_eq!(details.stats.mean_price, 100.0);
    assert_eq!(details.stats.min_minimum_nights, 1);
    assert_eq!(details.cards[0].delta.price_delta, -50.0);
    assert_eq!(details.cards[2].delta.price_delta, 50.0);
    assert_eq!(details.cards[0].delta.nights_delta, 0);
    assert_eq!(details.cards[2].delta.nights_delta, 2);
}

#[test]
fn price_range_keeps_rows_two_and_three_in_order() {
    let (_file, table) = load();
    let mut criteria = open_criteria(&table);
    criteria.set_price_range(100.0, 150.0);
    let view = filter(&table, &criteria, EmptySetPolicy::MatchNone);
    let ids: Vec<u64> = view.rows(&table).map(|l| l.id).collect();
    assert_eq!(ids, [2, 3]);
}

#[test]
fn empty_room_types_yield_no_results() {
    let (_file, table) = load();
    let mut criteria = open_criteria(&table);
    criteria.room_types.clear();
    let view = filter(&table, &criteria, EmptySetPolicy::MatchNone);
    assert!(view.is_empty());

    let mut state = AppState::new(Arc::new(table), EmptySetPolicy::MatchNone);
    for r in ["Private room", "Entire home/apt"] {
        state.toggle_room_type(r);
    }
    state.toggle_neighbourhood_group("Manhattan");
    state.select_all_neighbourhoods();
    assert!(!state.no_results());
    for r in ["Private room", "Entire home/apt"] {
        state.toggle_room_type(r);
    }
    assert!(state.no_results());
}

#[test]
fn details_with_empty_selection_warn_without_stats() {
    let (_file, table) = load();
    let criteria = open_criteria(&table);
    let view = filter(&table, &criteria, EmptySetPolicy::MatchNone);
    assert_eq!(
        details(&table, &view, &BTreeSet::new()),
        Err(SummaryError::EmptySelection)
    );

    let mut state = AppState::new(Arc::new(table), EmptySetPolicy::MatchAll);
    assert_eq!(state.view.len(), 3);
    state.request_details();
    assert_eq!(state.interaction, Interaction::EmptySelectionWarning);
    assert_eq!(state.view.len(), 3);
}

#[test]
fn group_change_recomputes_neighbourhood_options() {
    let (_file, table) = load();
    assert_eq!(
        neighbourhood_options(&table, &strings(&["Manhattan"])),
        ["Midtown", "Harlem"]
    );
    assert_eq!(
        neighbourhood_options(&table, &strings(&["Brooklyn"])),
        ["Kensington"]
    );

    let mut criteria = open_criteria(&table);
    criteria.set_neighbourhood_groups(&table, strings(&["Brooklyn"]));
    assert_eq!(criteria.neighbourhoods(), &strings(&["Kensington"]));
    let view = filter(&table, &criteria, EmptySetPolicy::MatchNone);
    let ids: Vec<u64> = view.rows(&table).map(|l| l.id).collect();
    assert_eq!(ids, [1]);
}

#[test]
fn summary_ignores_selection_order() {
    let (_file, table) = load();
    let rows = table.listings();
    let a = summarize([&rows[2], &rows[0], &rows[1]]).unwrap();
    let b = summarize(rows).unwrap();
    assert_eq!(a, b);
}

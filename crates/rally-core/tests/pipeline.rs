//! End-to-end library flow: CSV → selection → graph.

use rally_core::config::DatasetConfig;
use rally_core::load::load_matches_from_reader;
use rally_core::select::catalog;
use rally_core::{BuildError, MatchRecord, Selection, build_match_graph};

const DATASET: &str = "\
Tournament,Date,Series,Court,Surface,Round,Best of,Player_1,Player_2,Winner,Rank_1,Rank_2
Wimbledon,2023-07-03,Grand Slam,Outdoor,Grass,1st Round,5,A,B,A,1,20
Wimbledon,2023-07-10,Grand Slam,Outdoor,Grass,4th Round,5,B,C,C,20,8
Wimbledon,2022-07-04,Grand Slam,Outdoor,Grass,1st Round,5,A,D,D,2,50
Rome,2023-05-12,Masters 1000,Outdoor,Clay,2nd Round,3,A,C,C,1,8
Rome,2023-05-14,Masters 1000,Outdoor,Clay,3rd Round,3,C,E,C,8,30
";

const CORRUPT: &str = "\
Tournament,Date,Series,Player_1,Player_2,Winner
Wimbledon,2023-07-03,Grand Slam,A,B,A
Wimbledon,2023-07-05,Grand Slam,A,B,D
";

fn load(input: &str) -> Vec<MatchRecord> {
    load_matches_from_reader(input.as_bytes(), &DatasetConfig::default()).expect("load fixture")
}

#[test]
fn tournament_year_selection_builds_expected_graph() {
    let records = load(DATASET);
    let selection = Selection::new(2023).with_tournament("Wimbledon");
    let graph = build_match_graph(selection.filter(&records), selection.year).expect("build");

    assert_eq!(graph.players(), vec!["A", "B", "C"]);
    assert_eq!(graph.edges(), vec![("A", "B"), ("C", "B")]);
}

#[test]
fn year_without_matches_is_empty_not_an_error() {
    let records = load(DATASET);
    let selection = Selection::new(2019).with_tournament("Wimbledon");
    let graph = build_match_graph(selection.filter(&records), selection.year).expect("build");
    assert!(graph.is_empty());
}

#[test]
fn category_selection_spans_tournaments() {
    let records = load(DATASET);
    let selection = Selection::new(2023).with_category("masters 1000");
    let graph = build_match_graph(selection.filter(&records), selection.year).expect("build");
    assert_eq!(graph.edges(), vec![("C", "A"), ("C", "E")]);
}

#[test]
fn whole_year_merges_tournaments() {
    let records = load(DATASET);
    let graph = build_match_graph(&records, 2023).expect("build");
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    let a = graph.node_index("A").expect("A");
    assert_eq!(graph.best_rank(a), Some(1));
}

#[test]
fn corrupt_row_reports_source_line() {
    let records = load(CORRUPT);
    let err = build_match_graph(&records, 2023).expect_err("integrity error");
    let BuildError::DataIntegrity { index, line, winner, .. } = err;
    assert_eq!(index, 1);
    assert_eq!(line, Some(3));
    assert_eq!(winner, "D");
}

#[test]
fn catalog_lists_selectable_values() {
    let records = load(DATASET);
    let catalog = catalog(&records);
    assert_eq!(
        catalog.tournaments.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Rome", "Wimbledon"]
    );
    assert_eq!(
        catalog.categories.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Grand Slam", "Masters 1000"]
    );
    assert!(catalog.tournaments["Wimbledon"].contains(&2022));
    assert!(!catalog.tournaments["Rome"].contains(&2022));
}

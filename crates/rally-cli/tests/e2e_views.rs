//! E2E tests for the graph views: `rally summary`, `matrix`, `diameter`,
//! `density`, `degrees`, `clustering`, `centrality`, `catalog`.
//!
//! Covers: JSON schema of each view, text and pretty renderings, and the
//! empty-selection policy (zero matches is a report, not an error).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/matches.csv");

/// A `rally` command isolated from any real config and pointed at the
/// fixture dataset.
fn rally_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rally"));
    cmd.current_dir(dir);
    cmd.env("RALLY_LOG", "error");
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd.args(["--data", FIXTURE]);
    cmd
}

fn json_of(dir: &Path, args: &[&str]) -> Value {
    let output = rally_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("rally should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

// ---------------------------------------------------------------------------
// rally summary
// ---------------------------------------------------------------------------

#[test]
fn summary_json_for_one_tournament_year() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(dir.path(), &["summary", "--tournament", "Wimbledon", "--year", "2023"]);

    assert_eq!(json["label"], "Wimbledon 2023");
    assert_eq!(json["selection"]["tournament"], "Wimbledon");
    assert_eq!(json["selection"]["year"], 2023);
    assert_eq!(json["node_count"], 6);
    assert_eq!(json["edge_count"], 5);
    assert_eq!(json["weak_component_count"], 1);
    assert_eq!(json["cyclic_component_count"], 0);
    assert!(
        json["content_hash"].as_str().is_some_and(|h| !h.is_empty()),
        "content hash must be present"
    );
}

#[test]
fn summary_text_is_tab_separated() {
    let dir = TempDir::new().expect("temp dir");
    rally_cmd(dir.path())
        .args(["summary", "-t", "wimbledon", "-y", "2023", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("players\t6\n"))
        .stdout(predicate::str::contains("matches\t5\n"))
        .stdout(predicate::str::contains("density\t0.166667\n"));
}

#[test]
fn summary_pretty_has_sections() {
    let dir = TempDir::new().expect("temp dir");
    rally_cmd(dir.path())
        .args(["summary", "-t", "Wimbledon", "-y", "2023", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wimbledon 2023"))
        .stdout(predicate::str::contains("Players:"));
}

#[test]
fn format_env_selects_json() {
    let dir = TempDir::new().expect("temp dir");
    let output = rally_cmd(dir.path())
        .env("FORMAT", "json")
        .args(["summary", "-t", "Wimbledon", "-y", "2022"])
        .output()
        .expect("rally should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["node_count"], 2);
    assert_eq!(json["edge_count"], 1);
}

#[test]
fn same_selection_has_same_hash() {
    let dir = TempDir::new().expect("temp dir");
    let a = json_of(dir.path(), &["summary", "-t", "Wimbledon", "-y", "2023"]);
    let b = json_of(dir.path(), &["summary", "-t", "WIMBLEDON", "-y", "2023"]);
    let other = json_of(dir.path(), &["summary", "-t", "Wimbledon", "-y", "2022"]);
    assert_eq!(a["content_hash"], b["content_hash"]);
    assert_ne!(a["content_hash"], other["content_hash"]);
}

// ---------------------------------------------------------------------------
// Empty selections
// ---------------------------------------------------------------------------

#[test]
fn year_without_matches_gives_empty_reports() {
    let dir = TempDir::new().expect("temp dir");

    let summary = json_of(dir.path(), &["summary", "-t", "Wimbledon", "-y", "2019"]);
    assert_eq!(summary["node_count"], 0);
    assert_eq!(summary["edge_count"], 0);
    assert_eq!(summary["density"], 0.0);

    let diameter = json_of(dir.path(), &["diameter", "-t", "Wimbledon", "-y", "2019"]);
    assert_eq!(diameter["components"], Value::Array(vec![]));

    let centrality = json_of(dir.path(), &["centrality", "-t", "Wimbledon", "-y", "2019"]);
    assert_eq!(centrality["degree"], Value::Array(vec![]));
    assert_eq!(centrality["betweenness"], Value::Array(vec![]));

    let matrix = json_of(dir.path(), &["matrix", "-t", "Wimbledon", "-y", "2019"]);
    assert_eq!(matrix["players"], Value::Array(vec![]));
}

#[test]
fn empty_diameter_text_says_so() {
    let dir = TempDir::new().expect("temp dir");
    rally_cmd(dir.path())
        .args(["diameter", "-t", "Wimbledon", "-y", "2019", "--format", "text"])
        .assert()
        .success()
        .stdout("no connected component\n");
}

// ---------------------------------------------------------------------------
// rally matrix
// ---------------------------------------------------------------------------

#[test]
fn matrix_text_rows_are_winners() {
    let dir = TempDir::new().expect("temp dir");
    rally_cmd(dir.path())
        .args(["matrix", "-t", "Wimbledon", "-y", "2022", "--format", "text"])
        .assert()
        .success()
        .stdout("\tDjokovic N.\tKyrgios N.\nDjokovic N.\t0\t1\nKyrgios N.\t0\t0\n");
}

#[test]
fn matrix_top_keeps_busiest_players() {
    let dir = TempDir::new().expect("temp dir");
    // Alcaraz C. has 3 opponents, Djokovic N. and Medvedev D. 2 each.
    let json = json_of(
        dir.path(),
        &["matrix", "-t", "Wimbledon", "-y", "2023", "--top", "3"],
    );
    assert_eq!(
        json["players"],
        serde_json::json!(["Alcaraz C.", "Djokovic N.", "Medvedev D."])
    );
    assert_eq!(
        json["rows"],
        serde_json::json!([[0, 1, 1], [0, 0, 0], [0, 0, 0]])
    );
}

// ---------------------------------------------------------------------------
// rally diameter / density / degrees
// ---------------------------------------------------------------------------

#[test]
fn diameter_of_category_cycle() {
    let dir = TempDir::new().expect("temp dir");
    // Alcaraz > Struff > Medvedev > Rune > Alcaraz across Madrid and Rome.
    let json = json_of(
        dir.path(),
        &["diameter", "--category", "masters 1000", "--year", "2023"],
    );
    let components = json["components"].as_array().expect("components array");
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["diameter"], 3);
    assert_eq!(components[0]["radius"], 3);
    assert_eq!(
        components[0]["members"],
        serde_json::json!(["Alcaraz C.", "Medvedev D.", "Rune H.", "Struff J.L."])
    );
}

#[test]
fn density_json_has_assortativity_fields() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(dir.path(), &["density", "-t", "Wimbledon", "-y", "2023"]);
    let density = json["density"].as_f64().expect("density");
    assert!((density - 5.0 / 30.0).abs() < 1e-9, "density = {density}");
    assert!(json.get("rank_group_assortativity").is_some());
    assert!(json.get("degree_assortativity").is_some());
}

#[test]
fn degrees_histograms_count_players() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(dir.path(), &["degrees", "-t", "Wimbledon", "-y", "2023"]);
    // Losses: Alcaraz 0, every other player 1.
    assert_eq!(json["in_degree"], serde_json::json!([1, 5]));
    // Wins: four players 0, Djokovic and Medvedev 1, Alcaraz 3.
    assert_eq!(json["out_degree"], serde_json::json!([3, 2, 0, 1]));
}

// ---------------------------------------------------------------------------
// rally clustering / centrality
// ---------------------------------------------------------------------------

#[test]
fn clustering_reports_components_and_local_values() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(
        dir.path(),
        &[
            "clustering",
            "-t",
            "Wimbledon",
            "-y",
            "2023",
            "--player",
            "Alcaraz C.",
            "--player",
            "Federer R.",
        ],
    );
    assert_eq!(json["average_clustering"], 0.0);
    assert_eq!(json["weakly_connected"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["strongly_connected"].as_array().map(Vec::len), Some(6));
    assert_eq!(json["local"][0]["player"], "Alcaraz C.");
    assert_eq!(json["local"][0]["clustering"], 0.0);
    assert_eq!(json["local"][1]["player"], "Federer R.");
    assert!(json["local"][1]["clustering"].is_null());
}

#[test]
fn centrality_ranks_the_champion_first() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(
        dir.path(),
        &["centrality", "-t", "Wimbledon", "-y", "2023", "--top", "3"],
    );
    assert_eq!(json["top"], 3);
    let degree = json["degree"].as_array().expect("degree ranking");
    assert_eq!(degree.len(), 3);
    assert_eq!(degree[0]["player"], "Alcaraz C.");
    let score = degree[0]["score"].as_f64().expect("score");
    assert!((score - 0.6).abs() < 1e-9, "score = {score}");
    assert!(json.get("eigenvector").is_some());
}

#[test]
fn centrality_text_has_one_row_per_entry() {
    let dir = TempDir::new().expect("temp dir");
    rally_cmd(dir.path())
        .args(["centrality", "-t", "Wimbledon", "-y", "2022", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("measure\trank\tplayer\tscore\n"))
        .stdout(predicate::str::contains("degree\t1\tDjokovic N.\t1.000000\n"));
}

// ---------------------------------------------------------------------------
// rally catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_lists_tournaments_categories_and_years() {
    let dir = TempDir::new().expect("temp dir");
    let json = json_of(dir.path(), &["catalog"]);
    assert_eq!(json["tournaments"]["Wimbledon"], serde_json::json!([2022, 2023]));
    assert_eq!(json["tournaments"]["Rome"], serde_json::json!([2023]));
    assert_eq!(json["categories"]["Masters 1000"], serde_json::json!([2023]));
    assert_eq!(json["years"], serde_json::json!([2022, 2023]));
    assert_eq!(json["undated"], 0);
}

#[test]
fn dataset_path_can_come_from_project_config() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("rally.toml"),
        format!("[dataset]\npath = {FIXTURE:?}\n"),
    )
    .expect("write rally.toml");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rally"));
    cmd.current_dir(dir.path())
        .env("RALLY_LOG", "error")
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("FORMAT")
        .args(["catalog", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tournament\tWimbledon\t2022,2023\n"))
        .stdout(predicate::str::contains("years\t2022,2023\n"));
}

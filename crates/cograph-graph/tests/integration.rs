//! End-to-end checks: change set -> multigraph -> centrality report.

use std::collections::HashSet;

use cograph_core::ChangeRecord;
use cograph_graph::centrality::{compute_centralities, CentralityOptions};
use cograph_graph::graph::{ChangeGraph, EdgeKind};
use cograph_graph::analyze_changes;

fn change_set(records: &[(&str, &str, &str)]) -> HashSet<ChangeRecord> {
    records
        .iter()
        .map(|&(c, f, m)| ChangeRecord::new(c, f, m))
        .collect()
}

#[test]
fn empty_history_yields_empty_report() {
    let report = analyze_changes(&HashSet::new(), &CentralityOptions::default());
    assert!(report.page_rank.is_empty());
    assert!(report.closeness.is_empty());
    assert!(report.common_neighbor.is_empty());
}

#[test]
fn single_change_yields_single_isolated_node() {
    let changes = change_set(&[("A", "x.py", "f1")]);

    let graph = ChangeGraph::build(&changes);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);

    let report = compute_centralities(&graph, &CentralityOptions::default());
    assert!((report.page_rank["x.py-f1"] - 1.0).abs() < 1e-9);
    assert_eq!(report.closeness["x.py-f1"], 0.0);
    assert_eq!(report.common_neighbor["x.py-f1"], 0.0);
}

#[test]
fn co_committed_functions_with_recurring_edits() {
    // Commit A changes f1 and f2 in x.py; commit B changes only f1.
    let changes = change_set(&[("A", "x.py", "f1"), ("A", "x.py", "f2"), ("B", "x.py", "f1")]);

    let graph = ChangeGraph::build(&changes);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.count_edges(EdgeKind::CoCommit), 2);
    assert_eq!(graph.count_edges(EdgeKind::Recurrence), 2);

    let report = compute_centralities(&graph, &CentralityOptions::default());
    // The recurring function outranks its one-time co-change partner.
    assert!(report.page_rank["x.py-f1"] >= report.page_rank["x.py-f2"]);

    let total: f64 = report.page_rank.values().sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn all_scores_are_finite_and_non_negative() {
    let changes = change_set(&[
        ("A", "auth.rs", "login"),
        ("A", "auth.rs", "logout"),
        ("A", "session.rs", "create"),
        ("B", "auth.rs", "login"),
        ("B", "session.rs", "create"),
        ("C", "auth.rs", "login"),
        ("C", "db.rs", "connect"),
        ("D", "util.rs", "helper"),
    ]);

    let report = analyze_changes(&changes, &CentralityOptions::default());
    for map in [&report.page_rank, &report.closeness, &report.common_neighbor] {
        assert_eq!(map.len(), 5);
        for (key, score) in map {
            assert!(score.is_finite(), "{key} not finite");
            assert!(*score >= 0.0, "{key} negative");
        }
    }

    let total: f64 = report.page_rank.values().sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn frequently_recurring_function_is_most_central() {
    // login is touched in every commit and pairs with everything else.
    let changes = change_set(&[
        ("A", "auth.rs", "login"),
        ("A", "auth.rs", "logout"),
        ("B", "auth.rs", "login"),
        ("B", "session.rs", "create"),
        ("C", "auth.rs", "login"),
        ("C", "db.rs", "connect"),
    ]);

    let report = analyze_changes(&changes, &CentralityOptions::default());
    let login = report.page_rank["auth.rs-login"];
    for key in ["auth.rs-logout", "session.rs-create", "db.rs-connect"] {
        assert!(login > report.page_rank[key], "login should outrank {key}");
    }
    let login_closeness = report.closeness["auth.rs-login"];
    for key in ["auth.rs-logout", "session.rs-create", "db.rs-connect"] {
        assert!(login_closeness > report.closeness[key]);
    }
}

#[test]
fn dedup_makes_input_order_irrelevant() {
    let forward = change_set(&[("A", "x.py", "f1"), ("A", "x.py", "f2"), ("B", "x.py", "f1")]);
    let reversed = change_set(&[("B", "x.py", "f1"), ("A", "x.py", "f2"), ("A", "x.py", "f1")]);

    let a = analyze_changes(&forward, &CentralityOptions::default());
    let b = analyze_changes(&reversed, &CentralityOptions::default());

    for (key, score) in &a.page_rank {
        assert!((score - b.page_rank[key]).abs() < 1e-12);
    }
    for (key, score) in &a.closeness {
        assert!((score - b.closeness[key]).abs() < 1e-12);
    }
    for (key, score) in &a.common_neighbor {
        assert!((score - b.common_neighbor[key]).abs() < 1e-12);
    }
}

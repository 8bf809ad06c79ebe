//! Common-neighbor centrality (CCPA, Jin et al.).
//!
//! For each unordered pair of distinct nodes with a finite shortest-path
//! distance, blends shared-neighbor count with inverse distance:
//!
//! ```text
//! score(u, v) = α · |N(u) ∩ N(v)| + (1 − α) · |V| / d(u, v)
//! ```
//!
//! Unreachable pairs contribute nothing. The per-node map is the mean of a
//! node's pair scores; nodes in no finite pair score 0.

use std::collections::{HashMap, HashSet};

use crate::centrality::closeness::bfs_distances;
use crate::centrality::CentralityOptions;
use crate::graph::ChangeGraph;

/// Compute per-node common-neighbor centrality keyed by node key.
///
/// α (default 0.8) weights shared-neighbor count against inverse distance.
/// An empty graph yields an empty map.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::centrality::{common_neighbor::common_neighbor_centrality, CentralityOptions};
/// use cograph_graph::graph::ChangeGraph;
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// changes.insert(ChangeRecord::new("A", "x.py", "f2"));
/// let graph = ChangeGraph::build(&changes);
///
/// let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
/// // No shared neighbors, distance 1: 0.8·0 + 0.2·(2/1) = 0.4.
/// assert!((scores["x.py-f1"] - 0.4).abs() < 1e-9);
/// ```
pub fn common_neighbor_centrality(
    graph: &ChangeGraph,
    options: &CentralityOptions,
) -> HashMap<String, f64> {
    let n = graph.node_count();
    let keys = graph.node_keys();
    let neighbors = graph.simple_neighbors();
    let neighbor_sets: Vec<HashSet<usize>> = neighbors
        .iter()
        .map(|list| list.iter().copied().collect())
        .collect();

    let alpha = options.alpha;
    let n_f64 = n as f64;

    let mut sums = vec![0.0; n];
    let mut counts = vec![0usize; n];

    for u in 0..n {
        let distances = bfs_distances(&neighbors, u);
        for v in (u + 1)..n {
            let Some(distance) = distances[v] else {
                continue;
            };
            let shared = neighbor_sets[u].intersection(&neighbor_sets[v]).count();
            let score = alpha * shared as f64 + (1.0 - alpha) * (n_f64 / distance as f64);
            sums[u] += score;
            counts[u] += 1;
            sums[v] += score;
            counts[v] += 1;
        }
    }

    (0..n)
        .map(|u| {
            let mean = if counts[u] > 0 {
                sums[u] / counts[u] as f64
            } else {
                0.0
            };
            (keys[u].to_string(), mean)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet as StdHashSet;

    use cograph_core::ChangeRecord;

    fn build(records: &[(&str, &str, &str)]) -> ChangeGraph {
        let changes: StdHashSet<ChangeRecord> = records
            .iter()
            .map(|&(c, f, m)| ChangeRecord::new(c, f, m))
            .collect();
        ChangeGraph::build(&changes)
    }

    #[test]
    fn empty_graph_gives_empty_map() {
        let graph = ChangeGraph::build(&StdHashSet::new());
        let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
        assert!(scores.is_empty());
    }

    #[test]
    fn isolated_node_scores_zero() {
        let graph = build(&[("A", "x.py", "f1")]);
        let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
        assert_eq!(scores["x.py-f1"], 0.0);
    }

    #[test]
    fn adjacent_pair_without_shared_neighbors() {
        let graph = build(&[("A", "x.py", "f1"), ("A", "x.py", "f2")]);
        let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
        // 0.8·0 + 0.2·(2/1) = 0.4 for the single pair.
        assert!((scores["x.py-f1"] - 0.4).abs() < 1e-9);
        assert!((scores["x.py-f2"] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn shared_neighbors_dominate_with_default_alpha() {
        // Triangle a-b-c: each pair shares exactly one neighbor.
        let graph = build(&[("A", "m.py", "a"), ("A", "m.py", "b"), ("A", "m.py", "c")]);
        let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
        // Each pair: 0.8·1 + 0.2·(3/1) = 1.4; mean over two pairs per node.
        for key in ["m.py-a", "m.py-b", "m.py-c"] {
            assert!((scores[key] - 1.4).abs() < 1e-9, "{key}");
        }
    }

    #[test]
    fn unreachable_pairs_are_excluded() {
        // Two detached pairs; cross-component pairs contribute nothing.
        let graph = build(&[
            ("A", "m.py", "a"),
            ("A", "m.py", "b"),
            ("B", "n.py", "x"),
            ("B", "n.py", "y"),
        ]);
        let scores = common_neighbor_centrality(&graph, &CentralityOptions::default());
        // Within each pair: 0.8·0 + 0.2·(4/1) = 0.8, and it is the only
        // finite pair for each node.
        for key in ["m.py-a", "m.py-b", "n.py-x", "n.py-y"] {
            assert!((scores[key] - 0.8).abs() < 1e-9, "{key}");
        }
    }

    #[test]
    fn alpha_shifts_the_blend() {
        let graph = build(&[("A", "x.py", "f1"), ("A", "x.py", "f2")]);
        let distance_only = CentralityOptions {
            alpha: 0.0,
            ..CentralityOptions::default()
        };
        let scores = common_neighbor_centrality(&graph, &distance_only);
        // Pure inverse-distance term: |V|/d = 2.
        assert!((scores["x.py-f1"] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scores_are_finite_and_non_negative() {
        let graph = build(&[
            ("A", "x.py", "f1"),
            ("A", "x.py", "f2"),
            ("B", "x.py", "f1"),
            ("B", "y.py", "g"),
            ("C", "z.py", "solo"),
        ]);
        for (key, score) in common_neighbor_centrality(&graph, &CentralityOptions::default()) {
            assert!(score.is_finite(), "{key} score not finite");
            assert!(score >= 0.0, "{key} score negative");
        }
    }
}

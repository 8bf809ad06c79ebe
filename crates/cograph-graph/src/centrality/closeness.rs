//! Closeness centrality with Wasserman–Faust component scaling.
//!
//! Distances are shortest paths over the simple (deduplicated) adjacency:
//! parallel edges do not shorten paths, only the existence of at least one
//! edge matters. Scores of nodes in small disconnected components are
//! penalized by the reachable-fraction factor.

use std::collections::{HashMap, VecDeque};

use crate::graph::ChangeGraph;

/// Compute closeness centrality scores keyed by node key.
///
/// For a node reaching r−1 others with total distance Σd the score is
/// `((r−1)/(|V|−1)) · ((r−1)/Σd)`; unreachable nodes are excluded from the
/// sum, and a node with no reachable peers scores 0. An empty graph yields
/// an empty map.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::centrality::closeness::closeness_centrality;
/// use cograph_graph::graph::ChangeGraph;
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// changes.insert(ChangeRecord::new("A", "x.py", "f2"));
/// let graph = ChangeGraph::build(&changes);
///
/// let scores = closeness_centrality(&graph);
/// assert!((scores["x.py-f1"] - 1.0).abs() < 1e-9);
/// ```
pub fn closeness_centrality(graph: &ChangeGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let neighbors = graph.simple_neighbors();
    let keys = graph.node_keys();

    let mut scores = HashMap::with_capacity(n);
    for source in 0..n {
        let distances = bfs_distances(&neighbors, source);
        let reachable = distances.iter().filter(|d| d.is_some()).count();
        let total: u64 = distances.iter().flatten().map(|&d| d as u64).sum();

        let score = if reachable > 1 && n > 1 {
            let r = (reachable - 1) as f64;
            (r / (n - 1) as f64) * (r / total as f64)
        } else {
            0.0
        };
        scores.insert(keys[source].to_string(), score);
    }
    scores
}

/// BFS distances from `source`; `None` marks unreachable nodes. The source
/// itself is at distance 0 and counts as reachable.
pub(crate) fn bfs_distances(neighbors: &[Vec<usize>], source: usize) -> Vec<Option<u32>> {
    let mut distances = vec![None; neighbors.len()];
    distances[source] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back((source, 0u32));

    while let Some((u, dist)) = queue.pop_front() {
        for &v in &neighbors[u] {
            if distances[v].is_none() {
                distances[v] = Some(dist + 1);
                queue.push_back((v, dist + 1));
            }
        }
    }
    distances
}

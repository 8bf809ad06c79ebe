//! PageRank over the undirected co-change multigraph.
//!
//! Power iteration on the edge-multiplicity-weighted adjacency: a node
//! connected by k parallel edges to a neighbor sends it k times the flow of
//! a single edge. Rank mass of dangling (isolated) nodes is redistributed
//! uniformly, so scores always sum to 1 and a lone node scores 1.0.

use std::collections::HashMap;

use crate::centrality::CentralityOptions;
use crate::graph::ChangeGraph;

/// Compute PageRank scores keyed by node key.
///
/// Iterates until the L1 rank delta drops below `|V| · tolerance` or
/// `max_iterations` is reached; hitting the bound returns the current
/// estimate rather than failing. An empty graph yields an empty map.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::centrality::{pagerank::page_rank, CentralityOptions};
/// use cograph_graph::graph::ChangeGraph;
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// let graph = ChangeGraph::build(&changes);
///
/// let scores = page_rank(&graph, &CentralityOptions::default());
/// assert!((scores["x.py-f1"] - 1.0).abs() < 1e-9);
/// ```
pub fn page_rank(graph: &ChangeGraph, options: &CentralityOptions) -> HashMap<String, f64> {
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let d = options.damping;
    let n_f64 = n as f64;
    let base = (1.0 - d) / n_f64;

    let adjacency = graph.weighted_adjacency();
    let degrees: Vec<f64> = adjacency.iter().map(|row| row.values().sum()).collect();

    let mut ranks = vec![1.0 / n_f64; n];

    for _ in 0..options.max_iterations {
        let dangling_mass: f64 = (0..n)
            .filter(|&u| degrees[u] == 0.0)
            .map(|u| ranks[u])
            .sum();

        let mut new_ranks = vec![base + d * dangling_mass / n_f64; n];

        for u in 0..n {
            if degrees[u] == 0.0 {
                continue;
            }
            let outflow = d * ranks[u] / degrees[u];
            for (&v, &weight) in &adjacency[u] {
                new_ranks[v] += outflow * weight;
            }
        }

        let err: f64 = new_ranks
            .iter()
            .zip(&ranks)
            .map(|(new, old)| (new - old).abs())
            .sum();
        ranks = new_ranks;

        if err < n_f64 * options.tolerance {
            break;
        }
    }

    graph
        .node_keys()
        .into_iter()
        .zip(ranks)
        .map(|(key, rank)| (key.to_string(), rank))
        .collect()
}

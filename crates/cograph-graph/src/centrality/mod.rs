//! Centrality metrics over the co-change multigraph.
//!
//! Three metrics, each answering a different question about a function's
//! place in the change history:
//!
//! - **PageRank** (`pagerank`): which functions sit at the center of
//!   co-change flow, weighted by how often relationships recur?
//! - **Closeness** (`closeness`): which functions are few co-change hops
//!   away from everything else?
//! - **Common-neighbor centrality** (`common_neighbor`): which functions
//!   share many co-change partners with the rest of the graph?
//!
//! All metrics read the built [`ChangeGraph`] without mutating it and may
//! run in any order.

pub mod closeness;
pub mod common_neighbor;
pub mod pagerank;

use std::collections::HashMap;

use cograph_core::CentralityConfig;
use serde::Serialize;

use crate::graph::ChangeGraph;

/// Tuning knobs for the centrality engine.
///
/// # Examples
///
/// ```
/// use cograph_graph::centrality::CentralityOptions;
///
/// let opts = CentralityOptions::default();
/// assert_eq!(opts.alpha, 0.8);
/// assert_eq!(opts.damping, 0.85);
/// assert_eq!(opts.max_iterations, 100);
/// ```
#[derive(Debug, Clone)]
pub struct CentralityOptions {
    /// Common-neighbor blend between shared-neighbor count and inverse
    /// distance (default: 0.8).
    pub alpha: f64,
    /// PageRank damping factor (default: 0.85).
    pub damping: f64,
    /// PageRank iteration bound (default: 100).
    pub max_iterations: usize,
    /// PageRank convergence tolerance, scaled by node count (default: 1e-6).
    pub tolerance: f64,
}

impl Default for CentralityOptions {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl From<&CentralityConfig> for CentralityOptions {
    fn from(config: &CentralityConfig) -> Self {
        Self {
            alpha: config.alpha,
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// Per-node scores for all three centrality metrics.
///
/// Each map is keyed by the `"{file}-{function}"` node key.
///
/// # Examples
///
/// ```
/// use cograph_graph::centrality::CentralityReport;
///
/// let report = CentralityReport::default();
/// assert!(report.page_rank.is_empty());
/// assert!(report.closeness.is_empty());
/// assert!(report.common_neighbor.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct CentralityReport {
    /// PageRank scores; sum to 1 across all nodes.
    pub page_rank: HashMap<String, f64>,
    /// Wasserman–Faust closeness scores.
    pub closeness: HashMap<String, f64>,
    /// Per-node common-neighbor (CCPA) scores.
    pub common_neighbor: HashMap<String, f64>,
}

/// Run all three centrality metrics over a built graph.
///
/// An empty graph yields a report with three empty maps.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::centrality::{compute_centralities, CentralityOptions};
/// use cograph_graph::graph::ChangeGraph;
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// changes.insert(ChangeRecord::new("A", "x.py", "f2"));
/// let graph = ChangeGraph::build(&changes);
///
/// let report = compute_centralities(&graph, &CentralityOptions::default());
/// assert_eq!(report.page_rank.len(), 2);
/// ```
pub fn compute_centralities(
    graph: &ChangeGraph,
    options: &CentralityOptions,
) -> CentralityReport {
    CentralityReport {
        page_rank: pagerank::page_rank(graph, options),
        closeness: closeness::closeness_centrality(graph),
        common_neighbor: common_neighbor::common_neighbor_centrality(graph, options),
    }
}

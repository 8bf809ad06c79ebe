//! Co-change graph construction and centrality analysis.
//!
//! Turns a deduplicated set of [`cograph_core::ChangeRecord`]s into a
//! colored multigraph over (file, function) nodes via petgraph, then ranks
//! the nodes with PageRank, closeness centrality, and common-neighbor
//! centrality.

pub mod centrality;
pub mod graph;

use std::collections::HashSet;

use cograph_core::ChangeRecord;

use centrality::{CentralityOptions, CentralityReport};
use graph::ChangeGraph;

/// Build the co-change graph from a change set and rank its nodes.
///
/// Convenience wrapper over [`ChangeGraph::build`] and
/// [`centrality::compute_centralities`]. An empty change set yields an
/// empty report.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::{analyze_changes, centrality::CentralityOptions};
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// changes.insert(ChangeRecord::new("A", "x.py", "f2"));
/// changes.insert(ChangeRecord::new("B", "x.py", "f1"));
///
/// let report = analyze_changes(&changes, &CentralityOptions::default());
/// assert!(report.page_rank["x.py-f1"] > report.page_rank["x.py-f2"]);
/// ```
pub fn analyze_changes(
    changes: &HashSet<ChangeRecord>,
    options: &CentralityOptions,
) -> CentralityReport {
    let graph = ChangeGraph::build(changes);
    centrality::compute_centralities(&graph, options)
}

//! Co-change multigraph construction.
//!
//! Nodes are (file, function) pairs keyed as `"{file}-{function}"`. Edges
//! are undirected, parallel edges are meaningful, and each edge carries an
//! [`EdgeKind`]: functions modified together in one commit (`CoCommit`) or
//! one function modified in more than one commit (`Recurrence`, a
//! self-loop).

use std::collections::{HashMap, HashSet};

use cograph_core::ChangeRecord;
use petgraph::graph::{NodeIndex, UnGraph};

/// Relationship kind carried by each edge.
///
/// # Examples
///
/// ```
/// use cograph_graph::graph::EdgeKind;
///
/// assert_ne!(EdgeKind::CoCommit, EdgeKind::Recurrence);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Two different functions modified in the same commit.
    CoCommit,
    /// The same function modified in two different commits (self-loop).
    Recurrence,
}

/// The co-change multigraph over (file, function) nodes.
///
/// Built once from a deduplicated change set and read-only afterwards.
/// Edge generation follows ordered-pair semantics: every qualifying ordered
/// pair of distinct records contributes one edge, so an unordered co-commit
/// pair yields two parallel edges and a node touched by k commits carries
/// k·(k−1) recurrence self-loops.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
/// use cograph_graph::graph::{ChangeGraph, EdgeKind};
///
/// let mut changes = HashSet::new();
/// changes.insert(ChangeRecord::new("A", "x.py", "f1"));
/// changes.insert(ChangeRecord::new("A", "x.py", "f2"));
/// changes.insert(ChangeRecord::new("B", "x.py", "f1"));
///
/// let graph = ChangeGraph::build(&changes);
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.count_edges(EdgeKind::CoCommit), 2);
/// assert_eq!(graph.count_edges(EdgeKind::Recurrence), 2);
/// ```
pub struct ChangeGraph {
    graph: UnGraph<String, EdgeKind>,
    key_to_index: HashMap<String, NodeIndex>,
}

impl ChangeGraph {
    /// Build the multigraph from a deduplicated change set.
    ///
    /// Records are grouped by commit (co-commit edges) and by node key
    /// (recurrence self-loops); the resulting edge multiset equals the
    /// brute-force scan over all ordered pairs of distinct records.
    pub fn build(changes: &HashSet<ChangeRecord>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut key_to_index: HashMap<String, NodeIndex> = HashMap::new();

        // Sort for reproducible node numbering; set iteration order is not.
        let mut records: Vec<&ChangeRecord> = changes.iter().collect();
        records.sort_by_key(|&r| (&r.file, &r.function, &r.commit));

        for record in &records {
            let key = record.node_key();
            key_to_index
                .entry(key.clone())
                .or_insert_with(|| graph.add_node(key));
        }

        // Co-commit: every ordered pair of distinct records sharing a commit.
        // Within one commit all records have distinct (file, function), so
        // these edges never self-loop.
        let mut by_commit: HashMap<&str, Vec<NodeIndex>> = HashMap::new();
        for record in &records {
            by_commit
                .entry(record.commit.as_str())
                .or_default()
                .push(key_to_index[&record.node_key()]);
        }
        for group in by_commit.values() {
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    // One edge per ordered pair: (i,j) and (j,i).
                    graph.add_edge(group[i], group[j], EdgeKind::CoCommit);
                    graph.add_edge(group[j], group[i], EdgeKind::CoCommit);
                }
            }
        }

        // Recurrence: every ordered pair of records on the same node, which
        // necessarily come from different commits.
        let mut by_node: HashMap<String, usize> = HashMap::new();
        for record in &records {
            *by_node.entry(record.node_key()).or_default() += 1;
        }
        for (key, &k) in &by_node {
            let idx = key_to_index[key];
            for _ in 0..k * (k - 1) {
                graph.add_edge(idx, idx, EdgeKind::Recurrence);
            }
        }

        Self {
            graph,
            key_to_index,
        }
    }

    /// Number of nodes — distinct (file, function) pairs in the change set.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Total number of edges including parallel edges and self-loops.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of edges of the given kind.
    pub fn count_edges(&self, kind: EdgeKind) -> usize {
        self.graph.edge_weights().filter(|&&k| k == kind).count()
    }

    /// Node keys in node-index order.
    pub fn node_keys(&self) -> Vec<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    /// Node index of a key, if present.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.key_to_index.get(key).map(|idx| idx.index())
    }

    /// Weighted adjacency: per node, neighbor index → parallel-edge count.
    ///
    /// Self-loops appear once per parallel edge at `adjacency[u][u]`. Feeds
    /// PageRank, where a node connected by k parallel edges receives k times
    /// the flow of a single edge.
    pub fn weighted_adjacency(&self) -> Vec<HashMap<usize, f64>> {
        let mut adjacency = vec![HashMap::new(); self.graph.node_count()];
        for edge in self.graph.edge_indices() {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let (a, b) = (a.index(), b.index());
            if a == b {
                *adjacency[a].entry(a).or_insert(0.0) += 1.0;
            } else {
                *adjacency[a].entry(b).or_insert(0.0) += 1.0;
                *adjacency[b].entry(a).or_insert(0.0) += 1.0;
            }
        }
        adjacency
    }

    /// Simple-graph neighbor lists: deduplicated, self-loops excluded,
    /// sorted for determinism.
    ///
    /// Path-based metrics use these — parallel edges do not shorten paths,
    /// only the existence of at least one edge matters.
    pub fn simple_neighbors(&self) -> Vec<Vec<usize>> {
        let mut sets = vec![HashSet::new(); self.graph.node_count()];
        for edge in self.graph.edge_indices() {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let (a, b) = (a.index(), b.index());
            if a != b {
                sets[a].insert(b);
                sets[b].insert(a);
            }
        }
        sets.into_iter()
            .map(|set| {
                let mut neighbors: Vec<usize> = set.into_iter().collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect()
    }
}

//! Co-participation graph construction
//!
//! Transforms interaction records into an undirected simple graph:
//! two users are connected iff they commented on the same issue at
//! least once. Degree-0 nodes are pruned when the graph is frozen.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use crate::domain::{InteractionRecord, StakeholderGraph};

/// Builder for [`StakeholderGraph`]
///
/// The only way to construct a graph. `add_edge` is idempotent and
/// rejects self-loops; `freeze` prunes isolated nodes and returns the
/// immutable graph value.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: UnGraph<String, ()>,
    user_to_node: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            user_to_node: HashMap::new(),
        }
    }

    fn intern(&mut self, user_id: &str) -> NodeIndex {
        if let Some(&idx) = self.user_to_node.get(user_id) {
            return idx;
        }
        let idx = self.graph.add_node(user_id.to_owned());
        self.user_to_node.insert(user_id.to_owned(), idx);
        idx
    }

    /// Connect two users. Self-loops are skipped; duplicate edges are
    /// idempotent (the graph stays simple, not multi-).
    pub fn add_edge(&mut self, u: &str, v: &str) {
        if u == v {
            return;
        }
        let a = self.intern(u);
        let b = self.intern(v);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Prune isolated nodes and return the frozen graph
    ///
    /// Node and edge insertion order is preserved for the surviving
    /// nodes, so downstream iteration is deterministic.
    pub fn freeze(self) -> StakeholderGraph {
        use petgraph::visit::EdgeRef;

        let isolated: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .collect();

        let (graph, user_to_node) = if isolated.is_empty() {
            (self.graph, self.user_to_node)
        } else {
            // Rebuild rather than remove_node, which renumbers indices
            let mut pruned: UnGraph<String, ()> = UnGraph::default();
            let mut users = HashMap::new();
            let mut remap = HashMap::new();
            for idx in self.graph.node_indices() {
                if self.graph.neighbors(idx).next().is_some() {
                    let new_idx = pruned.add_node(self.graph[idx].clone());
                    users.insert(self.graph[idx].clone(), new_idx);
                    remap.insert(idx, new_idx);
                }
            }
            for edge in self.graph.edge_references() {
                pruned.add_edge(remap[&edge.source()], remap[&edge.target()], ());
            }
            (pruned, users)
        };

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pruned = isolated.len(),
            "froze stakeholder graph"
        );
        StakeholderGraph::from_parts(graph, user_to_node)
    }
}

/// Build a stakeholder graph from interaction records
///
/// Records are grouped by issue number; within each issue the distinct
/// users (first-seen order) are pairwise connected. Zero records
/// produce an empty graph; downstream statistics treat that as
/// undefined rather than raising.
pub fn build_network(records: &[InteractionRecord]) -> StakeholderGraph {
    // BTreeMap keeps issue iteration order deterministic
    let mut issues: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
    for record in records {
        issues
            .entry(record.issue_number)
            .or_default()
            .push(&record.user_id);
    }

    let mut builder = GraphBuilder::new();
    for users in issues.values() {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for &user in users {
            if seen.insert(user) {
                distinct.push(user);
            }
        }
        for i in 0..distinct.len() {
            for j in (i + 1)..distinct.len() {
                builder.add_edge(distinct[i], distinct[j]);
            }
        }
    }
    builder.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(issue: i64, user: &str) -> InteractionRecord {
        InteractionRecord::new("acme", "widgets", issue, user)
    }

    #[test]
    fn test_build_network_co_participation() {
        // Issue 1 = {A, B, C}, issue 2 = {C, D}
        let records = vec![
            record(1, "A"),
            record(1, "B"),
            record(1, "C"),
            record(2, "C"),
            record(2, "D"),
        ];

        let graph = build_network(&records);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.contains_edge("A", "B"));
        assert!(graph.contains_edge("A", "C"));
        assert!(graph.contains_edge("B", "C"));
        assert!(graph.contains_edge("C", "D"));
        assert!(!graph.contains_edge("A", "D"));
    }

    #[test]
    fn test_build_network_empty() {
        let graph = build_network(&[]);

        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_build_network_single_user_issue_adds_nothing() {
        // One user talking to themselves creates no edges, hence no nodes
        let records = vec![record(1, "A"), record(1, "A"), record(2, "B")];

        let graph = build_network(&records);

        assert!(graph.is_empty());
    }

    #[test]
    fn test_build_network_duplicate_comments_idempotent() {
        let records = vec![
            record(1, "A"),
            record(1, "B"),
            record(1, "A"),
            record(2, "A"),
            record(2, "B"),
        ];

        let graph = build_network(&records);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_builder_rejects_self_loop() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("a", "a");
        let graph = builder.freeze();

        assert!(graph.is_empty());
    }

    #[test]
    fn test_builder_no_isolates_after_freeze() {
        let mut builder = GraphBuilder::new();
        builder.add_edge("a", "b");
        builder.add_edge("c", "d");
        let graph = builder.freeze();

        for degree in graph.degrees() {
            assert!(degree > 0);
        }
    }

    #[test]
    fn test_build_network_deterministic() {
        let records = vec![
            record(2, "C"),
            record(2, "D"),
            record(1, "A"),
            record(1, "B"),
            record(1, "C"),
        ];

        let first = build_network(&records);
        let second = build_network(&records);

        let first_users: Vec<&str> = first.users().collect();
        let second_users: Vec<&str> = second.users().collect();
        assert_eq!(first_users, second_users);
        assert_eq!(first.edges(), second.edges());
    }
}

//! Domain models for stakeholder-network analytics
//!
//! # Models
//!
//! - `InteractionRecord`: one user's comment on one issue
//! - `StakeholderGraph`: frozen co-participation graph (build-then-freeze)
//! - `GraphData`: serializable edge-list form of a graph
//! - `NetworkStatistics`: immutable derived statistics snapshot
//!
//! A `StakeholderGraph` can only be created through
//! [`crate::network::GraphBuilder`]; once frozen it never changes.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

/// One user's comment on one issue
///
/// Source of truth is the external event log (`issue_comments` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Organization that owns the package
    pub organization: String,
    /// Package the issue belongs to
    pub package: String,
    /// Issue number within the package
    pub issue_number: i64,
    /// Commenting user
    pub user_id: String,
}

impl InteractionRecord {
    pub fn new(
        organization: impl Into<String>,
        package: impl Into<String>,
        issue_number: i64,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            package: package.into(),
            issue_number,
            user_id: user_id.into(),
        }
    }
}

/// Undirected simple co-participation graph over user ids
///
/// Nodes are user identifiers; an edge (u, v) exists iff u and v both
/// commented on the same issue at least once. Invariants held after
/// freezing:
///
/// - no self-loops
/// - no parallel edges
/// - no isolated nodes
///
/// Constructed only via [`crate::network::GraphBuilder`]; immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct StakeholderGraph {
    graph: UnGraph<String, ()>,
    user_to_node: HashMap<String, NodeIndex>,
}

impl StakeholderGraph {
    /// Invariants are the builder's responsibility.
    pub(crate) fn from_parts(
        graph: UnGraph<String, ()>,
        user_to_node: HashMap<String, NodeIndex>,
    ) -> Self {
        Self {
            graph,
            user_to_node,
        }
    }

    /// Underlying petgraph storage (read-only)
    pub fn as_graph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Users in node insertion order (deterministic)
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_to_node.contains_key(user_id)
    }

    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        match (self.user_to_node.get(u), self.user_to_node.get(v)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Degree of a user, or None for an unknown user
    pub fn degree(&self, user_id: &str) -> Option<usize> {
        let &idx = self.user_to_node.get(user_id)?;
        Some(self.graph.neighbors(idx).count())
    }

    /// Degree sequence in node insertion order
    pub fn degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|idx| self.graph.neighbors(idx).count())
            .collect()
    }

    /// Edge list over user ids, in edge insertion order
    pub fn edges(&self) -> Vec<(String, String)> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect()
    }

    /// Serializable edge-list form
    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.users().map(str::to_owned).collect(),
            edges: self.edges(),
        }
    }

    /// Rebuild a frozen graph from its edge-list form
    ///
    /// Goes back through the builder so the frozen-graph invariants are
    /// re-established regardless of what the serialized form contains.
    pub fn from_data(data: &GraphData) -> Self {
        let mut builder = crate::network::GraphBuilder::new();
        for (u, v) in &data.edges {
            builder.add_edge(u, v);
        }
        builder.freeze()
    }
}

/// Serializable edge-list form of a [`StakeholderGraph`]
///
/// This is the wire/artifact format: node order and edge order are
/// preserved so deserialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

/// Immutable derived statistics snapshot for one graph
///
/// `None` encodes "undefined" for degenerate graphs (empty graph,
/// zero mean degree, largest component below two nodes). Undefined is
/// a value here, never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    /// Node count of the full graph
    pub nodes: usize,
    /// Gini coefficient of the degree sequence (full graph)
    pub gini_coefficient: Option<f64>,
    /// Average clustering coefficient (largest component only)
    pub avg_clustering: Option<f64>,
    /// Average shortest-path length (largest component only)
    pub avg_min_path: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::GraphBuilder;

    fn triangle() -> StakeholderGraph {
        let mut builder = GraphBuilder::new();
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        builder.add_edge("a", "c");
        builder.freeze()
    }

    #[test]
    fn test_interaction_record_new() {
        let record = InteractionRecord::new("acme", "widgets", 7, "alice");

        assert_eq!(record.organization, "acme");
        assert_eq!(record.package, "widgets");
        assert_eq!(record.issue_number, 7);
        assert_eq!(record.user_id, "alice");
    }

    #[test]
    fn test_interaction_record_serde() {
        let record = InteractionRecord::new("acme", "widgets", 7, "alice");

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: InteractionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_graph_accessors() {
        let graph = triangle();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.is_empty());
        assert!(graph.contains_user("a"));
        assert!(!graph.contains_user("z"));
        assert!(graph.contains_edge("a", "b"));
        assert!(graph.contains_edge("b", "a"));
        assert_eq!(graph.degree("a"), Some(2));
        assert_eq!(graph.degree("z"), None);
        assert_eq!(graph.degrees(), vec![2, 2, 2]);
    }

    #[test]
    fn test_graph_users_insertion_order() {
        let graph = triangle();
        let users: Vec<&str> = graph.users().collect();

        assert_eq!(users, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_graph_data_round_trip() {
        let graph = triangle();
        let data = graph.to_data();
        let restored = StakeholderGraph::from_data(&data);

        assert_eq!(restored.node_count(), graph.node_count());
        assert_eq!(restored.edge_count(), graph.edge_count());
        for user in graph.users() {
            assert!(restored.contains_user(user));
        }
        for (u, v) in graph.edges() {
            assert!(restored.contains_edge(&u, &v));
        }
    }

    #[test]
    fn test_graph_data_serde() {
        let data = triangle().to_data();

        let json = serde_json::to_string(&data).unwrap();
        let deserialized: GraphData = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, data);
    }

    #[test]
    fn test_statistics_undefined_values_serde() {
        let stats = NetworkStatistics {
            nodes: 0,
            gini_coefficient: None,
            avg_clustering: None,
            avg_min_path: None,
        };

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: NetworkStatistics = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, stats);
    }
}

//! Network analytics engine
//!
//! Structural statistics over a frozen [`StakeholderGraph`]:
//!
//! - inequality: Gini coefficient of the degree sequence (full graph)
//! - cohesion: average clustering coefficient (largest component)
//! - efficiency: average shortest-path length (largest component)
//! - influence: betweenness centrality (full graph, normalized)
//!
//! Degenerate graphs yield `None`, never a panic.

mod betweenness;
mod clustering;
mod components;
mod gini;
mod paths;

pub use betweenness::betweenness_centrality;
pub use clustering::average_clustering;
pub use components::{connected_components, largest_component};
pub use gini::gini;
pub use paths::average_shortest_path;

use tracing::debug;

use crate::domain::{NetworkStatistics, StakeholderGraph};

/// Compute the statistics snapshot for a graph
///
/// Gini runs over the full degree sequence; clustering and shortest
/// path only over the largest connected component. Betweenness is
/// reported separately per user, see [`betweenness_centrality`].
pub fn compute_statistics(graph: &StakeholderGraph) -> NetworkStatistics {
    let stats = NetworkStatistics {
        nodes: graph.node_count(),
        gini_coefficient: gini(&graph.degrees()),
        avg_clustering: average_clustering(graph),
        avg_min_path: average_shortest_path(graph),
    };
    debug!(
        nodes = stats.nodes,
        gini = ?stats.gini_coefficient,
        clustering = ?stats.avg_clustering,
        min_path = ?stats.avg_min_path,
        "computed network statistics"
    );
    stats
}

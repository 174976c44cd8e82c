//! Average shortest-path length

use std::collections::VecDeque;

use super::components::largest_component;
use crate::domain::StakeholderGraph;

/// Average shortest-path length within the largest connected component
///
/// BFS from every component node, mean over ordered pairs. Undefined
/// (`None`) for an empty graph or a component with fewer than two
/// nodes; the guard keeps the traversal from ever running on a
/// subgraph where path length has no meaning.
pub fn average_shortest_path(graph: &StakeholderGraph) -> Option<f64> {
    let component = largest_component(graph)?;
    let n = component.len();
    if n < 2 {
        return None;
    }

    let g = graph.as_graph();
    let mut in_component = vec![false; g.node_count()];
    for &node in &component {
        in_component[node.index()] = true;
    }

    let mut total = 0u64;
    for &source in &component {
        let mut dist = vec![-1i64; g.node_count()];
        dist[source.index()] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            for neighbor in g.neighbors(node) {
                if in_component[neighbor.index()] && dist[neighbor.index()] < 0 {
                    dist[neighbor.index()] = dist[node.index()] + 1;
                    queue.push_back(neighbor);
                }
            }
        }
        for &target in &component {
            if target != source {
                total += dist[target.index()] as u64;
            }
        }
    }

    Some(total as f64 / (n * (n - 1)) as f64)
}

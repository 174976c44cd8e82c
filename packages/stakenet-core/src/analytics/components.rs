//! Connected-component extraction

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use crate::domain::StakeholderGraph;

/// Partition the graph into connected components
///
/// BFS in node insertion order; within each component nodes appear in
/// discovery order. Deterministic for a fixed build order.
pub fn connected_components(graph: &StakeholderGraph) -> Vec<Vec<NodeIndex>> {
    let g = graph.as_graph();
    let mut visited = vec![false; g.node_count()];
    let mut components = Vec::new();

    for start in g.node_indices() {
        if visited[start.index()] {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        visited[start.index()] = true;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for neighbor in g.neighbors(node) {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Largest connected component by node count
///
/// Ties break in favor of the first-encountered component, which makes
/// the choice stable given the fixed iteration order. `None` for an
/// empty graph.
pub fn largest_component(graph: &StakeholderGraph) -> Option<Vec<NodeIndex>> {
    let mut largest: Option<Vec<NodeIndex>> = None;
    for component in connected_components(graph) {
        match &largest {
            Some(best) if component.len() <= best.len() => {}
            _ => largest = Some(component),
        }
    }
    largest
}

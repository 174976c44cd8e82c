//! Betweenness centrality (Brandes' algorithm)

use std::collections::{HashMap, VecDeque};

use crate::domain::StakeholderGraph;

/// Normalized betweenness centrality, one value per user
///
/// Runs over the whole graph, not just the largest component; pairs in
/// different components simply contribute nothing. Normalization for
/// undirected graphs divides by (n - 1)(n - 2); for n <= 2 every value
/// is zero and no scaling applies.
pub fn betweenness_centrality(graph: &StakeholderGraph) -> HashMap<String, f64> {
    let g = graph.as_graph();
    let n = g.node_count();
    let mut centrality = vec![0.0f64; n];

    for source in g.node_indices() {
        // Brandes: single-source shortest paths, then dependency
        // accumulation in reverse discovery order.
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist = vec![-1i64; n];

        sigma[source.index()] = 1.0;
        dist[source.index()] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            stack.push(node);
            for neighbor in g.neighbors(node) {
                if dist[neighbor.index()] < 0 {
                    dist[neighbor.index()] = dist[node.index()] + 1;
                    queue.push_back(neighbor);
                }
                if dist[neighbor.index()] == dist[node.index()] + 1 {
                    sigma[neighbor.index()] += sigma[node.index()];
                    predecessors[neighbor.index()].push(node.index());
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(node) = stack.pop() {
            let w = node.index();
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if node != source {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / (((n - 1) * (n - 2)) as f64);
        for value in &mut centrality {
            *value *= scale;
        }
    }

    g.node_indices()
        .map(|idx| (g[idx].clone(), centrality[idx.index()]))
        .collect()
}

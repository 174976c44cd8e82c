//! Average clustering coefficient

use super::components::largest_component;
use crate::domain::StakeholderGraph;

/// Average clustering coefficient of the largest connected component
///
/// Per node: C_v = 2 * triangles(v) / (k_v * (k_v - 1)), with C_v = 0
/// for degree below 2. The mean runs over the component's nodes only;
/// shortest-path statistics use the same subgraph, so the two are
/// comparable. `None` for an empty graph.
pub fn average_clustering(graph: &StakeholderGraph) -> Option<f64> {
    let component = largest_component(graph)?;
    let g = graph.as_graph();

    let mut total = 0.0;
    for &node in &component {
        let neighbors: Vec<_> = g.neighbors(node).collect();
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        let mut links = 0usize;
        for i in 0..k {
            for j in (i + 1)..k {
                if g.find_edge(neighbors[i], neighbors[j]).is_some() {
                    links += 1;
                }
            }
        }
        total += 2.0 * links as f64 / (k * (k - 1)) as f64;
    }
    Some(total / component.len() as f64)
}

use crate::graph::Graph;

/// Undirected n-cycle 0-1-…-(n-1)-0, both edge directions materialized.
pub fn cycle_graph(n: usize) -> Graph {
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        let j = (i + 1) % n;
        edges.push((i, j));
        edges.push((j, i));
    }
    Graph::from_edges(n, edges, 2).unwrap()
}

/// Every ordered pair of distinct vertices is an edge.
pub fn complete_graph(n: usize) -> Graph {
    let mut edges = Vec::with_capacity(n * (n - 1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                edges.push((i, j));
            }
        }
    }
    Graph::from_edges(n, edges, 2).unwrap()
}

/// `n` vertices, no edges at all.
pub fn isolated_vertices(n: usize) -> Graph {
    Graph::from_edges(n, Vec::new(), 2).unwrap()
}

use crate::common::{Color, ColorHistogram, VertexId};
use crate::graph::GraphStore;

/// Deterministic per-vertex coloring, applied once before a run. Colors are
/// read-only for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringPolicy {
    /// Every vertex gets color 1.
    Constant,
    /// Vertex `v` gets color `v % 2`.
    Parity,
}

impl ColoringPolicy {
    pub fn color_for(&self, vertex_id: VertexId) -> Color {
        match self {
            ColoringPolicy::Constant => 1,
            ColoringPolicy::Parity => (vertex_id % 2) as Color,
        }
    }
}

/// Writes exactly one color per vertex. Writes are independent, so ordering
/// between vertices does not matter; the store acknowledges each write before
/// the next is issued, so all colors are visible once this returns.
pub fn apply_coloring<G: GraphStore + ?Sized>(store: &mut G, policy: ColoringPolicy) {
    for vertex_id in 0..store.num_vertices() {
        store.set_color(vertex_id, policy.color_for(vertex_id));
    }
}

pub fn color_histogram<G: GraphStore + ?Sized>(store: &G) -> ColorHistogram {
    let mut histogram = ColorHistogram::default();
    for vertex_id in 0..store.num_vertices() {
        *histogram.entry(store.color_of(vertex_id)).or_insert(0) += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::cycle_graph;

    #[test]
    fn test_constant_coloring() {
        let mut graph = cycle_graph(4);
        apply_coloring(&mut graph, ColoringPolicy::Constant);
        assert!(graph.colors().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_parity_coloring() {
        let mut graph = cycle_graph(5);
        apply_coloring(&mut graph, ColoringPolicy::Parity);
        assert_eq!(graph.colors(), &[0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_color_histogram() {
        let mut graph = cycle_graph(5);
        apply_coloring(&mut graph, ColoringPolicy::Parity);
        let histogram = color_histogram(&graph);
        assert_eq!(histogram.get(&0), Some(&3));
        assert_eq!(histogram.get(&1), Some(&2));
    }
}

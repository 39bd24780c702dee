use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::ReaderBuilder;
use log::info;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

pub(crate) use self::csr::Csr;
use crate::common::{Color, VertexId};
use crate::error::{IsoPathError, IsoPathResult};

mod csr;

/// Vertex-field access contract shared by the local graph and the
/// partitioned store. A store is colored exactly once, before any search
/// reads it; `set_color` is the only mutator.
///
/// Out-of-range vertex ids or neighbor indices are construction-invariant
/// violations and panic.
pub trait GraphStore: Sync {
    fn num_vertices(&self) -> usize;
    fn color_of(&self, vertex_id: VertexId) -> Color;
    fn set_color(&mut self, vertex_id: VertexId, color: Color);
    fn degree(&self, vertex_id: VertexId) -> usize;
    fn neighbor(&self, vertex_id: VertexId, index: usize) -> VertexId;
}

/// In-memory vertex-colored graph: one color slot per vertex plus a csr
/// adjacency. Neighbor lists are immutable after construction; self-loops
/// and duplicate edges are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    colors: Vec<Color>,
    csr: Csr,
}

impl Graph {
    /// Builds the adjacency from an unsorted `(from, to)` edge list. Every
    /// endpoint must be in `[0, num_vertices)`; anything else is a fatal
    /// construction error. Colors start at zero until an initializer runs.
    pub fn from_edges(
        num_vertices: usize,
        mut edges: Vec<(VertexId, VertexId)>,
        num_threads: usize,
    ) -> IsoPathResult<Self> {
        let pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
        pool.scope(|_| {
            edges.par_iter().try_for_each(|&(src, dst)| {
                if src >= num_vertices || dst >= num_vertices {
                    let err = format!(
                        "edge ({src}, {dst}) out of range for {num_vertices} vertices"
                    );
                    return Err(IsoPathError::Graph(err));
                }
                Ok(())
            })
        })?;
        pool.scope(|_| edges.par_sort_unstable());
        let csr = Csr::from_sorted_edges(num_vertices, &edges)?;
        Ok(Self {
            colors: vec![0; num_vertices],
            csr,
        })
    }

    pub fn num_edges(&self) -> usize {
        self.csr.num_edges()
    }

    pub fn neighbors(&self, vertex_id: VertexId) -> &[VertexId] {
        self.csr.neighbors(vertex_id)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Splits the graph into `num_partitions` contiguous vertex ranges,
    /// returning each range's base vertex id, color block, and rebased
    /// adjacency. Consumed by the partitioned store.
    pub(crate) fn into_partitions(
        self,
        num_partitions: usize,
    ) -> (usize, Vec<(VertexId, Vec<Color>, Csr)>) {
        assert!(num_partitions > 0, "need at least one partition");
        let nv = self.colors.len();
        let partition_size = nv.div_ceil(num_partitions).max(1);
        let mut parts = Vec::with_capacity(num_partitions);
        let mut colors = self.colors;
        let mut lo = 0;
        while lo < nv {
            let hi = (lo + partition_size).min(nv);
            let rest = colors.split_off(hi - lo);
            parts.push((lo, colors, self.csr.split_range(lo, hi)));
            colors = rest;
            lo = hi;
        }
        (partition_size, parts)
    }

    /// Logs the full adjacency, one line per vertex. Only sensible for
    /// small graphs; the driver gates it on scale.
    pub fn dump(&self) {
        for v in 0..self.num_vertices() {
            info!(
                "vertex {v} color {} neighbors {:?}",
                self.colors[v],
                self.neighbors(v)
            );
        }
    }
}

impl GraphStore for Graph {
    fn num_vertices(&self) -> usize {
        self.colors.len()
    }

    fn color_of(&self, vertex_id: VertexId) -> Color {
        self.colors[vertex_id]
    }

    fn set_color(&mut self, vertex_id: VertexId, color: Color) {
        self.colors[vertex_id] = color;
    }

    fn degree(&self, vertex_id: VertexId) -> usize {
        self.csr.degree(vertex_id)
    }

    fn neighbor(&self, vertex_id: VertexId, index: usize) -> VertexId {
        self.csr.neighbor_at(vertex_id, index)
    }
}

pub fn read_edges_from_csv<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> IsoPathResult<Vec<(VertexId, VertexId)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)?;
    reader
        .records()
        .enumerate()
        .map(|(line, record)| {
            let record = record?;
            let src = record
                .get(0)
                .ok_or_else(|| {
                    let err = format!("expect src vertex id in line {line}");
                    IsoPathError::Graph(err)
                })?
                .parse::<VertexId>()
                .map_err(|e| IsoPathError::Graph(e.to_string()))?;
            let dst = record
                .get(1)
                .ok_or_else(|| {
                    let err = format!("expect dst vertex id in line {line}");
                    IsoPathError::Graph(err)
                })?
                .parse::<VertexId>()
                .map_err(|e| IsoPathError::Graph(e.to_string()))?;
            Ok((src, dst))
        })
        .collect()
}

impl Graph {
    /// Reads an edge-list CSV and sizes the vertex set from the largest
    /// endpoint seen.
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        num_threads: usize,
    ) -> IsoPathResult<Self> {
        let edges = read_edges_from_csv(path, delimiter)?;
        let num_vertices = edges
            .iter()
            .map(|&(src, dst)| src.max(dst) + 1)
            .max()
            .unwrap_or(0);
        Self::from_edges(num_vertices, edges, num_threads)
    }

    pub fn export_bincode<P: AsRef<Path>>(&self, path: P) -> IsoPathResult<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn import_bincode<P: AsRef<Path>>(path: P) -> IsoPathResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let graph = bincode::deserialize_from(reader)?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::cycle_graph;

    #[test]
    fn test_build_graph() {
        let edges = vec![(2, 0), (0, 1), (0, 2), (1, 0)];
        let graph = Graph::from_edges(3, edges, 2).unwrap();
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 4);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.neighbors(2), &[0]);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.neighbor(0, 1), 2);
    }

    #[test]
    fn test_build_graph_rejects_out_of_range_edge() {
        let result = Graph::from_edges(2, vec![(0, 5)], 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_edges_and_self_loops_are_kept() {
        let edges = vec![(0, 0), (0, 1), (0, 1)];
        let graph = Graph::from_edges(2, edges, 2).unwrap();
        assert_eq!(graph.neighbors(0), &[0, 1, 1]);
    }

    #[test]
    fn test_set_color() {
        let mut graph = cycle_graph(4);
        graph.set_color(2, 7);
        assert_eq!(graph.color_of(2), 7);
        assert_eq!(graph.color_of(0), 0);
    }

    #[test]
    fn test_into_partitions() {
        let mut graph = cycle_graph(5);
        for v in 0..5 {
            graph.set_color(v, v as i64);
        }
        let (partition_size, parts) = graph.into_partitions(2);
        assert_eq!(partition_size, 3);
        assert_eq!(parts.len(), 2);

        let (base, colors, csr) = &parts[1];
        assert_eq!(*base, 3);
        assert_eq!(colors, &[3, 4]);
        // vertex 4's neighbors in a 5-cycle, still in global ids
        assert_eq!(csr.neighbors(1), &[0, 3]);
    }
}

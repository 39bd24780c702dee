use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::common::VertexId;
use crate::error::{IsoPathError, IsoPathResult};

/// Compressed sparse row adjacency over vertex ids `0..nv`.
///
/// `offsets` has `nv + 1` entries; the neighbors of `v` live in
/// `neighbors[offsets[v]..offsets[v + 1]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Csr {
    offsets: Vec<usize>,
    neighbors: Vec<VertexId>,
}

impl Csr {
    pub fn num_vertices(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn num_edges(&self) -> usize {
        self.neighbors.len()
    }

    pub fn neighbors(&self, vertex_id: VertexId) -> &[VertexId] {
        assert!(
            vertex_id < self.num_vertices(),
            "vertex id {vertex_id} out of range"
        );
        let start = self.offsets[vertex_id];
        let end = self.offsets[vertex_id + 1];
        &self.neighbors[start..end]
    }

    pub fn degree(&self, vertex_id: VertexId) -> usize {
        self.neighbors(vertex_id).len()
    }

    pub fn neighbor_at(&self, vertex_id: VertexId, index: usize) -> VertexId {
        let neighbors = self.neighbors(vertex_id);
        assert!(
            index < neighbors.len(),
            "neighbor index {index} out of range for vertex {vertex_id}"
        );
        neighbors[index]
    }

    pub fn from_sorted_edges(
        num_vertices: usize,
        edges: &[(VertexId, VertexId)],
    ) -> IsoPathResult<Self> {
        let mut offsets = vec![0; num_vertices + 1];
        let neighbors = edges.iter().map(|(_, neighbor)| *neighbor).collect();

        let mut current_vertex_id = 0;
        let mut current_offset = 0;

        for (src, neighbors) in &edges.iter().chunk_by(|(src, _)| *src) {
            if src < current_vertex_id {
                return Err(IsoPathError::Graph("edges are not sorted".into()));
            }
            if src >= num_vertices {
                let err = format!("vertex id {src} exceeds vertex count {num_vertices}");
                return Err(IsoPathError::Graph(err));
            }
            for vertex_id in current_vertex_id..=src {
                offsets[vertex_id] = current_offset;
            }
            current_vertex_id = src + 1;
            current_offset += neighbors.count();
        }
        offsets
            .iter_mut()
            .skip(current_vertex_id)
            .for_each(|offset| *offset = current_offset);
        Ok(Self { offsets, neighbors })
    }

    /// Carves out the adjacency of the contiguous vertex range `lo..hi`,
    /// rebased so the returned csr indexes that range from zero. Neighbor ids
    /// stay global.
    pub fn split_range(&self, lo: VertexId, hi: VertexId) -> Csr {
        assert!(lo <= hi && hi <= self.num_vertices());
        let base = self.offsets[lo];
        let offsets = self.offsets[lo..=hi]
            .iter()
            .map(|offset| offset - base)
            .collect();
        let neighbors = self.neighbors[base..self.offsets[hi]].to_vec();
        Csr { offsets, neighbors }
    }
}

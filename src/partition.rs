use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::common::{Color, PartitionId, VertexId};
use crate::graph::{Csr, Graph, GraphStore};

/// One worker's slice of the graph: a contiguous vertex range with its
/// colors and rebased adjacency. Only the owning worker thread ever touches
/// it; everyone else goes through a delegate call.
pub struct Partition {
    base: VertexId,
    colors: Vec<Color>,
    csr: Csr,
}

impl Partition {
    fn local(&self, vertex_id: VertexId) -> usize {
        assert!(
            vertex_id >= self.base && vertex_id - self.base < self.colors.len(),
            "vertex {vertex_id} not owned by partition at base {}",
            self.base
        );
        vertex_id - self.base
    }

    pub fn color(&self, vertex_id: VertexId) -> Color {
        self.colors[self.local(vertex_id)]
    }

    pub fn set_color(&mut self, vertex_id: VertexId, color: Color) {
        let local = self.local(vertex_id);
        self.colors[local] = color;
    }

    pub fn degree(&self, vertex_id: VertexId) -> usize {
        self.csr.degree(self.local(vertex_id))
    }

    pub fn neighbor(&self, vertex_id: VertexId, index: usize) -> VertexId {
        self.csr.neighbor_at(self.local(vertex_id), index)
    }
}

type DelegateCall = Box<dyn FnOnce(&mut Partition) + Send>;

/// Ownership-aware graph store. Vertices are split into contiguous ranges,
/// each owned by a dedicated worker thread for its lifetime; every field
/// access routes a delegate call to the owner and blocks for the reply, so
/// callers never know or care where a vertex lives. Requests travel over an
/// mpsc channel per partition, replies over a per-call oneshot channel.
pub struct PartitionedGraph {
    num_vertices: usize,
    partition_size: usize,
    delegates: Vec<Sender<DelegateCall>>,
    workers: Vec<JoinHandle<()>>,
}

impl PartitionedGraph {
    pub fn new(graph: Graph, num_partitions: usize) -> Self {
        let num_vertices = graph.num_vertices();
        let (partition_size, parts) = graph.into_partitions(num_partitions);
        debug!(
            "partitioning {num_vertices} vertices into {} ranges of {partition_size}",
            parts.len()
        );
        let mut delegates = Vec::with_capacity(parts.len());
        let mut workers = Vec::with_capacity(parts.len());
        for (id, (base, colors, csr)) in parts.into_iter().enumerate() {
            let (sender, receiver) = mpsc::channel::<DelegateCall>();
            let handle = thread::Builder::new()
                .name(format!("partition-{id}"))
                .spawn(move || {
                    let mut partition = Partition { base, colors, csr };
                    while let Ok(call) = receiver.recv() {
                        call(&mut partition);
                    }
                })
                .expect("failed to spawn partition worker");
            delegates.push(sender);
            workers.push(handle);
        }
        Self {
            num_vertices,
            partition_size,
            delegates,
            workers,
        }
    }

    pub fn num_partitions(&self) -> usize {
        self.delegates.len()
    }

    pub fn owner(&self, vertex_id: VertexId) -> PartitionId {
        assert!(
            vertex_id < self.num_vertices,
            "vertex id {vertex_id} out of range"
        );
        vertex_id / self.partition_size
    }

    /// Runs `f` on the thread owning `vertex_id` and returns its result.
    /// Synchronous from the caller's point of view; other callers are not
    /// blocked while this one waits.
    pub fn invoke_at<R, F>(&self, vertex_id: VertexId, f: F) -> R
    where
        R: Send + 'static,
        F: FnOnce(&mut Partition) -> R + Send + 'static,
    {
        let owner = self.owner(vertex_id);
        let (reply, response) = oneshot::channel();
        let call: DelegateCall = Box::new(move |partition| {
            let _ = reply.send(f(partition));
        });
        self.delegates[owner]
            .send(call)
            .expect("partition worker unavailable");
        response.recv().expect("partition worker dropped the reply")
    }
}

impl GraphStore for PartitionedGraph {
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn color_of(&self, vertex_id: VertexId) -> Color {
        self.invoke_at(vertex_id, move |partition| partition.color(vertex_id))
    }

    fn set_color(&mut self, vertex_id: VertexId, color: Color) {
        // unit reply doubles as the write acknowledgement
        self.invoke_at(vertex_id, move |partition| {
            partition.set_color(vertex_id, color)
        })
    }

    fn degree(&self, vertex_id: VertexId) -> usize {
        self.invoke_at(vertex_id, move |partition| partition.degree(vertex_id))
    }

    fn neighbor(&self, vertex_id: VertexId, index: usize) -> VertexId {
        self.invoke_at(vertex_id, move |partition| {
            partition.neighbor(vertex_id, index)
        })
    }
}

impl Drop for PartitionedGraph {
    fn drop(&mut self) {
        // closing the request channels lets every worker drain and exit
        self.delegates.clear();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{apply_coloring, ColoringPolicy};
    use crate::test_utils::cycle_graph;

    #[test]
    fn test_delegated_reads_match_local_graph() {
        let mut local = cycle_graph(6);
        apply_coloring(&mut local, ColoringPolicy::Parity);
        let partitioned = PartitionedGraph::new(local.clone(), 3);

        assert_eq!(partitioned.num_partitions(), 3);
        assert_eq!(partitioned.num_vertices(), 6);
        for v in 0..6 {
            assert_eq!(partitioned.color_of(v), local.color_of(v));
            assert_eq!(partitioned.degree(v), local.degree(v));
            for i in 0..local.degree(v) {
                assert_eq!(partitioned.neighbor(v, i), local.neighbor(v, i));
            }
        }
    }

    #[test]
    fn test_delegated_color_write() {
        let mut partitioned = PartitionedGraph::new(cycle_graph(4), 2);
        apply_coloring(&mut partitioned, ColoringPolicy::Constant);
        for v in 0..4 {
            assert_eq!(partitioned.color_of(v), 1);
        }
        partitioned.set_color(3, 9);
        assert_eq!(partitioned.color_of(3), 9);
    }

    #[test]
    fn test_invoke_at_runs_on_owner() {
        let partitioned = PartitionedGraph::new(cycle_graph(4), 4);
        let name = partitioned.invoke_at(2, |_| {
            thread::current().name().map(str::to_owned)
        });
        assert_eq!(name.as_deref(), Some("partition-2"));
    }

    #[test]
    fn test_ownership_is_contiguous() {
        let partitioned = PartitionedGraph::new(cycle_graph(5), 2);
        assert_eq!(partitioned.owner(0), 0);
        assert_eq!(partitioned.owner(2), 0);
        assert_eq!(partitioned.owner(3), 1);
        assert_eq!(partitioned.owner(4), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_vertex_panics() {
        let partitioned = PartitionedGraph::new(cycle_graph(4), 2);
        partitioned.color_of(4);
    }
}

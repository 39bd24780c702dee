use std::fmt::Display;
use std::sync::Arc;

use log::{error, warn};
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};
use rayon::ThreadPool;

use crate::common::{Color, PathCount, VertexId};
use crate::graph::GraphStore;
use crate::pattern::ColorPattern;

/// Counts simple paths starting at `start` whose visited-vertex colors equal
/// `pattern` in order. Backtracking search; recursion depth is capped by the
/// pattern length, which is the only enforced depth bound.
///
/// An empty pattern is a caller error, tolerated by counting nothing.
pub fn count_paths<G: GraphStore + ?Sized>(
    store: &G,
    start: VertexId,
    pattern: &[Color],
) -> PathCount {
    if pattern.is_empty() {
        warn!("empty pattern passed to count_paths, counting nothing");
        return 0;
    }
    let mut visited = Vec::with_capacity(pattern.len());
    count_from(store, start, pattern, 0, &mut visited)
}

fn count_from<G: GraphStore + ?Sized>(
    store: &G,
    vertex_id: VertexId,
    pattern: &[Color],
    cursor: usize,
    visited: &mut Vec<VertexId>,
) -> PathCount {
    if store.color_of(vertex_id) != pattern[cursor] {
        return 0;
    }
    if cursor == pattern.len() - 1 {
        return 1;
    }
    let degree = store.degree(vertex_id);
    let mut paths = 0;
    visited.push(vertex_id);
    for index in 0..degree {
        let next = store.neighbor(vertex_id, index);
        // linear scan of the path prefix; exact simple-path semantics, and
        // the prefix never outgrows the pattern
        if !visited.contains(&next) {
            paths += count_from(store, next, pattern, cursor + 1, visited);
        }
    }
    visited.pop();
    paths
}

/// Runs the pattern search from every vertex, either as one independent task
/// per vertex on a rayon pool or as a single-threaded reference sweep.
pub struct PathCounter<G> {
    store: Arc<G>,
    pool: Arc<ThreadPool>,
}

impl<G: GraphStore + Send> PathCounter<G> {
    pub fn new(store: Arc<G>, pool: Arc<ThreadPool>) -> Self {
        Self { store, pool }
    }

    /// One task per vertex; task `v` owns slot `v` of the results array and
    /// is the only writer of it. Each task searches against its own private
    /// copy of the pattern. The scope join is the completion barrier, so
    /// every slot is visible once this returns. Totals do not depend on task
    /// scheduling order.
    pub fn count_per_vertex(&self, pattern: &ColorPattern) -> Vec<PathCount> {
        let mut results = vec![0; self.store.num_vertices()];
        self.pool.scope(|_| {
            results
                .par_iter_mut()
                .enumerate()
                .for_each(|(vertex_id, slot)| {
                    let local = pattern.to_local();
                    *slot = count_paths(self.store.as_ref(), vertex_id, &local);
                });
        });
        results
    }

    pub fn count_parallel(&self, pattern: &ColorPattern) -> PathCount {
        let results = self.count_per_vertex(pattern);
        self.pool.scope(|_| results.par_iter().sum())
    }

    /// Sequential reference sweep over all vertices, accumulating a running
    /// total. Used as the correctness oracle for `count_parallel`.
    pub fn count_sequential(&self, pattern: &ColorPattern) -> PathCount {
        let local = pattern.to_local();
        let mut total = 0;
        for vertex_id in 0..self.store.num_vertices() {
            total += count_paths(self.store.as_ref(), vertex_id, &local);
        }
        total
    }
}

/// Outcome of a verified run. A mismatch signals a distribution-layer bug,
/// so both totals are reported for diagnosis instead of crashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountReport {
    pub parallel_total: PathCount,
    pub sequential_total: PathCount,
}

impl CountReport {
    pub fn new(parallel_total: PathCount, sequential_total: PathCount) -> Self {
        let report = Self {
            parallel_total,
            sequential_total,
        };
        if !report.is_consistent() {
            error!(
                "path count mismatch: parallel {parallel_total} != sequential {sequential_total}"
            );
        }
        report
    }

    pub fn is_consistent(&self) -> bool {
        self.parallel_total == self.sequential_total
    }
}

impl Display for CountReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parallel: {} sequential: {} ({})",
            self.parallel_total,
            self.sequential_total,
            if self.is_consistent() {
                "consistent"
            } else {
                "MISMATCH"
            }
        )
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::VertexId;
use crate::error::{IsoPathError, IsoPathResult};

// graph500 Kronecker initiator probabilities.
const INITIATOR_A: f64 = 0.57;
const INITIATOR_B: f64 = 0.19;
const INITIATOR_C: f64 = 0.19;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Graph has `2^scale` vertices.
    pub scale: u32,
    /// Approximate edges per vertex.
    pub edge_factor: usize,
    pub seed: u64,
}

impl GeneratorConfig {
    pub fn num_vertices(&self) -> usize {
        1usize << self.scale
    }

    pub fn num_edges(&self) -> usize {
        self.num_vertices() * self.edge_factor
    }
}

/// Samples a graph500-style RMAT edge list: `2^scale * edge_factor` directed
/// pairs, each drawn by recursively descending into one of the four adjacency
/// quadrants. Reproducible for a fixed seed.
pub fn generate_rmat(config: &GeneratorConfig) -> IsoPathResult<Vec<(VertexId, VertexId)>> {
    if config.scale >= usize::BITS {
        let err = format!("scale {} exceeds the addressable vertex range", config.scale);
        return Err(IsoPathError::Generate(err));
    }
    let mut rng = StdRng::seed_from_u64(config.seed);
    Ok((0..config.num_edges())
        .map(|_| sample_edge(config.scale, &mut rng))
        .collect())
}

fn sample_edge(scale: u32, rng: &mut StdRng) -> (VertexId, VertexId) {
    let mut src = 0;
    let mut dst = 0;
    for _ in 0..scale {
        src <<= 1;
        dst <<= 1;
        let quadrant: f64 = rng.gen();
        if quadrant < INITIATOR_A {
            // top-left: both bits stay zero
        } else if quadrant < INITIATOR_A + INITIATOR_B {
            dst |= 1;
        } else if quadrant < INITIATOR_A + INITIATOR_B + INITIATOR_C {
            src |= 1;
        } else {
            src |= 1;
            dst |= 1;
        }
    }
    (src, dst)
}

/// Appends the reverse of every edge so the adjacency reads as undirected.
pub fn mirror_edges(edges: &mut Vec<(VertexId, VertexId)>) {
    let forward = edges.len();
    edges.reserve(forward);
    for i in 0..forward {
        let (src, dst) = edges[i];
        edges.push((dst, src));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let config = GeneratorConfig {
            scale: 4,
            edge_factor: 3,
            seed: 12345,
        };
        let first = generate_rmat(&config).unwrap();
        let second = generate_rmat(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 48);
    }

    #[test]
    fn test_generated_edges_are_in_range() {
        let config = GeneratorConfig {
            scale: 5,
            edge_factor: 4,
            seed: 7,
        };
        let nv = config.num_vertices();
        for (src, dst) in generate_rmat(&config).unwrap() {
            assert!(src < nv && dst < nv);
        }
    }

    #[test]
    fn test_scale_overflow_is_rejected() {
        let config = GeneratorConfig {
            scale: usize::BITS,
            edge_factor: 1,
            seed: 0,
        };
        assert!(generate_rmat(&config).is_err());
    }

    #[test]
    fn test_mirror_edges() {
        let mut edges = vec![(0, 1), (2, 3)];
        mirror_edges(&mut edges);
        assert_eq!(edges, vec![(0, 1), (2, 3), (1, 0), (3, 2)]);
    }
}

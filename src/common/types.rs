use ahash::HashMap;

pub type VertexId = usize;
pub type Color = i64;
pub type PartitionId = usize;
pub type PathCount = u64;
pub type ColorHistogram = HashMap<Color, usize>;

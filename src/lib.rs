pub mod color;
pub mod common;
pub mod counter;
pub mod error;
pub mod generate;
pub mod graph;
pub mod partition;
pub mod pattern;
#[cfg(test)]
mod test_utils;

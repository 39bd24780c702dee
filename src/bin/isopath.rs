mod command;

use std::thread;

use clap::Parser;
use mimalloc::MiMalloc;

use crate::command::*;

#[global_allocator]
static ALLOC: MiMalloc = MiMalloc;

/// Counts simple paths whose vertex colors match an ordered pattern.
#[derive(Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
enum Command {
    /// Generate a graph, count matching paths in parallel over a partitioned
    /// store, and cross-check against the sequential reference.
    Run(RunArgs),
    /// Generate an RMAT edge list (CSV) or a serialized graph (bincode).
    Generate(GenerateArgs),
    /// Count matching paths on an existing edge list or serialized graph.
    Count(CountArgs),
}

// searches recurse one frame per pattern position
const STACK_SIZE: usize = 128 * 1024 * 1024;

fn main() {
    env_logger::init();
    let handle = thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(|| {
            let command = Command::parse();
            match command {
                Command::Run(args) => run(args),
                Command::Generate(args) => generate(args),
                Command::Count(args) => count(args),
            }
        })
        .unwrap();
    handle.join().unwrap()
}

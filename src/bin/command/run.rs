use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use isopath::color::apply_coloring;
use isopath::counter::{CountReport, PathCounter};
use isopath::generate::{generate_rmat, mirror_edges, GeneratorConfig};
use isopath::graph::Graph;
use isopath::partition::PartitionedGraph;
use isopath::pattern::ColorPattern;
use log::info;
use rayon::ThreadPoolBuilder;

use super::ColoringArg;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Graph scale; the graph will have 2^scale vertices.
    #[arg(short, long, default_value = "3")]
    scale: u32,
    /// Approximate number of edges per vertex.
    #[arg(short, long, default_value = "1")]
    edgefactor: usize,
    /// Random seed for edge generation.
    #[arg(long, default_value = "12345")]
    seed: u64,
    /// Color pattern to match, e.g. "0,1,0".
    #[arg(short, long, default_value = "1,1,1")]
    pattern: ColorPattern,
    /// Coloring policy.
    #[arg(short, long, value_enum, default_value_t = ColoringArg::Parity)]
    coloring: ColoringArg,
    /// Number of counting threads.
    #[arg(short, long, default_value = "4")]
    threads: usize,
    /// Number of graph partitions (delegate workers).
    #[arg(long, default_value = "4")]
    partitions: usize,
    /// Skip the sequential cross-check.
    #[arg(long)]
    no_verify: bool,
    /// Keep generated edges one-directional.
    #[arg(long)]
    directed: bool,
}

pub fn run(args: RunArgs) {
    println!("{:#?}", args);
    let run_start = Instant::now();

    let config = GeneratorConfig {
        scale: args.scale,
        edge_factor: args.edgefactor,
        seed: args.seed,
    };
    info!(
        "scale = {}, NV = {}, NE = {}",
        args.scale,
        config.num_vertices(),
        config.num_edges()
    );

    let start = Instant::now();
    let mut edges = generate_rmat(&config).unwrap();
    if !args.directed {
        mirror_edges(&mut edges);
    }
    println!("generation time: {} s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let graph = Graph::from_edges(config.num_vertices(), edges, args.threads).unwrap();
    println!("construction time: {} s", start.elapsed().as_secs_f64());

    let pool = Arc::new(
        ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build()
            .unwrap(),
    );

    // the reference run colors its own copy of the graph
    let sequential_total = (!args.no_verify).then(|| {
        let mut local = graph.clone();
        apply_coloring(&mut local, args.coloring.into());
        if args.scale < 5 {
            local.dump();
        }
        let oracle = PathCounter::new(Arc::new(local), pool.clone());
        let start = Instant::now();
        let total = oracle.count_sequential(&args.pattern);
        println!("sequential count time: {} s", start.elapsed().as_secs_f64());
        total
    });

    // delegated writes; every color is acknowledged before counting starts
    let mut partitioned = PartitionedGraph::new(graph, args.partitions);
    apply_coloring(&mut partitioned, args.coloring.into());
    let counter = PathCounter::new(Arc::new(partitioned), pool);
    let start = Instant::now();
    let parallel_total = counter.count_parallel(&args.pattern);
    println!("parallel count time: {} s", start.elapsed().as_secs_f64());

    println!("total runtime: {} s", run_start.elapsed().as_secs_f64());
    match sequential_total {
        Some(sequential_total) => {
            let report = CountReport::new(parallel_total, sequential_total);
            println!("{report}");
            if !report.is_consistent() {
                process::exit(1);
            }
        }
        None => println!("parallel: {parallel_total}"),
    }
}

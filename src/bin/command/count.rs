use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use isopath::color::apply_coloring;
use isopath::counter::PathCounter;
use isopath::graph::Graph;
use isopath::partition::PartitionedGraph;
use isopath::pattern::ColorPattern;
use rayon::ThreadPoolBuilder;

use super::ColoringArg;

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Specify an edge-list CSV input.
    #[arg(short, long, value_name = "EDGE_CSV", conflicts_with = "graph")]
    input: Option<PathBuf>,
    /// Specify a serialized graph input.
    #[arg(short, long, value_name = "GRAPH_FILE")]
    graph: Option<PathBuf>,
    /// Inline pattern, e.g. "0,1,0".
    #[arg(short, long, conflicts_with = "pattern_file")]
    pattern: Option<ColorPattern>,
    /// JSON file holding the pattern colors.
    #[arg(long, value_name = "PATTERN_JSON")]
    pattern_file: Option<PathBuf>,
    /// Coloring policy.
    #[arg(short, long, value_enum, default_value_t = ColoringArg::Parity)]
    coloring: ColoringArg,
    /// Specify the CSV delimiter.
    #[arg(long, value_name = "DELIMITER", default_value = ",")]
    delimiter: char,
    /// Specify the number of threads.
    #[arg(short, long, default_value = "4")]
    threads: usize,
    /// Number of graph partitions (delegate workers).
    #[arg(long, default_value = "4")]
    partitions: usize,
}

pub fn count(args: CountArgs) {
    let graph = match (&args.graph, &args.input) {
        (Some(path), _) => Graph::import_bincode(path).unwrap(),
        (None, Some(path)) => Graph::from_csv(path, args.delimiter as u8, args.threads).unwrap(),
        (None, None) => panic!("either --graph or --input is required"),
    };
    let pattern = match (args.pattern, &args.pattern_file) {
        (Some(pattern), _) => pattern,
        (None, Some(path)) => ColorPattern::import_json(path).unwrap(),
        (None, None) => panic!("either --pattern or --pattern-file is required"),
    };

    let pool = Arc::new(
        ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build()
            .unwrap(),
    );
    let mut partitioned = PartitionedGraph::new(graph, args.partitions);
    apply_coloring(&mut partitioned, args.coloring.into());
    let counter = PathCounter::new(Arc::new(partitioned), pool);

    let start = Instant::now();
    let total = counter.count_parallel(&pattern);
    println!("count time: {} s", start.elapsed().as_secs_f64());
    println!("{total}");
}

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use csv::WriterBuilder;
use isopath::generate::{generate_rmat, mirror_edges, GeneratorConfig};
use isopath::graph::Graph;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Edge-list CSV, one `src,dst` record per edge.
    Csv,
    /// Built graph serialized with bincode.
    Bincode,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Graph scale; the graph will have 2^scale vertices.
    #[arg(short, long, default_value = "3")]
    scale: u32,
    /// Approximate number of edges per vertex.
    #[arg(short, long, default_value = "1")]
    edgefactor: usize,
    /// Random seed for edge generation.
    #[arg(long, default_value = "12345")]
    seed: u64,
    /// Specify the output file.
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: PathBuf,
    /// Specify the output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Specify the CSV delimiter.
    #[arg(long, value_name = "DELIMITER", default_value = ",")]
    delimiter: char,
    /// Specify the number of graph building threads.
    #[arg(short, long, default_value = "4")]
    threads: usize,
    /// Keep generated edges one-directional.
    #[arg(long)]
    directed: bool,
}

pub fn generate(args: GenerateArgs) {
    println!("{:#?}", args);
    let config = GeneratorConfig {
        scale: args.scale,
        edge_factor: args.edgefactor,
        seed: args.seed,
    };

    let start = Instant::now();
    let mut edges = generate_rmat(&config).unwrap();
    if !args.directed {
        mirror_edges(&mut edges);
    }
    println!("generation time: {} s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    match args.format {
        OutputFormat::Csv => {
            let mut writer = WriterBuilder::new()
                .delimiter(args.delimiter as u8)
                .from_path(args.output)
                .unwrap();
            for (src, dst) in edges {
                writer
                    .write_record([src.to_string(), dst.to_string()])
                    .unwrap();
            }
            writer.flush().unwrap();
        }
        OutputFormat::Bincode => {
            let graph = Graph::from_edges(config.num_vertices(), edges, args.threads).unwrap();
            graph.export_bincode(args.output).unwrap();
        }
    }
    println!("export time: {} s", start.elapsed().as_secs_f64());
}

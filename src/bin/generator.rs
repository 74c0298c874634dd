use atomconf::generator::{GeneratorConfig, GeneratorError, generate_files};
use clap::Parser;
use std::path::PathBuf;
use std::process::exit;
use tracing::error;

/// Generates random atom configuration instances.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Arguments {
    /// Number of sites (and atoms)
    #[arg(short = 't', long = "sites")]
    pub num_sites: usize,

    /// Number of atom types, between 2 and 6
    #[arg(short = 'k', long = "types")]
    pub num_types: usize,

    /// Number of instances of the same size to generate
    #[arg(short = 'n', long = "instances", default_value_t = 1)]
    pub num_instances: usize,

    /// Seed of the random source; drawn from the operating system if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the instance files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(short, long)]
    pub quiet: bool,
}

fn generate(args: Arguments) -> Result<(), GeneratorError> {
    let config = GeneratorConfig {
        num_sites: args.num_sites,
        num_types: args.num_types,
        num_instances: args.num_instances,
        seed: args.seed,
        output_dir: args.output_dir,
    };

    generate_files(&config)?;
    Ok(())
}

fn main() {
    let args = Arguments::parse();
    let quiet = args.quiet;

    if !quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::INFO)
            .without_time()
            .init();
    }

    if let Err(e) = generate(args) {
        if quiet {
            eprintln!("Error: {e}");
        } else {
            error!("{e}");
        }
        exit(1)
    }
}

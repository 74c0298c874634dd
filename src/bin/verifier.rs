use atomconf::checks::checker::{CheckerError, check_instance_and_solution, check_instance_only};
use clap::Parser;
use std::path::PathBuf;
use std::process::exit;
use tracing::error;

/// Verifies candidate solutions for an instance and reports the objective value of the
/// last (best) one.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Arguments {
    /// Instance file
    #[arg(short = 'e', long)]
    pub instance: PathBuf,

    /// Solution file, one assignment per line; `-` reads from stdin. Without it, only the
    /// instance is checked
    #[arg(short, long)]
    pub solution: Option<PathBuf>,

    #[arg(short, long)]
    pub quiet: bool,

    /// Treat warnings about the instance as errors
    #[arg(short, long)]
    pub paranoid: bool,
}

fn check(args: &Arguments) -> Result<(), CheckerError> {
    if let Some(solution_path) = args.solution.as_ref() {
        let verdict = check_instance_and_solution(&args.instance, solution_path, args.paranoid)?;
        println!(
            "OK: the objective value of the last (best) solution is {}.",
            verdict.objective
        );
    } else {
        let instance = check_instance_only(&args.instance, args.paranoid)?;
        println!(
            "OK: instance with {} sites, {} types and {} edges.",
            instance.num_sites(),
            instance.num_types(),
            instance.num_edges()
        );
    }
    Ok(())
}

fn main() {
    let args = Arguments::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::INFO)
            .without_time()
            .init();
    }

    if let Err(e) = check(&args) {
        if args.quiet {
            eprintln!("Error: {e}");
        } else {
            error!("{e}");
        }
        exit(1)
    }
}

pub mod distribution;
pub mod graph;

use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::instance::Instance;
use distribution::{sample_cost_matrix, sample_type_distribution};
use graph::{EDGE_DENSITY, RandomGraph};

pub const MIN_TYPES: usize = 2;
pub const MAX_TYPES: usize = 6;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Number of types must be between {} and {}, got {found}", MIN_TYPES, MAX_TYPES)]
    InvalidTypeCount { found: usize },

    #[error("Number of sites must be at least 1")]
    InvalidSiteCount,

    #[error("Edge {{{u}, {v}}} added while connecting the graph already exists")]
    RepairEdgeExists { u: usize, v: usize },

    #[error("Invalid cost distribution: {0}")]
    CostDistribution(#[from] rand_distr::NormalError),

    #[error("Cannot write instance to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parameters of a batch of generated instances.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub num_sites: usize,
    pub num_types: usize,
    pub num_instances: usize,
    /// Without a seed, the random source is seeded from the operating system.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_dimensions(self.num_sites, self.num_types)
    }

    /// Name of the file holding the instance with the given 0-based index.
    pub fn file_name(&self, index: usize) -> String {
        format!("N{}_K{}_{}", self.num_sites, self.num_types, index)
    }

    pub fn file_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.file_name(index))
    }
}

fn validate_dimensions(num_sites: usize, num_types: usize) -> Result<(), GeneratorError> {
    if !(MIN_TYPES..=MAX_TYPES).contains(&num_types) {
        return Err(GeneratorError::InvalidTypeCount { found: num_types });
    }

    if num_sites == 0 {
        return Err(GeneratorError::InvalidSiteCount);
    }

    Ok(())
}

/// Generates a random instance whose graph is connected.
pub fn generate_instance(
    rng: &mut impl Rng,
    num_sites: usize,
    num_types: usize,
) -> Result<Instance, GeneratorError> {
    validate_dimensions(num_sites, num_types)?;

    let mut graph = RandomGraph::sample(rng, num_sites, EDGE_DENSITY);
    let sampled = graph.num_edges();
    let repairs = graph.connect(rng)?;
    debug!("Sampled {sampled} edges, added {repairs} to connect the graph");

    let type_distribution = sample_type_distribution(rng, num_sites, num_types);
    let costs = sample_cost_matrix(rng, num_types)?;

    Ok(Instance::new(
        num_sites,
        type_distribution,
        costs,
        graph.edges(),
    ))
}

/// Generates `config.num_instances` instances and writes each into its own file inside
/// `config.output_dir`. Returns the paths written.
pub fn generate_files(config: &GeneratorConfig) -> Result<Vec<PathBuf>, GeneratorError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut paths = Vec::with_capacity(config.num_instances);
    for index in 0..config.num_instances {
        let instance = generate_instance(&mut rng, config.num_sites, config.num_types)?;
        let path = config.file_path(index);
        write_instance(&instance, &path)?;

        info!(
            "Wrote {path:?}: {} sites, {} types, {} edges",
            instance.num_sites(),
            instance.num_types(),
            instance.num_edges()
        );
        paths.push(path);
    }

    Ok(paths)
}

fn write_instance(instance: &Instance, path: &Path) -> Result<(), GeneratorError> {
    instance
        .write_to_file(path)
        .map_err(|source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        })
}

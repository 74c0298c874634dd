use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::checks::{consistency::*, objective::compute_objective};
use crate::instance::Instance;
use crate::io::{instance_reader::InstanceReaderError, solution_reader::*};
use thiserror::Error;
use tracing::debug;

/// Path that makes the checker read the solutions from standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("Cannot open instance file {path:?}: {source}")]
    InstanceUnavailable {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open solution file {path:?}: {source}")]
    SolutionUnavailable {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("One or more of the provided solutions are inconsistent. {0}")]
    Inconsistent(#[from] ConsistencyError),

    /// Cannot be produced from text: [`Solution::parse`] rejects input without any row.
    #[error("No solution provided")]
    NoSolution,

    #[error(transparent)]
    InstanceReaderError(#[from] InstanceReaderError),

    #[error(transparent)]
    SolutionReaderError(#[from] SolutionReaderError),
}

/// Outcome of a successful verification.
pub struct Verdict {
    pub instance: Instance,
    pub solution: Solution,
    /// Objective value of the last (best) solution.
    pub objective: i128,
}

/// Where the candidate solutions are read from.
#[derive(Debug, PartialEq, Eq)]
pub enum SolutionSource<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> SolutionSource<'a> {
    /// [`STDIN_PATH`] selects standard input, everything else is a file path.
    pub fn from_path(path: &'a Path) -> Self {
        if path.as_os_str() == STDIN_PATH {
            SolutionSource::Stdin
        } else {
            SolutionSource::File(path)
        }
    }

    pub fn read(&self) -> Result<Solution, CheckerError> {
        match self {
            SolutionSource::Stdin => {
                debug!("Read solutions from stdin");
                Ok(Solution::read_from(std::io::stdin().lock())?)
            }
            SolutionSource::File(path) => Solution::read(path).map_err(|e| match e {
                SolutionReaderError::Io(source) => CheckerError::SolutionUnavailable {
                    path: path.to_path_buf(),
                    source,
                },
                e => e.into(),
            }),
        }
    }
}

pub fn check_instance_only(path: &Path, paranoid: bool) -> Result<Instance, CheckerError> {
    Ok(Instance::read(path, paranoid)?)
}

/// Checks all solutions for consistency with the instance and, if successful, returns the
/// objective value of the last one.
pub fn check_instance_and_solution(
    instance_path: &Path,
    solution_path: &Path,
    paranoid: bool,
) -> Result<Verdict, CheckerError> {
    let instance_reader = BufReader::new(File::open(instance_path).map_err(|source| {
        CheckerError::InstanceUnavailable {
            path: instance_path.to_path_buf(),
            source,
        }
    })?);
    let instance = Instance::read_from(instance_reader, paranoid)?;
    let solution = SolutionSource::from_path(solution_path).read()?;

    verify(instance, solution)
}

pub fn check_instance_and_solution_from(
    instance_reader: impl Read,
    solution_reader: impl Read,
    paranoid: bool,
) -> Result<Verdict, CheckerError> {
    let instance = Instance::read_from(instance_reader, paranoid)?;
    let solution = Solution::read_from(solution_reader)?;
    verify(instance, solution)
}

fn verify(instance: Instance, solution: Solution) -> Result<Verdict, CheckerError> {
    check_consistency(&instance, &solution)?;
    debug!("All {} solutions are consistent", solution.num_rows());

    let best = solution.best().ok_or(CheckerError::NoSolution)?;
    let objective = compute_objective(&instance, best);

    Ok(Verdict {
        instance,
        solution,
        objective,
    })
}

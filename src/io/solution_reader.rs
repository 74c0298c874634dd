use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// One or more whitespace separated non-negative integers; blank lines are allowed anywhere.
static SOLUTION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[0-9]+\s+)*[0-9]+\s*$").expect("valid regex"));

#[derive(Debug, Error)]
pub enum SolutionReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Error while reading solutions: {0}")]
    Fault(#[from] SolutionFault),
}

#[derive(Debug, Error, PartialEq)]
pub enum SolutionFault {
    #[error("Solutions have an invalid format; expected lines of non-negative integers. Received:\n{content}")]
    InvalidFormat { content: String },

    #[error("Line {} contains `{token}`, which is not a valid type label", lineno + 1)]
    LabelOverflow { lineno: usize, token: String },
}

/// Candidate assignments in the order they were produced; the last one is the best.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    rows: Vec<Vec<usize>>,
}

impl Solution {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// The last row, which by convention is the best solution found. Always `Some` for a
    /// solution obtained from [`Solution::parse`], which rejects input without rows.
    pub fn best(&self) -> Option<&[usize]> {
        self.rows.last().map(Vec::as_slice)
    }

    pub fn read(path: &Path) -> Result<Self, SolutionReaderError> {
        debug!("Read solutions from {path:?}");
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    pub fn read_from(mut reader: impl Read) -> Result<Self, SolutionReaderError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::parse(&content)?)
    }

    /// Validates the overall format and splits the content into rows; blank lines are dropped.
    pub fn parse(content: &str) -> Result<Self, SolutionFault> {
        if !SOLUTION_FORMAT.is_match(content) {
            return Err(SolutionFault::InvalidFormat {
                content: content.to_string(),
            });
        }

        let mut rows = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse().map_err(|_| SolutionFault::LabelOverflow {
                        lineno,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<usize>, _>>()?;

            rows.push(row);
        }

        debug!("Read {} candidate solutions", rows.len());
        Ok(Self { rows })
    }
}

use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::instance::{CostMatrix, Instance};

#[derive(Debug, Error)]
pub enum InstanceReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Error while reading instance: {0}")]
    Fault(#[from] InstanceFault),
    #[error("Warning while reading instance (paranoid mode): {0}")]
    Warning(#[from] InstanceWarning),
}

impl Instance {
    pub fn read(path: &Path, paranoid: bool) -> Result<Self, InstanceReaderError> {
        debug!("Read instance from {path:?}");
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), paranoid)
    }

    pub fn read_from(mut reader: impl Read, paranoid: bool) -> Result<Self, InstanceReaderError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut parser = InstanceParser::process(&content);

        if !parser.errors.is_empty() || !parser.warnings.is_empty() {
            for w in &parser.warnings {
                warn!(" {w}");
            }

            for e in &parser.errors {
                error!(" {e}");
            }

            if !parser.errors.is_empty() {
                return Err(InstanceReaderError::Fault(parser.errors.remove(0)));
            }

            if paranoid {
                return Err(InstanceReaderError::Warning(parser.warnings.remove(0)));
            }
        }

        Ok(parser.into_instance())
    }
}

//////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq)]
pub enum InstanceFault {
    #[error("Line {} cannot be parsed: {reason}", lineno + 1)]
    Unparseable { lineno: usize, reason: String },

    #[error("Type distribution in line {} has {found} entries, but the header announces {expected} types", lineno + 1)]
    DistributionLength {
        lineno: usize,
        expected: usize,
        found: usize,
    },

    #[error("Type distribution sums up to {found}, but the header announces {expected} sites")]
    DistributionSum { expected: usize, found: usize },

    #[error("Type distribution sums up to more than {}, but the header announces {expected} sites", usize::MAX)]
    DistributionOverflow { expected: usize },

    #[error("Cost matrix row in line {} has {found} entries, but expected {expected}", lineno + 1)]
    CostRowLength {
        lineno: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cost matrix has {found} rows, but expected {expected}")]
    CostRowCount { expected: usize, found: usize },

    #[error("Cost matrix is not symmetric: entries ({row}, {col}) and ({col}, {row}) differ")]
    AsymmetricCosts { row: usize, col: usize },

    #[error("Edge in line {} has {found} endpoints, but expected 2", lineno + 1)]
    MalformedEdge { lineno: usize, found: usize },

    #[error("Edge in line {} references site {site}, but sites are in [0, {num_sites})", lineno + 1)]
    EdgeOutOfRange {
        lineno: usize,
        site: usize,
        num_sites: usize,
    },

    #[error("Edge in line {} is a self-loop at site {site}", lineno + 1)]
    SelfLoop { lineno: usize, site: usize },

    #[error("Header indicates {expected} edges, but found {found}")]
    EdgeCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum InstanceWarning {
    #[error("Line {} should be blank; its content is ignored", lineno + 1)]
    NonBlankSeparator { lineno: usize },

    #[error("Edge in line {} was already listed before", lineno + 1)]
    DuplicateEdge { lineno: usize },

    #[error("The graph is not connected")]
    Disconnected,
}

#[derive(Default)]
pub struct InstanceParser {
    pub errors: Vec<InstanceFault>,
    pub warnings: Vec<InstanceWarning>,
    pub header: Option<(usize, usize, usize)>,
    pub type_distribution: Vec<usize>,
    pub cost_rows: Vec<Vec<i64>>,
    pub edges: Vec<(usize, usize)>,
}

fn parse_row<T: FromStr>(lineno: usize, line: &str) -> Result<Vec<T>, InstanceFault> {
    line.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| InstanceFault::Unparseable {
                lineno,
                reason: format!("`{token}` is not a valid number"),
            })
        })
        .collect()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl InstanceParser {
    pub fn process(content: &str) -> InstanceParser {
        let mut parser = InstanceParser::default();

        if let Err(e) = parser.parse_sections(content) {
            parser.errors.push(e);
            return parser;
        }

        parser.check_invariants();
        parser
    }

    fn parse_sections(&mut self, content: &str) -> Result<(), InstanceFault> {
        let mut lines = content.lines().enumerate();
        let mut next_lineno = 0;

        let mut next_line = |what: &'static str| match lines.next() {
            Some((lineno, line)) => {
                next_lineno = lineno + 1;
                Ok((lineno, line))
            }
            None => Err(InstanceFault::Unparseable {
                lineno: next_lineno,
                reason: format!("unexpected end of file, expected {what}"),
            }),
        };

        // header
        let (lineno, line) = next_line("the header")?;
        let header: Vec<usize> = parse_row(lineno, line)?;
        let [num_sites, num_types, num_edges] = header[..] else {
            return Err(InstanceFault::Unparseable {
                lineno,
                reason: format!(
                    "header must contain exactly three numbers (sites, types, edges), found {}",
                    header.len()
                ),
            });
        };
        self.header = Some((num_sites, num_types, num_edges));

        let (lineno, line) = next_line("a blank line")?;
        if !is_blank(line) {
            self.warnings
                .push(InstanceWarning::NonBlankSeparator { lineno });
        }

        // type distribution
        let (lineno, line) = next_line("the type distribution")?;
        self.type_distribution = parse_row(lineno, line)?;
        if self.type_distribution.len() != num_types {
            return Err(InstanceFault::DistributionLength {
                lineno,
                expected: num_types,
                found: self.type_distribution.len(),
            });
        }

        let (lineno, line) = next_line("a blank line")?;
        if !is_blank(line) {
            self.warnings
                .push(InstanceWarning::NonBlankSeparator { lineno });
        }

        // cost matrix: rows up to the next blank line (or end of file)
        for (lineno, line) in lines.by_ref() {
            if is_blank(line) {
                break;
            }

            let row: Vec<i64> = parse_row(lineno, line)?;
            if row.len() != num_types {
                return Err(InstanceFault::CostRowLength {
                    lineno,
                    expected: num_types,
                    found: row.len(),
                });
            }
            self.cost_rows.push(row);
        }

        if self.cost_rows.len() != num_types {
            return Err(InstanceFault::CostRowCount {
                expected: num_types,
                found: self.cost_rows.len(),
            });
        }

        // edges
        let mut seen = HashSet::new();
        for (lineno, line) in lines {
            if is_blank(line) {
                continue;
            }

            let row: Vec<usize> = parse_row(lineno, line)?;
            let [u, v] = row[..] else {
                return Err(InstanceFault::MalformedEdge {
                    lineno,
                    found: row.len(),
                });
            };

            if let Some(&site) = [u, v].iter().find(|&&s| s >= num_sites) {
                return Err(InstanceFault::EdgeOutOfRange {
                    lineno,
                    site,
                    num_sites,
                });
            }

            if u == v {
                return Err(InstanceFault::SelfLoop { lineno, site: u });
            }

            if !seen.insert((u.min(v), u.max(v))) {
                self.warnings.push(InstanceWarning::DuplicateEdge { lineno });
            }

            self.edges.push((u, v));
        }

        Ok(())
    }

    fn check_invariants(&mut self) {
        let Some((num_sites, _, num_edges)) = self.header else {
            return;
        };

        let total = self
            .type_distribution
            .iter()
            .try_fold(0usize, |acc, &count| acc.checked_add(count));
        match total {
            None => self.errors.push(InstanceFault::DistributionOverflow {
                expected: num_sites,
            }),
            Some(total) if total != num_sites => {
                self.errors.push(InstanceFault::DistributionSum {
                    expected: num_sites,
                    found: total,
                })
            }
            Some(_) => {}
        }

        let costs = CostMatrix::new(self.cost_rows.clone());
        if let Some((row, col)) = costs.first_asymmetry() {
            self.errors
                .push(InstanceFault::AsymmetricCosts { row, col });
        }

        if self.edges.len() != num_edges {
            self.errors.push(InstanceFault::EdgeCountMismatch {
                expected: num_edges,
                found: self.edges.len(),
            });
        }

        if !self.errors.is_empty() {
            return;
        }

        // fewer than `num_sites - 1` edges cannot connect the graph; this also keeps huge
        // site counts from reaching the traversal
        if self.edges.len().saturating_add(1) < num_sites || !self.build_instance().is_connected() {
            self.warnings.push(InstanceWarning::Disconnected);
        }
    }

    fn build_instance(&self) -> Instance {
        let num_sites = self.header.map_or(0, |h| h.0);
        Instance::new(
            num_sites,
            self.type_distribution.clone(),
            CostMatrix::new(self.cost_rows.clone()),
            self.edges.clone(),
        )
    }

    pub fn into_instance(self) -> Instance {
        let num_sites = self.header.map_or(0, |h| h.0);
        Instance::new(
            num_sites,
            self.type_distribution,
            CostMatrix::new(self.cost_rows),
            self.edges,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH4: &str = "4 2 3\n\n2 2\n\n0 1\n1 0\n\n0 1\n1 2\n2 3\n";

    #[test]
    fn read_path4() {
        let instance = Instance::read_from(PATH4.as_bytes(), true).unwrap();
        assert_eq!(instance, crate::instance::tests::path4());
    }

    #[test]
    fn missing_trailing_newline_and_blank_edge_lines() {
        let data = "4 2 3\n\n2 2\n\n0 1\n1 0\n\n0 1\n\n1 2\n2 3";
        let instance = Instance::read_from(data.as_bytes(), true).unwrap();
        assert_eq!(instance.num_edges(), 3);
    }

    #[test]
    fn negative_costs() {
        let data = "2 2 1\n\n1 1\n\n-3 7\n7 -12\n\n1 0\n";
        let instance = Instance::read_from(data.as_bytes(), true).unwrap();
        assert_eq!(instance.cost(0, 0), -3);
        assert_eq!(instance.cost(1, 1), -12);
        assert_eq!(instance.edges(), &[(1, 0)]);
    }

    #[test]
    fn non_blank_separator_is_a_warning() {
        let data = "2 2 1\nfoo\n1 1\n\n0 1\n1 0\n\n0 1\n";
        let parser = InstanceParser::process(data);
        assert!(parser.errors.is_empty(), "{:?}", parser.errors);
        assert_eq!(
            parser.warnings,
            vec![InstanceWarning::NonBlankSeparator { lineno: 1 }]
        );

        assert!(Instance::read_from(data.as_bytes(), false).is_ok());
        assert!(matches!(
            Instance::read_from(data.as_bytes(), true),
            Err(InstanceReaderError::Warning(
                InstanceWarning::NonBlankSeparator { lineno: 1 }
            ))
        ));
    }

    #[test]
    fn disconnected_is_a_warning() {
        let data = "4 1 2\n\n4\n\n1\n\n0 1\n2 3\n";
        let parser = InstanceParser::process(data);
        assert!(parser.errors.is_empty());
        assert_eq!(parser.warnings, vec![InstanceWarning::Disconnected]);
    }

    #[test]
    fn too_few_edges_for_huge_site_count() {
        let data = "100000000000 2 0\n\n50000000000 50000000000\n\n0 0\n0 0\n";
        let parser = InstanceParser::process(data);
        assert!(parser.errors.is_empty(), "{:?}", parser.errors);
        assert_eq!(parser.warnings, vec![InstanceWarning::Disconnected]);

        assert!(matches!(
            Instance::read_from(data.as_bytes(), true),
            Err(InstanceReaderError::Warning(InstanceWarning::Disconnected))
        ));
    }

    #[test]
    fn duplicate_edge_is_a_warning() {
        let data = "2 1 2\n\n2\n\n1\n\n0 1\n1 0\n";
        let parser = InstanceParser::process(data);
        assert!(parser.errors.is_empty());
        assert_eq!(
            parser.warnings,
            vec![InstanceWarning::DuplicateEdge { lineno: 7 }]
        );
    }

    macro_rules! assert_raises_error {
        ($name : ident, $str : expr, $pat : pat) => {
            #[test]
            fn $name() {
                let parser = InstanceParser::process($str);
                assert!(
                    parser.errors.iter().any(|e| matches!(e, $pat)),
                    "Errors: {:#?}",
                    parser.errors
                );
            }
        };
    }

    assert_raises_error!(empty, "", InstanceFault::Unparseable { lineno: 0, .. });

    assert_raises_error!(
        short_header,
        "4 2\n\n2 2\n",
        InstanceFault::Unparseable { lineno: 0, .. }
    );

    assert_raises_error!(
        non_numeric_token,
        "4 2 3\n\n2 x\n",
        InstanceFault::Unparseable { lineno: 2, .. }
    );

    assert_raises_error!(
        truncated_before_distribution,
        "4 2 3\n\n",
        InstanceFault::Unparseable { lineno: 2, .. }
    );

    assert_raises_error!(
        distribution_length,
        "4 2 3\n\n1 1 2\n\n0 1\n1 0\n\n0 1\n1 2\n2 3\n",
        InstanceFault::DistributionLength {
            lineno: 2,
            expected: 2,
            found: 3
        }
    );

    assert_raises_error!(
        distribution_sum,
        "4 2 3\n\n2 1\n\n0 1\n1 0\n\n0 1\n1 2\n2 3\n",
        InstanceFault::DistributionSum {
            expected: 4,
            found: 3
        }
    );

    assert_raises_error!(
        distribution_sum_overflow,
        "2 2 1\n\n18446744073709551615 3\n\n0 0\n0 0\n\n0 1\n",
        InstanceFault::DistributionOverflow { expected: 2 }
    );

    assert_raises_error!(
        cost_row_length,
        "4 2 3\n\n2 2\n\n0 1 5\n1 0\n\n0 1\n1 2\n2 3\n",
        InstanceFault::CostRowLength {
            lineno: 4,
            expected: 2,
            found: 3
        }
    );

    assert_raises_error!(
        cost_row_count,
        "4 2 3\n\n2 2\n\n0 1\n\n0 1\n1 2\n2 3\n",
        InstanceFault::CostRowCount {
            expected: 2,
            found: 1
        }
    );

    assert_raises_error!(
        asymmetric_costs,
        "4 2 3\n\n2 2\n\n0 1\n2 0\n\n0 1\n1 2\n2 3\n",
        InstanceFault::AsymmetricCosts { row: 0, col: 1 }
    );

    assert_raises_error!(
        edge_out_of_range,
        "4 2 3\n\n2 2\n\n0 1\n1 0\n\n0 1\n1 4\n2 3\n",
        InstanceFault::EdgeOutOfRange {
            lineno: 8,
            site: 4,
            num_sites: 4
        }
    );

    assert_raises_error!(
        malformed_edge,
        "4 2 3\n\n2 2\n\n0 1\n1 0\n\n0 1\n1 2 3\n2 3\n",
        InstanceFault::MalformedEdge {
            lineno: 8,
            found: 3
        }
    );

    assert_raises_error!(
        self_loop,
        "4 2 3\n\n2 2\n\n0 1\n1 0\n\n0 1\n2 2\n2 3\n",
        InstanceFault::SelfLoop { lineno: 8, site: 2 }
    );

    assert_raises_error!(
        edge_count_mismatch,
        "4 2 4\n\n2 2\n\n0 1\n1 0\n\n0 1\n1 2\n2 3\n",
        InstanceFault::EdgeCountMismatch {
            expected: 4,
            found: 3
        }
    );
}

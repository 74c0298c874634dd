use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use super::GeneratorError;

/// Probability with which each pair of sites is joined by an edge before the graph is
/// made connected.
pub const EDGE_DENSITY: f64 = 0.2;

/// Undirected simple graph stored as an adjacency matrix.
pub struct RandomGraph {
    adjacency: Vec<Vec<bool>>,
    num_edges: usize,
}

impl RandomGraph {
    pub fn empty(num_sites: usize) -> Self {
        Self {
            adjacency: vec![vec![false; num_sites]; num_sites],
            num_edges: 0,
        }
    }

    /// Includes every unordered pair of sites independently with probability `density`.
    pub fn sample(rng: &mut impl Rng, num_sites: usize, density: f64) -> Self {
        let mut graph = Self::empty(num_sites);
        for u in 0..num_sites {
            for v in u + 1..num_sites {
                if rng.gen_bool(density) {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }

    pub fn num_sites(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u][v]
    }

    /// Adds the edge `{u, v}`. Returns false if it was already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if self.adjacency[u][v] {
            return false;
        }
        self.adjacency[u][v] = true;
        self.adjacency[v][u] = true;
        self.num_edges += 1;
        true
    }

    /// Makes the graph connected. A breadth-first search starts at site 0; whenever it runs
    /// dry before covering every site, the lowest unvisited site is attached to a uniformly
    /// chosen site of the part explored so far and the search continues from there.
    /// Exactly one edge is added per component not containing site 0; their number is
    /// returned.
    pub fn connect(&mut self, rng: &mut impl Rng) -> Result<usize, GeneratorError> {
        let n = self.num_sites();
        if n == 0 {
            return Ok(0);
        }

        let mut visited = vec![false; n];
        let mut explored = Vec::with_capacity(n);
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        let mut repairs = 0;

        loop {
            while let Some(u) = queue.pop_front() {
                explored.push(u);
                for v in 0..n {
                    if self.adjacency[u][v] && !visited[v] {
                        visited[v] = true;
                        queue.push_back(v);
                    }
                }
            }

            let Some(site) = visited.iter().position(|&v| !v) else {
                break;
            };

            let anchor = explored[rng.gen_range(0..explored.len())];
            if !self.add_edge(anchor, site) {
                return Err(GeneratorError::RepairEdgeExists { u: anchor, v: site });
            }

            visited[site] = true;
            queue.push_back(site);
            repairs += 1;
        }

        debug!("Added {repairs} edges to connect {n} sites");
        Ok(repairs)
    }

    /// All edges `(u, v)` with `u < v` in lexicographic order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.num_sites();
        let mut edges = Vec::with_capacity(self.num_edges);
        for u in 0..n {
            for v in u + 1..n {
                if self.adjacency[u][v] {
                    edges.push((u, v));
                }
            }
        }
        edges
    }
}

use std::collections::VecDeque;

/// Symmetric matrix of interaction costs between pairs of atom types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: Vec<Vec<i64>>,
}

impl CostMatrix {
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// Matrix of `num_types x num_types` zeros.
    pub fn zeros(num_types: usize) -> Self {
        Self {
            rows: vec![vec![0; num_types]; num_types],
        }
    }

    pub fn num_types(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, a: usize, b: usize) -> i64 {
        self.rows[a][b]
    }

    /// Sets both `[a][b]` and `[b][a]`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, cost: i64) {
        self.rows[a][b] = cost;
        self.rows[b][a] = cost;
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Returns the first pair `(i, j)` with `[i][j] != [j][i]`, if any.
    pub fn first_asymmetry(&self) -> Option<(usize, usize)> {
        (0..self.rows.len())
            .flat_map(|i| (i + 1..self.rows.len()).map(move |j| (i, j)))
            .find(|&(i, j)| self.rows[i][j] != self.rows[j][i])
    }
}

/// A problem instance: a graph over `num_sites` sites, the number of sites each atom type
/// has to occupy and the interaction costs between types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    num_sites: usize,
    type_distribution: Vec<usize>,
    costs: CostMatrix,
    edges: Vec<(usize, usize)>,
}

impl Instance {
    pub fn new(
        num_sites: usize,
        type_distribution: Vec<usize>,
        costs: CostMatrix,
        edges: Vec<(usize, usize)>,
    ) -> Self {
        debug_assert_eq!(type_distribution.len(), costs.num_types());
        Self {
            num_sites,
            type_distribution,
            costs,
            edges,
        }
    }

    pub fn num_sites(&self) -> usize {
        self.num_sites
    }

    pub fn num_types(&self) -> usize {
        self.type_distribution.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn type_distribution(&self) -> &[usize] {
        &self.type_distribution
    }

    /// Number of sites that must carry `type_index` in every valid solution.
    pub fn expected_count(&self, type_index: usize) -> usize {
        self.type_distribution[type_index]
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    pub fn cost(&self, a: usize, b: usize) -> i64 {
        self.costs.get(a, b)
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Adjacency lists of the undirected graph.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.num_sites];
        for &(u, v) in &self.edges {
            adj[u].push(v);
            adj[v].push(u);
        }
        adj
    }

    /// Returns true if every site is reachable from site 0.
    pub fn is_connected(&self) -> bool {
        if self.num_sites == 0 {
            return true;
        }

        let adj = self.neighbors();
        let mut visited = vec![false; self.num_sites];
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        let mut reached = 1;

        while let Some(u) = queue.pop_front() {
            for &v in &adj[u] {
                if !visited[v] {
                    visited[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }

        reached == self.num_sites
    }
}

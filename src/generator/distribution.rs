use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::instance::CostMatrix;

use super::GeneratorError;

/// Upper bound (inclusive) on the number of exchange rounds applied to a type distribution.
pub const MAX_EXCHANGE_ROUNDS: usize = 10;

pub const COST_MEAN: f64 = 2.0;
pub const COST_STD_DEV: f64 = 5.0;

/// Draws a uniformly random type for each site and skews the resulting counts with a
/// random number of exchange rounds.
pub fn sample_type_distribution(
    rng: &mut impl Rng,
    num_sites: usize,
    num_types: usize,
) -> Vec<usize> {
    let mut counts = vec![0; num_types];
    for _ in 0..num_sites {
        counts[rng.gen_range(0..num_types)] += 1;
    }

    let rounds = rng.gen_range(0..=MAX_EXCHANGE_ROUNDS);
    exchange(rng, &mut counts, rounds);
    counts
}

/// Each round moves half (rounded down) of a random type's sites to another, distinct, random
/// type. The total is preserved; a type may end up without any site.
pub fn exchange(rng: &mut impl Rng, counts: &mut [usize], rounds: usize) {
    let num_types = counts.len();
    if num_types < 2 {
        return;
    }

    for _ in 0..rounds {
        let from = rng.gen_range(0..num_types);
        let to = (from + rng.gen_range(1..num_types)) % num_types;
        let moved = counts[from] / 2;
        counts[from] -= moved;
        counts[to] += moved;
    }
}

/// Symmetric matrix with entries drawn from a normal distribution and rounded to integers.
pub fn sample_cost_matrix(
    rng: &mut impl Rng,
    num_types: usize,
) -> Result<CostMatrix, GeneratorError> {
    let normal = Normal::new(COST_MEAN, COST_STD_DEV)?;
    let mut costs = CostMatrix::zeros(num_types);

    for i in 0..num_types {
        for j in i..num_types {
            costs.set_symmetric(i, j, normal.sample(rng).round() as i64);
        }
    }

    Ok(costs)
}

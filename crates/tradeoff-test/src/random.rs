//! Seeded random instances for agreement tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tradeoff_core::{Contribution, Instance};

/// Deterministic generator for a test seed.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Random instance with up to `max_pros` Pros and `max_cons` Cons.
///
/// Values are multiples of 5 in `5..=60`, so equal values and exact
/// zero-balance groups show up regularly.
pub fn instance<R: Rng>(rng: &mut R, max_pros: usize, max_cons: usize) -> Instance {
    let pro_count = rng.random_range(0..=max_pros);
    let con_count = rng.random_range(0..=max_cons);

    let pros = (0..pro_count).map(|i| {
        let value = 5 * rng.random_range(1..=12i64);
        Contribution::new(format!("P{i}"), value)
    });
    let pros: Vec<Contribution> = pros.collect();
    let cons: Vec<Contribution> = (0..con_count)
        .map(|i| {
            let value = -5 * rng.random_range(1..=12i64);
            Contribution::new(format!("C{i}"), value)
        })
        .collect();

    Instance::from_contributions(pros.into_iter().chain(cons))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_instance() {
        let a = instance(&mut seeded(7), 4, 4);
        let b = instance(&mut seeded(7), 4, 4);
        assert_eq!(a, b);
        assert!(a.neutrals().is_empty());
    }
}

//! Seeded random workloads.
//!
//! Produces reproducible process batches for demos, benchmarks of the
//! policies against each other, and tests. The same seed and parameters
//! always yield the same batch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::ProcessInput;

/// Generator of random process batches.
///
/// Arrivals are uniform in `0..=max_arrival`. Bursts are drawn from a
/// short/long mix: with probability `short_fraction` uniform in
/// `1..=short_burst`, otherwise uniform in `short_burst + 1..=long_burst`.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    count: usize,
    max_arrival: i64,
    short_fraction: f64,
    short_burst: i64,
    long_burst: i64,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes.
    pub fn new(seed: u64, count: usize) -> Self {
        Self {
            seed,
            count,
            max_arrival: 10,
            short_fraction: 0.5,
            short_burst: 3,
            long_burst: 8,
        }
    }

    /// Sets the latest possible arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the short/long burst mix.
    ///
    /// `long_burst` is raised to at least `short_burst` and `short_burst`
    /// to at least 1.
    pub fn with_burst_mix(
        mut self,
        short_fraction: f64,
        short_burst: i64,
        long_burst: i64,
    ) -> Self {
        self.short_fraction = short_fraction.clamp(0.0, 1.0);
        self.short_burst = short_burst.max(1);
        self.long_burst = long_burst.max(self.short_burst);
        self
    }

    /// Generates the batch, ids left for the engine to assign.
    pub fn generate(&self) -> Vec<ProcessInput> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        (0..self.count)
            .map(|_| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let short = self.long_burst == self.short_burst
                    || rng.random::<f64>() < self.short_fraction;
                let burst = if short {
                    rng.random_range(1..=self.short_burst)
                } else {
                    rng.random_range(self.short_burst + 1..=self.long_burst)
                };
                ProcessInput::new(burst).arriving_at(arrival)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_batch;

    #[test]
    fn test_same_seed_same_batch() {
        let a = WorkloadGenerator::new(42, 20).generate();
        let b = WorkloadGenerator::new(42, 20).generate();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn test_respects_bounds() {
        let batch = WorkloadGenerator::new(7, 200)
            .with_max_arrival(5)
            .with_burst_mix(0.3, 2, 6)
            .generate();

        assert!(validate_batch(&batch).is_ok());
        for p in &batch {
            assert!((0..=5).contains(&p.arrival));
            assert!((1..=6).contains(&p.burst));
        }
    }

    #[test]
    fn test_degenerate_mix() {
        let batch = WorkloadGenerator::new(1, 50)
            .with_burst_mix(0.0, 4, 4)
            .generate();
        assert!(batch.iter().all(|p| (1..=4).contains(&p.burst)));
    }

    #[test]
    fn test_empty() {
        assert!(WorkloadGenerator::new(0, 0).generate().is_empty());
    }
}

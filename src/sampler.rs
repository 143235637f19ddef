//! Random raw-record samples from a trip table.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::debug;

use crate::table::{TripRecord, TripTable};

/// Number of raw records shown per request.
pub const SAMPLE_SIZE: usize = 5;

/// Draws independent samples on each call. Seed it for repeatable output.
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Up to `n` distinct records, chosen without replacement.
    /// Tables smaller than `n` are returned whole, in random order.
    pub fn sample<'a>(&mut self, table: &'a TripTable, n: usize) -> Vec<&'a TripRecord> {
        let amount = n.min(table.len());
        let records = table.records();
        let picked: Vec<&TripRecord> = index::sample(&mut self.rng, records.len(), amount)
            .into_iter()
            .map(|i| &records[i])
            .collect();

        debug!(requested = n, returned = picked.len(), "Sampled raw records");
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn test_sample_returns_five_distinct() {
        let table = table_of(20);
        let mut sampler = Sampler::new(Some(7));
        let picked = sampler.sample(&table, SAMPLE_SIZE);

        assert_eq!(picked.len(), 5);
        let ids: HashSet<_> = picked.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 5);
        assert!(picked.iter().all(|t| table.records().contains(*t)));
    }

    #[test]
    fn test_sample_small_table_returns_all() {
        let table = table_of(3);
        let mut sampler = Sampler::new(None);

        assert_eq!(sampler.sample(&table, SAMPLE_SIZE).len(), 3);
    }

    #[test]
    fn test_sample_empty_table() {
        let table = table_of(0);
        let mut sampler = Sampler::new(None);

        assert!(sampler.sample(&table, SAMPLE_SIZE).is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let table = table_of(50);
        let a: Vec<_> = Sampler::new(Some(42))
            .sample(&table, SAMPLE_SIZE)
            .into_iter()
            .cloned()
            .collect();
        let b: Vec<_> = Sampler::new(Some(42))
            .sample(&table, SAMPLE_SIZE)
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(a, b);
    }

    // Helper functions for tests
    fn table_of(n: usize) -> TripTable {
        let start = NaiveDate::from_ymd_opt(2017, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let records = (0..n)
            .map(|i| {
                let mut t = TripRecord::new(start, i as f64, "A", "B", "Subscriber");
                t.id = Some(i.to_string());
                t
            })
            .collect();
        TripTable::new(Schema::full(), records)
    }
}

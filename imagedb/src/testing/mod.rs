//! Seeded workload runner for the image index.
//!
//! Drives an [`ImageIndex`] with random inserts and queries and checks it
//! against a plain `BTreeSet` model after every operation, along with the
//! structural invariants of the tree. Given the same seed, the run is
//! identical.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::index::{ImageIndex, Insertion, InvariantViolation};

/// Shape of a random workload.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Number of operations to run.
    pub operations: usize,
    /// Probability of a query instead of an insert (0.0 - 1.0).
    pub query_rate: f64,
    /// Number of distinct values per attribute level.
    pub attribute_pool: usize,
    /// Number of distinct filenames.
    pub filename_pool: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            operations: 500,
            query_rate: 0.3,
            attribute_pool: 4,
            filename_pool: 12,
        }
    }
}

type ModelRecord = [String; 4];

/// A mismatch between the index and the model.
#[allow(dead_code)] // Fields are read through Debug in failure messages
#[derive(Debug)]
pub enum WorkloadFailure {
    Invariant {
        operation: usize,
        violation: InvariantViolation,
    },
    Diverged {
        operation: usize,
        detail: String,
    },
}

/// Run a random workload and report the first failure.
pub fn run_workload(seed: u64, config: &WorkloadConfig) -> Result<ImageIndex, WorkloadFailure> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut index = ImageIndex::new();
    let mut model: BTreeSet<ModelRecord> = BTreeSet::new();

    for operation in 0..config.operations {
        let attributes = [
            pick(&mut rng, "a", config.attribute_pool),
            pick(&mut rng, "b", config.attribute_pool),
            pick(&mut rng, "c", config.attribute_pool),
        ];

        if rng.random::<f64>() < config.query_rate {
            let expected: Vec<&str> = model
                .iter()
                .filter(|record| record[..3] == attributes[..])
                .map(|record| record[3].as_str())
                .collect();
            let actual = index
                .lookup([&attributes[0], &attributes[1], &attributes[2]])
                .unwrap_or_default();
            if actual != expected {
                return Err(WorkloadFailure::Diverged {
                    operation,
                    detail: format!("query {attributes:?}: got {actual:?}, expected {expected:?}"),
                });
            }
        } else {
            let filename = pick(&mut rng, "file", config.filename_pool);
            let [first, second, third] = attributes;
            let record = [first, second, third, filename];

            let outcome = index
                .insert([&record[0], &record[1], &record[2], &record[3]])
                .map_err(|e| WorkloadFailure::Diverged {
                    operation,
                    detail: format!("insert failed: {e}"),
                })?;
            let expected = if model.insert(record) {
                Insertion::Inserted
            } else {
                Insertion::AlreadyIndexed
            };
            if outcome != expected {
                return Err(WorkloadFailure::Diverged {
                    operation,
                    detail: format!("insert returned {outcome:?}, expected {expected:?}"),
                });
            }
        }

        index
            .check_invariants()
            .map_err(|violation| WorkloadFailure::Invariant {
                operation,
                violation,
            })?;
    }

    let listed: Vec<ModelRecord> = index
        .records()
        .iter()
        .map(|r| {
            let [first, second, third] = r.attributes.map(str::to_string);
            [first, second, third, r.filename.to_string()]
        })
        .collect();
    let expected: Vec<ModelRecord> = model.into_iter().collect();
    if listed != expected {
        return Err(WorkloadFailure::Diverged {
            operation: config.operations,
            detail: format!("listing has {} records, model {}", listed.len(), expected.len()),
        });
    }

    Ok(index)
}

fn pick(rng: &mut StdRng, prefix: &str, pool: usize) -> String {
    format!("{prefix}{}", rng.random_range(0..pool.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workload_many_seeds() {
        for seed in 0..20 {
            if let Err(failure) = run_workload(seed, &WorkloadConfig::default()) {
                panic!("seed {seed} failed: {failure:?}");
            }
        }
    }

    #[test]
    fn test_wide_workload() {
        let config = WorkloadConfig {
            operations: 300,
            query_rate: 0.1,
            attribute_pool: 20,
            filename_pool: 50,
        };
        let index = run_workload(99, &config).expect("workload");
        assert!(!index.is_empty());
    }

    #[test]
    fn test_narrow_workload_mostly_duplicates() {
        let config = WorkloadConfig {
            operations: 200,
            query_rate: 0.0,
            attribute_pool: 1,
            filename_pool: 2,
        };
        let index = run_workload(5, &config).expect("workload");
        assert!(index.len() <= 2);
        // root + three attribute nodes + at most two filenames
        assert!(index.node_count() <= 6);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let config = WorkloadConfig::default();
        let first = run_workload(1234, &config).expect("workload");
        let second = run_workload(1234, &config).expect("workload");

        let mut first_out = Vec::new();
        let mut second_out = Vec::new();
        first.print(&mut first_out).expect("print");
        second.print(&mut second_out).expect("print");
        assert_eq!(first_out, second_out);
    }
}

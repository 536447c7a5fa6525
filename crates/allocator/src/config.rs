use serde::{Deserialize, Serialize};

/// Configuration for one allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Minimum number of records targeted for the test split
    pub test_min_records: usize,

    /// Minimum number of records targeted for the dev split
    pub dev_min_records: usize,

    /// Seed for the packet shuffle. Fixed so that two runs over the
    /// same input produce byte-identical output.
    pub shuffle_seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_min_records: 1000,
            dev_min_records: 1000,
            shuffle_seed: 42,
        }
    }
}

impl SplitConfig {
    /// Create a config with explicit split floors and the default seed
    #[must_use]
    pub fn with_minimums(test_min_records: usize, dev_min_records: usize) -> Self {
        Self {
            test_min_records,
            dev_min_records,
            ..Default::default()
        }
    }
}

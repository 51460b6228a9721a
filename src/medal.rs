use serde::{Deserialize, Serialize};

/// Score tier awarded for a solution's total instruction count.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    /// At or under the gold threshold.
    Gold,
    /// At or under the silver threshold.
    Silver,
    /// At or under the bronze threshold.
    Bronze,
    /// Over every threshold.
    None,
}

/// Per-level instruction-count thresholds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MedalThresholds {
    /// Largest size still awarded gold.
    pub gold: usize,
    /// Largest size still awarded silver.
    pub silver: usize,
    /// Largest size still awarded bronze.
    pub bronze: usize,
}

impl MedalThresholds {
    /// Tier for a solved program of `size` total instructions. The input is
    /// the program's instruction count, not the steps its run consumed.
    pub fn score(&self, size: usize) -> Medal {
        if size <= self.gold {
            Medal::Gold
        } else if size <= self.silver {
            Medal::Silver
        } else if size <= self.bronze {
            Medal::Bronze
        } else {
            Medal::None
        }
    }
}

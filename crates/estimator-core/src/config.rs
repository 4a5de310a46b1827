//! Stock constants and tunable estimator settings.

use serde::{Deserialize, Serialize};

/// Length of the short standard stock pipe, in inches.
pub const SMALL_STOCK_LENGTH: f64 = 180.0;

/// Length of the long standard stock pipe, in inches.
pub const LARGE_STOCK_LENGTH: f64 = 192.0;

/// Upper bound on the sum of any enumerated combination.
pub const COMBINATION_CEILING: f64 = 192.0;

/// Waste (inches) at or above which a pipe is billed as partial.
pub const DEFAULT_MIN_WASTE: f64 = 36.0;

/// Maximum number of search nodes visited in one combination enumeration.
pub const DEFAULT_COMBINATION_BUDGET: usize = 2_000_000;

/// Tolerance used when comparing summed lengths against stock sizes.
pub const LENGTH_EPSILON: f64 = 1e-9;

/// Settings that tune the planner but are not part of an estimation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Enumeration ceiling for combination sums. Raised automatically when an
    /// extra stock size is longer.
    pub combination_ceiling: f64,
    /// Node budget for a single combination enumeration.
    pub combination_budget: usize,
    /// Fail with `CutExceedsStock` instead of reporting unassigned cuts.
    pub strict: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            combination_ceiling: COMBINATION_CEILING,
            combination_budget: DEFAULT_COMBINATION_BUDGET,
            strict: false,
        }
    }
}

impl EstimatorConfig {
    /// Returns a copy with strict mode toggled.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Which standard stock sizes are available for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockOptions {
    /// Offer 180" pipes.
    pub small: bool,
    /// Offer 192" pipes.
    pub large: bool,
}

impl Default for StockOptions {
    fn default() -> Self {
        Self {
            small: true,
            large: true,
        }
    }
}

impl StockOptions {
    /// The enabled standard sizes, short size first.
    pub fn sizes(&self) -> Vec<f64> {
        let mut sizes = Vec::with_capacity(2);
        if self.small {
            sizes.push(SMALL_STOCK_LENGTH);
        }
        if self.large {
            sizes.push(LARGE_STOCK_LENGTH);
        }
        sizes
    }
}

/// Bucket a stock length falls into for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockBucket {
    Small,
    Large,
    Extra,
}

impl StockBucket {
    /// Classifies a pipe length into the 180, 192 or extra bucket.
    pub fn of(length: f64) -> Self {
        if (length - SMALL_STOCK_LENGTH).abs() < LENGTH_EPSILON {
            StockBucket::Small
        } else if (length - LARGE_STOCK_LENGTH).abs() < LENGTH_EPSILON {
            StockBucket::Large
        } else {
            StockBucket::Extra
        }
    }
}

/// Rounds to two decimal places, half up at the cent boundary.
pub fn round_to_two_decimals(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

use serde::{Deserialize, Serialize};

use crate::config::StockBucket;

/// Input for a single cutting plan: the cuts of one category and the stock to
/// cut them from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Required piece lengths in inches
    pub required_cuts: Vec<f64>,
    /// Enabled standard stock sizes, offered in this order
    pub stock_sizes: Vec<f64>,
    /// One-off stock lengths, each usable at most once
    #[serde(default)]
    pub extra_sizes: Vec<f64>,
}

/// A candidate subset of the remaining cuts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    pub combination: Vec<f64>,
    pub sum: f64,
}

/// Best combination for one stock size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCombinationOption {
    pub stock_size: f64,
    /// `None` when no combination fits the stock size
    pub combination: Option<CombinationResult>,
    /// `f64::INFINITY` when no combination fits
    pub waste: f64,
}

/// One stock pipe with the cuts assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub pipe: f64,
    pub cuts: Vec<f64>,
    pub waste: f64,
}

/// Output of the greedy planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuttingPlan {
    /// Pipes in the order they were chosen
    pub results: Vec<OptimizationResult>,
    /// Extra stock sizes consumed, in order of use
    #[serde(default)]
    pub used_extra_sizes: Vec<f64>,
    /// Cuts no available stock could accommodate
    #[serde(default)]
    pub unassigned_cuts: Vec<f64>,
}

impl CuttingPlan {
    /// True when every required cut was assigned to a pipe.
    pub fn is_complete(&self) -> bool {
        self.unassigned_cuts.is_empty()
    }

    /// Fails with `CutExceedsStock` for the first unassigned cut.
    pub fn ensure_complete(&self, max_stock: f64) -> Result<()> {
        match self.unassigned_cuts.first() {
            Some(&length) => Err(EstimatorError::CutExceedsStock { length, max_stock }),
            None => Ok(()),
        }
    }
}

/// Classification of one planned pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingEstimation {
    pub pipe_length: f64,
    pub pipe_cuts: Vec<f64>,
    pub wastage: f64,
    pub full: bool,
    pub partial: bool,
}

impl CuttingEstimation {
    /// Inches billed for this pipe: the whole stock when full, only the cuts
    /// when partial.
    pub fn billed_inches(&self) -> f64 {
        if self.full {
            self.pipe_length
        } else {
            self.pipe_cuts.iter().sum()
        }
    }

    pub fn bucket(&self) -> StockBucket {
        StockBucket::of(self.pipe_length)
    }
}

/// Full/partial tallies for one stock bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketTally {
    pub full_pipes: u32,
    pub partial_pipes: u32,
    /// Sum of cut lengths on partial pipes
    pub partial_inches: f64,
}

/// Aggregated classification of a whole plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CuttingSummary {
    /// 180" pipes
    pub small: BucketTally,
    /// 192" pipes
    pub large: BucketTally,
    /// Every other pipe length
    pub extra: BucketTally,
    /// Billed inches across all pipes
    pub total_inches: f64,
}

impl CuttingSummary {
    pub fn bucket_mut(&mut self, bucket: StockBucket) -> &mut BucketTally {
        match bucket {
            StockBucket::Small => &mut self.small,
            StockBucket::Large => &mut self.large,
            StockBucket::Extra => &mut self.extra,
        }
    }

    pub fn total_pipes(&self) -> u32 {
        [&self.small, &self.large, &self.extra]
            .iter()
            .map(|t| t.full_pipes + t.partial_pipes)
            .sum()
    }
}

/// Error type for planning and estimation
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cut of {length} in exceeds maximum stock size {max_stock} in")]
    CutExceedsStock { length: f64, max_stock: f64 },

    #[error("Combination search exceeded {limit} steps with {remaining} cuts remaining")]
    CombinationBudgetExceeded { limit: usize, remaining: usize },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

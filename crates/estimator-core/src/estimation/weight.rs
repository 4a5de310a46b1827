use super::Category;
use crate::config::{StockBucket, LARGE_STOCK_LENGTH, SMALL_STOCK_LENGTH};
use crate::types::CuttingEstimation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight in kg of one full reference pipe of each standard length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeWeights {
    /// Weight of a 180" pipe
    #[serde(default)]
    pub small: f64,
    /// Weight of a 192" pipe
    #[serde(default)]
    pub large: f64,
}

impl PipeWeights {
    pub fn new(small: f64, large: f64) -> Self {
        Self { small, large }
    }

    /// Weight per inch for a pipe of the given length. Extra lengths borrow the
    /// 192" profile, or the 180" one when no 192" weight is known.
    pub fn per_inch(&self, pipe_length: f64) -> f64 {
        let (weight, reference) = match StockBucket::of(pipe_length) {
            StockBucket::Small => (self.small, SMALL_STOCK_LENGTH),
            StockBucket::Large => (self.large, LARGE_STOCK_LENGTH),
            StockBucket::Extra if self.large > 0.0 => (self.large, LARGE_STOCK_LENGTH),
            StockBucket::Extra => (self.small, SMALL_STOCK_LENGTH),
        };
        weight / reference
    }

    /// Weight of one classified pipe, pro-rated by the inches it is billed for.
    pub fn pipe_weight(&self, cutting: &CuttingEstimation) -> f64 {
        if cutting.pipe_length <= 0.0 {
            return 0.0;
        }
        self.per_inch(cutting.pipe_length) * cutting.billed_inches()
    }
}

/// Pricing and weight data for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRate {
    /// Label of the pipe profile, e.g. "Domal 2 Track"
    #[serde(default)]
    pub pipe_type: String,
    /// Currency per kg
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub weights: PipeWeights,
}

/// Rate and weight lookup keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    entries: BTreeMap<Category, MaterialRate>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, material: MaterialRate) -> Self {
        self.insert(category, material);
        self
    }

    pub fn insert(&mut self, category: Category, material: MaterialRate) {
        self.entries.insert(category, material);
    }

    pub fn get(&self, category: Category) -> Option<&MaterialRate> {
        self.entries.get(&category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Per-category pipe estimation and the rolled-up bill.

use crate::config::*;
use crate::optimizer::{classify, summarize, CuttingPlanner};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

mod weight;
#[cfg(test)]
mod tests;

pub use weight::{MaterialRate, PipeWeights, RateTable};

/// Track and profile subsystems that are estimated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Track")]
    Track,
    #[serde(rename = "Track Top")]
    TrackTop,
    #[serde(rename = "Track Bottom")]
    TrackBottom,
    #[serde(rename = "Shutter")]
    Shutter,
    #[serde(rename = "Interlock")]
    Interlock,
    #[serde(rename = "V Channel")]
    VChannel,
    #[serde(rename = "SP")]
    Sp,
    #[serde(rename = "DP")]
    Dp,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Track => "Track",
            Category::TrackTop => "Track Top",
            Category::TrackBottom => "Track Bottom",
            Category::Shutter => "Shutter",
            Category::Interlock => "Interlock",
            Category::VChannel => "V Channel",
            Category::Sp => "SP",
            Category::Dp => "DP",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Window track configuration, which decides the categories in the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackType {
    #[default]
    TwoTrack,
    ThreeTrack,
    /// Separate top and bottom track profiles
    SplitTrack,
}

impl TrackType {
    pub fn categories(&self) -> &'static [Category] {
        match self {
            TrackType::TwoTrack => &[
                Category::Track,
                Category::Shutter,
                Category::Interlock,
                Category::VChannel,
                Category::Sp,
            ],
            TrackType::ThreeTrack => &[
                Category::Track,
                Category::Shutter,
                Category::Interlock,
                Category::VChannel,
                Category::Dp,
            ],
            TrackType::SplitTrack => &[
                Category::TrackTop,
                Category::TrackBottom,
                Category::Shutter,
                Category::Interlock,
                Category::VChannel,
                Category::Sp,
            ],
        }
    }

    pub fn uses(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }
}

/// Cut list and spare stock for one category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCuts {
    pub required_cuts: Vec<f64>,
    /// One-off stock lengths on hand for this profile
    #[serde(default)]
    pub extra_sizes: Vec<f64>,
}

/// Input: everything needed to price one window job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationRequest {
    #[serde(default)]
    pub track_type: TrackType,
    #[serde(default = "default_min_waste")]
    pub min_waste: f64,
    #[serde(default)]
    pub stock: StockOptions,
    pub categories: BTreeMap<Category, CategoryCuts>,
    #[serde(default)]
    pub materials: RateTable,
}

fn default_min_waste() -> f64 {
    DEFAULT_MIN_WASTE
}

/// Pipe requirements and cost for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeEstimation {
    pub category: Category,
    pub pipe_type: String,
    /// Currency per kg
    pub rate: f64,
    #[serde(flatten)]
    pub summary: CuttingSummary,
    /// Kg, rounded to two decimals
    pub total_weight: f64,
    /// Rounded to two decimals
    pub total_amount: f64,
    pub cuttings: Vec<CuttingEstimation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub used_extra_sizes: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned_cuts: Vec<f64>,
}

pub type EstimationData = BTreeMap<Category, PipeEstimation>;

/// Output: per-category estimations and grand totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub track_type: TrackType,
    pub estimations: EstimationData,
    /// Categories that could not be computed, with the reason
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<Category, String>,
    pub total_weight: f64,
    pub total_amount: f64,
}

impl Bill {
    /// Sums weights and amounts across categories.
    pub fn new(
        track_type: TrackType,
        estimations: EstimationData,
        failures: BTreeMap<Category, String>,
    ) -> Self {
        let total_weight = estimations.values().map(|e| e.total_weight).sum();
        let total_amount = estimations.values().map(|e| e.total_amount).sum();

        Self {
            track_type,
            estimations,
            failures,
            total_weight: round_to_two_decimals(total_weight),
            total_amount: round_to_two_decimals(total_amount),
        }
    }

    pub fn total_pipes(&self) -> u32 {
        self.estimations
            .values()
            .map(|e| e.summary.total_pipes())
            .sum()
    }

    pub fn unassigned_cuts(&self) -> usize {
        self.estimations
            .values()
            .map(|e| e.unassigned_cuts.len())
            .sum()
    }
}

/// Plans, classifies and prices the cuts of a single category.
///
/// A missing material entry prices the category at zero.
pub fn estimate(
    category: Category,
    request: PlanRequest,
    material: Option<&MaterialRate>,
    min_waste: f64,
    config: &EstimatorConfig,
) -> Result<PipeEstimation> {
    let plan = CuttingPlanner::new(request, config.clone())?.plan()?;
    let cuttings = classify(&plan.results, min_waste);
    let summary = summarize(&cuttings);

    let material = match material {
        Some(material) => material.clone(),
        None => {
            warn!("No rate or weight data for {}, pricing at zero", category);
            MaterialRate::default()
        }
    };

    let weight: f64 = cuttings
        .iter()
        .map(|cutting| material.weights.pipe_weight(cutting))
        .sum();
    let total_weight = round_to_two_decimals(weight);
    let total_amount = round_to_two_decimals(total_weight * material.rate);

    let pipe_type = if material.pipe_type.is_empty() {
        category.label().to_string()
    } else {
        material.pipe_type
    };

    Ok(PipeEstimation {
        category,
        pipe_type,
        rate: material.rate,
        summary,
        total_weight,
        total_amount,
        cuttings,
        used_extra_sizes: plan.used_extra_sizes,
        unassigned_cuts: plan.unassigned_cuts,
    })
}

/// Prices every category of a request that applies to its track type.
pub struct Estimator {
    request: EstimationRequest,
    config: EstimatorConfig,
}

impl Estimator {
    /// Validates requests and builds a new estimator instance.
    pub fn new(request: EstimationRequest, config: EstimatorConfig) -> Result<Self> {
        if !request.min_waste.is_finite() || request.min_waste < 0.0 {
            return Err(EstimatorError::InvalidInput(format!(
                "Minimum waste {} must be a non-negative length",
                request.min_waste
            )));
        }

        let has_extras = request
            .categories
            .values()
            .any(|cuts| cuts.extra_sizes.iter().any(|&size| size > 0.0));
        if !request.stock.small && !request.stock.large && !has_extras {
            return Err(EstimatorError::InvalidInput(
                "At least one stock size must be enabled".to_string(),
            ));
        }

        Ok(Self { request, config })
    }

    pub fn request(&self) -> &EstimationRequest {
        &self.request
    }

    /// Estimates a single category regardless of the track type.
    pub fn estimate_category(&self, category: Category) -> Result<PipeEstimation> {
        let cuts = self.request.categories.get(&category).cloned().unwrap_or_default();
        let plan_request = PlanRequest {
            required_cuts: cuts.required_cuts,
            stock_sizes: self.request.stock.sizes(),
            extra_sizes: cuts.extra_sizes,
        };

        estimate(
            category,
            plan_request,
            self.request.materials.get(category),
            self.request.min_waste,
            &self.config,
        )
    }

    /// Runs every applicable category. A failing category is recorded in the
    /// bill instead of aborting the rest.
    pub fn estimate(&self) -> Bill {
        let track_type = self.request.track_type;

        for category in self.request.categories.keys() {
            if !track_type.uses(*category) {
                warn!(
                    "Skipping {}: not part of a {:?} window",
                    category, track_type
                );
            }
        }

        let mut estimations = EstimationData::new();
        let mut failures = BTreeMap::new();

        for &category in track_type.categories() {
            if !self.request.categories.contains_key(&category) {
                debug!("No cuts supplied for {}", category);
                continue;
            }

            match self.estimate_category(category) {
                Ok(estimation) => {
                    info!(
                        "{}: {} pipe(s), {:.2} kg, amount {:.2}",
                        category,
                        estimation.summary.total_pipes(),
                        estimation.total_weight,
                        estimation.total_amount
                    );
                    estimations.insert(category, estimation);
                }
                Err(err) => {
                    warn!("{} could not be estimated: {}", category, err);
                    failures.insert(category, err.to_string());
                }
            }
        }

        Bill::new(track_type, estimations, failures)
    }
}

//! estimator-core - pipe cutting and cost estimation for aluminium windows.
//!
//! Required cut lengths are packed onto 180" and 192" stock pipes (plus any
//! one-off extra lengths) by a greedy least-waste planner. Planned pipes are
//! classified as full or partial, weighed against a per-category weight table
//! and priced per kg.
//!
//! # Example
//!
//! ```
//! use estimator_core::{CuttingPlanner, EstimatorConfig, PlanRequest};
//!
//! let request = PlanRequest {
//!     required_cuts: vec![48.0, 72.0, 48.0, 72.0],
//!     stock_sizes: vec![180.0, 192.0],
//!     extra_sizes: vec![],
//! };
//! let plan = CuttingPlanner::new(request, EstimatorConfig::default())
//!     .unwrap()
//!     .plan()
//!     .unwrap();
//! assert!(plan.is_complete());
//! ```

pub mod config;
pub mod estimation;
pub mod optimizer;
pub mod types;

pub use config::{round_to_two_decimals, EstimatorConfig, StockBucket, StockOptions};
pub use estimation::{
    estimate, Bill, Category, CategoryCuts, EstimationData, EstimationRequest, Estimator,
    MaterialRate, PipeEstimation, PipeWeights, RateTable, TrackType,
};
pub use optimizer::{
    best_fit, best_fit_for, classify, select_least_waste, summarize, CombinationGenerator,
    CuttingPlanner,
};
pub use types::*;

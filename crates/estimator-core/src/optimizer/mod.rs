use crate::config::*;
use crate::types::*;
use tracing::{debug, warn};

mod best_fit;
mod combinations;
mod summary;

pub use best_fit::{best_fit, best_fit_for, select_least_waste};
pub use combinations::CombinationGenerator;
pub use summary::{classify, summarize};

/// Where a candidate stock size for the current step comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockSource {
    Standard,
    /// Index into the remaining extra pool
    Extra(usize),
}

/// Assigns required cuts to stock pipes with a greedy least-waste heuristic.
pub struct CuttingPlanner {
    request: PlanRequest,
    config: EstimatorConfig,
}

impl CuttingPlanner {
    /// Validates the request and builds a new planner.
    pub fn new(request: PlanRequest, config: EstimatorConfig) -> Result<Self> {
        for &cut in &request.required_cuts {
            if !cut.is_finite() || cut <= 0.0 {
                return Err(EstimatorError::InvalidInput(format!(
                    "Required cut {} must be a positive length",
                    cut
                )));
            }
        }

        for &size in &request.stock_sizes {
            if !size.is_finite() || size <= 0.0 {
                return Err(EstimatorError::InvalidInput(format!(
                    "Stock size {} must be a positive length",
                    size
                )));
            }
        }

        if request.extra_sizes.iter().any(|size| !size.is_finite()) {
            return Err(EstimatorError::InvalidInput(
                "Extra stock sizes must be finite".to_string(),
            ));
        }

        Ok(Self { request, config })
    }

    /// Longest stock length available to this plan, extras included.
    pub fn max_stock(&self) -> f64 {
        self.request
            .stock_sizes
            .iter()
            .chain(self.extra_pool().iter())
            .copied()
            .fold(0.0, f64::max)
    }

    /// Runs the greedy loop until every cut is placed or nothing else fits.
    pub fn plan(&self) -> Result<CuttingPlan> {
        let max_stock = self.max_stock();
        let generator = CombinationGenerator::new(self.config.combination_ceiling.max(max_stock))
            .with_budget(self.config.combination_budget);

        // Cuts longer than every stock can never be placed
        let (mut remaining, mut unassigned): (Vec<f64>, Vec<f64>) = self
            .request
            .required_cuts
            .iter()
            .copied()
            .partition(|&cut| cut <= max_stock + LENGTH_EPSILON);

        let mut extras = self.extra_pool();
        let mut plan = CuttingPlan::default();

        while !remaining.is_empty() {
            let combinations = generator.generate(&remaining)?;

            let candidates: Vec<(f64, StockSource)> = self
                .request
                .stock_sizes
                .iter()
                .map(|&size| (size, StockSource::Standard))
                .chain(
                    extras
                        .iter()
                        .enumerate()
                        .map(|(idx, &size)| (size, StockSource::Extra(idx))),
                )
                .collect();

            let sizes: Vec<f64> = candidates.iter().map(|(size, _)| *size).collect();
            let options = best_fit(&combinations, &sizes);

            let Some(selected) = select_least_waste(&options) else {
                break;
            };
            let option = &options[selected];
            let Some(chosen) = option.combination.as_ref() else {
                break;
            };

            if let StockSource::Extra(idx) = candidates[selected].1 {
                plan.used_extra_sizes.push(extras.remove(idx));
            }

            for cut in &chosen.combination {
                if let Some(pos) = remaining.iter().position(|r| r == cut) {
                    remaining.remove(pos);
                }
            }

            debug!(
                "Cut {:?} from {} in pipe, waste {}, {} cuts left",
                chosen.combination,
                option.stock_size,
                option.waste,
                remaining.len()
            );

            plan.results.push(OptimizationResult {
                pipe: option.stock_size,
                cuts: chosen.combination.clone(),
                waste: option.waste,
            });
        }

        unassigned.extend(remaining);
        if !unassigned.is_empty() {
            warn!(
                "{} cut(s) could not be assigned to any stock pipe: {:?}",
                unassigned.len(),
                unassigned
            );
        }
        plan.unassigned_cuts = unassigned;

        if self.config.strict {
            plan.ensure_complete(max_stock)?;
        }

        Ok(plan)
    }

    /// Positive extra sizes in caller order.
    fn extra_pool(&self) -> Vec<f64> {
        self.request
            .extra_sizes
            .iter()
            .copied()
            .filter(|&size| size > 0.0)
            .collect()
    }
}

use super::*;

/// Tags each planned pipe as full (waste below `min_waste`) or partial.
pub fn classify(results: &[OptimizationResult], min_waste: f64) -> Vec<CuttingEstimation> {
    results
        .iter()
        .map(|result| {
            let full = result.waste < min_waste;
            CuttingEstimation {
                pipe_length: result.pipe,
                pipe_cuts: result.cuts.clone(),
                wastage: result.waste,
                full,
                partial: !full,
            }
        })
        .collect()
}

/// Aggregates pipe counts and billed inches per stock bucket.
pub fn summarize(estimations: &[CuttingEstimation]) -> CuttingSummary {
    let mut summary = CuttingSummary::default();

    for estimation in estimations {
        let billed = estimation.billed_inches();
        let tally = summary.bucket_mut(estimation.bucket());

        if estimation.full {
            tally.full_pipes += 1;
        } else {
            tally.partial_pipes += 1;
            tally.partial_inches += billed;
        }

        summary.total_inches += billed;
    }

    summary
}

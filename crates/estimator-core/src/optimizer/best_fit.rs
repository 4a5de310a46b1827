use super::*;

/// Picks, for every stock size, the combination leaving the least waste.
/// Duplicate stock sizes each get their own entry.
pub fn best_fit(
    combinations: &[CombinationResult],
    stock_sizes: &[f64],
) -> Vec<BestCombinationOption> {
    stock_sizes
        .iter()
        .map(|&stock_size| best_fit_for(combinations, stock_size))
        .collect()
}

/// Linear scan keeping the first combination that reaches the minimum waste.
pub fn best_fit_for(combinations: &[CombinationResult], stock_size: f64) -> BestCombinationOption {
    let mut best: Option<&CombinationResult> = None;
    let mut min_waste = f64::INFINITY;

    for combination in combinations {
        if combination.sum > stock_size + LENGTH_EPSILON {
            continue;
        }

        let waste = (stock_size - combination.sum).max(0.0);
        if waste < min_waste {
            min_waste = waste;
            best = Some(combination);
        }
    }

    BestCombinationOption {
        stock_size,
        combination: best.cloned(),
        waste: min_waste,
    }
}

/// Index of the option with the globally least waste. Earlier options win ties.
pub fn select_least_waste(options: &[BestCombinationOption]) -> Option<usize> {
    let mut selected: Option<(usize, f64)> = None;

    for (idx, option) in options.iter().enumerate() {
        if option.combination.is_none() {
            continue;
        }

        match selected {
            Some((_, best_waste)) if option.waste >= best_waste => {}
            _ => selected = Some((idx, option.waste)),
        }
    }

    selected.map(|(idx, _)| idx)
}

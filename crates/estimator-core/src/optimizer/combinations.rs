use super::*;
use std::collections::HashSet;

/// Enumerates every distinct sub-multiset of a list of lengths whose sum stays
/// at or below a ceiling.
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    ceiling: f64,
    budget: Option<usize>,
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new(COMBINATION_CEILING)
    }
}

impl CombinationGenerator {
    pub fn new(ceiling: f64) -> Self {
        Self {
            ceiling,
            budget: None,
        }
    }

    /// Caps the number of search nodes a single `generate` call may visit.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Depth-first enumeration over index positions. Results come back in
    /// discovery order, which is what best-fit tie-breaking relies on.
    pub fn generate(&self, lengths: &[f64]) -> Result<Vec<CombinationResult>> {
        let mut search = Search {
            lengths,
            ceiling: self.ceiling + LENGTH_EPSILON,
            budget: self.budget,
            visited: 0,
            path: Vec::with_capacity(lengths.len()),
            seen: HashSet::new(),
            results: Vec::new(),
        };
        search.extend(0, 0.0)?;
        Ok(search.results)
    }
}

struct Search<'a> {
    lengths: &'a [f64],
    ceiling: f64,
    budget: Option<usize>,
    visited: usize,
    path: Vec<f64>,
    seen: HashSet<Vec<u64>>,
    results: Vec<CombinationResult>,
}

impl Search<'_> {
    fn extend(&mut self, start: usize, sum: f64) -> Result<()> {
        // Values already branched on at this depth. A later equal value can only
        // reach multisets the earlier branch has already produced.
        let mut tried: Vec<f64> = Vec::new();

        for index in start..self.lengths.len() {
            let length = self.lengths[index];
            let next = sum + length;

            // Lengths are positive, so an overshoot can never come back down
            if next > self.ceiling || tried.contains(&length) {
                continue;
            }
            tried.push(length);

            self.visited += 1;
            if let Some(limit) = self.budget {
                if self.visited > limit {
                    return Err(EstimatorError::CombinationBudgetExceeded {
                        limit,
                        remaining: self.lengths.len(),
                    });
                }
            }

            self.path.push(length);
            self.record(next);
            self.extend(index + 1, next)?;
            self.path.pop();
        }

        Ok(())
    }

    fn record(&mut self, sum: f64) {
        let mut sorted = self.path.clone();
        sorted.sort_by(f64::total_cmp);
        let key: Vec<u64> = sorted.iter().map(|length| length.to_bits()).collect();

        if self.seen.insert(key) {
            self.results.push(CombinationResult {
                combination: self.path.clone(),
                sum,
            });
        }
    }
}

//! Raw answers to sub-scale totals

use timescope_core::{ResponseSet, ScoreProfile, Subscale};

use crate::error::Result;

/// Sums each contiguous group of five answers into its sub-scale total
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Validate and sum raw answers
    ///
    /// Fails with an invalid-input error when there are not exactly 20 values
    /// or a value lies outside 1..=5.
    pub fn aggregate(&self, answers: &[i64]) -> Result<ScoreProfile> {
        let responses = ResponseSet::from_values(answers)?;
        Ok(self.aggregate_set(&responses))
    }

    /// Sum an already validated response set
    pub fn aggregate_set(&self, responses: &ResponseSet) -> ScoreProfile {
        let total = |subscale: Subscale| -> i32 {
            responses
                .group(subscale)
                .iter()
                .map(|answer| answer.value() as i32)
                .sum()
        };

        ScoreProfile::new(
            total(Subscale::Intensity),
            total(Subscale::Quantity),
            total(Subscale::Accuracy),
            total(Subscale::Positivity),
        )
    }
}

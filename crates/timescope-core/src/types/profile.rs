//! Score profiles

use crate::types::Subscale;
use serde::{Deserialize, Serialize};

/// Lowest possible sub-scale total (five answers of 1)
pub const SCORE_MIN: i32 = 5;

/// Highest possible sub-scale total (five answers of 5)
pub const SCORE_MAX: i32 = 25;

/// One named sub-scale total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscaleScore {
    pub subscale: Subscale,
    pub value: i32,
}

impl SubscaleScore {
    pub fn is_within_scale(&self) -> bool {
        (SCORE_MIN..=SCORE_MAX).contains(&self.value)
    }
}

/// The four sub-scale totals of one respondent
///
/// Profiles built by aggregation always lie in `[SCORE_MIN, SCORE_MAX]`.
/// Profiles reconstructed from a shared token may not, depending on the
/// codec's range policy; use [`ScoreProfile::is_within_scale`] to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreProfile {
    pub intensity: i32,
    pub quantity: i32,
    pub accuracy: i32,
    pub positivity: i32,
}

impl ScoreProfile {
    pub fn new(intensity: i32, quantity: i32, accuracy: i32, positivity: i32) -> Self {
        Self {
            intensity,
            quantity,
            accuracy,
            positivity,
        }
    }

    /// Profile with the same value on every sub-scale
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn score(&self, subscale: Subscale) -> i32 {
        match subscale {
            Subscale::Intensity => self.intensity,
            Subscale::Quantity => self.quantity,
            Subscale::Accuracy => self.accuracy,
            Subscale::Positivity => self.positivity,
        }
    }

    /// Named scores in sub-scale order
    pub fn scores(&self) -> [SubscaleScore; 4] {
        Subscale::ALL.map(|subscale| SubscaleScore {
            subscale,
            value: self.score(subscale),
        })
    }

    pub fn total(&self) -> i32 {
        self.intensity + self.quantity + self.accuracy + self.positivity
    }

    pub fn is_within_scale(&self) -> bool {
        self.scores().iter().all(SubscaleScore::is_within_scale)
    }
}

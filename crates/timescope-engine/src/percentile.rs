//! Population ranking
//!
//! A respondent's percentile on a sub-scale is the share of the stored
//! population that scored strictly below them:
//!
//! ```text
//! percentile = 100 * count(x < score) / count(population)
//! ```
//!
//! Ties never count as below. Below the minimum sample size the result is
//! [`Percentile::Unavailable`], which is a normal outcome rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use timescope_core::{ScoreProfile, StoredRecord, Subscale};

/// Smallest population that gets ranked by default
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 5;

/// Ranking outcome for one sub-scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Percentile {
    /// Percentage of the population strictly below, in `0.0..=100.0`
    Ranked { value: f64 },
    /// Too few valid entries to rank against
    Unavailable { sample_size: usize },
}

impl Percentile {
    pub fn value(&self) -> Option<f64> {
        match self {
            Percentile::Ranked { value } => Some(*value),
            Percentile::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Percentile::Ranked { .. })
    }
}

/// Per sub-scale ranking outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentileResult(BTreeMap<Subscale, Percentile>);

impl PercentileResult {
    /// Every sub-scale unavailable, e.g. when the store could not be read
    pub fn unavailable(sample_size: usize) -> Self {
        Self(
            Subscale::ALL
                .into_iter()
                .map(|subscale| (subscale, Percentile::Unavailable { sample_size }))
                .collect(),
        )
    }

    pub fn get(&self, subscale: Subscale) -> Percentile {
        self.0
            .get(&subscale)
            .copied()
            .unwrap_or(Percentile::Unavailable { sample_size: 0 })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subscale, Percentile)> + '_ {
        self.0.iter().map(|(subscale, p)| (*subscale, *p))
    }

    pub fn any_available(&self) -> bool {
        self.0.values().any(Percentile::is_available)
    }
}

/// Strictly-below percentile of `score` in `population`, `None` when empty
pub fn percentile_below(score: i32, population: &[i32]) -> Option<f64> {
    if population.is_empty() {
        return None;
    }
    let below = population.iter().filter(|&&x| x < score).count();
    Some(100.0 * below as f64 / population.len() as f64)
}

/// Ranks scores against a stored population
#[derive(Debug, Clone, Copy)]
pub struct PercentileRanker {
    min_sample_size: usize,
}

impl PercentileRanker {
    pub fn new(min_sample_size: usize) -> Self {
        Self { min_sample_size }
    }

    pub fn min_sample_size(&self) -> usize {
        self.min_sample_size
    }

    /// Rank against a population of valid scores
    pub fn rank(&self, score: i32, population: &[i32]) -> Percentile {
        if population.len() < self.min_sample_size {
            return Percentile::Unavailable {
                sample_size: population.len(),
            };
        }
        match percentile_below(score, population) {
            Some(value) => Percentile::Ranked { value },
            None => Percentile::Unavailable { sample_size: 0 },
        }
    }

    /// Rank against raw entries, skipping missing ones
    pub fn rank_entries(&self, score: i32, entries: &[Option<i32>]) -> Percentile {
        let population: Vec<i32> = entries.iter().flatten().copied().collect();
        self.rank(score, &population)
    }

    /// Rank every sub-scale of a profile against stored records
    ///
    /// Each sub-scale uses its own population: a record with an unreadable
    /// accuracy cell still counts towards the other three.
    pub fn rank_profile(&self, profile: &ScoreProfile, records: &[StoredRecord]) -> PercentileResult {
        PercentileResult(
            Subscale::ALL
                .into_iter()
                .map(|subscale| {
                    let entries: Vec<Option<i32>> =
                        records.iter().map(|r| r.score(subscale)).collect();
                    (
                        subscale,
                        self.rank_entries(profile.score(subscale), &entries),
                    )
                })
                .collect(),
        )
    }
}

impl Default for PercentileRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SAMPLE_SIZE)
    }
}

//! Band rule definitions

use crate::types::{Band, Level, SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cut point and compound rules used to classify a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRules {
    /// Scores at or below this value fall in the low band, scores above it
    /// in the high band
    pub cut_point: i32,

    /// Display labels keyed by band (e.g. `accuracy_low: Low Accuracy`)
    #[serde(default)]
    pub labels: BTreeMap<Band, String>,

    /// Conjunctions that derive compound bands
    #[serde(default)]
    pub compound: Vec<CompoundRule>,
}

impl BandRules {
    /// Side of the cut point a score falls on
    pub fn level_of(&self, score: i32) -> Level {
        if score <= self.cut_point {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Divider used when plotting, halfway between the two bands
    pub fn divider(&self) -> f64 {
        self.cut_point as f64 + 0.5
    }

    pub fn is_cut_point_valid(&self) -> bool {
        (SCORE_MIN..SCORE_MAX).contains(&self.cut_point)
    }
}

impl Default for BandRules {
    fn default() -> Self {
        Self {
            cut_point: 12,
            labels: BTreeMap::new(),
            compound: Vec::new(),
        }
    }
}

/// A compound band, present when every band in `all` is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRule {
    /// Compound band identifier
    pub id: String,

    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Simple bands that must all hold
    pub all: Vec<Band>,
}

impl CompoundRule {
    pub fn band(&self) -> Band {
        Band::compound(self.id.clone())
    }
}

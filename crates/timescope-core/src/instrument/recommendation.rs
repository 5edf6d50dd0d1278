//! Recommendation reference data

use crate::types::{Band, ScoreProfile, Subscale};
use serde::{Deserialize, Serialize};

/// One row of the priority table: when every band in `when` holds, `entry`
/// is recommended. Table position is the priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub when: Vec<Band>,
    pub entry: RecommendationEntry,
}

/// Static guidance for a band or conjunction of bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub id: String,
    pub title: String,

    /// Why this entry applies. May reference `{intensity}`, `{quantity}`,
    /// `{accuracy}` and `{positivity}`.
    pub rationale: String,

    pub methods: Vec<Method>,
}

/// A concrete technique within a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub procedure: String,
    pub note: String,
    pub verification: String,
}

/// Positive message shown for a band that needs no action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affirmation {
    pub band: Band,
    pub message: String,
}

impl RecommendationEntry {
    /// Rationale with score placeholders filled in
    pub fn render_rationale(&self, profile: &ScoreProfile) -> String {
        Subscale::ALL
            .iter()
            .fold(self.rationale.clone(), |text, subscale| {
                text.replace(
                    &format!("{{{}}}", subscale.key()),
                    &profile.score(*subscale).to_string(),
                )
            })
    }
}

//! Assessment input and output types

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use timescope_core::{
    Affirmation, Band, BandSet, Perspective, RecommendationEntry, Role, ScoreProfile, Subscale,
    SCORE_MAX,
};

use crate::codec::ResultToken;
use crate::matrix::MatrixView;
use crate::percentile::{Percentile, PercentileResult};

/// A completed questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Twenty raw answers in questionnaire order
    pub answers: Vec<i64>,

    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,

    /// Whether the scores may be stored for population ranking
    #[serde(default)]
    pub consent: bool,
}

impl Submission {
    pub fn new(answers: Vec<i64>) -> Self {
        Self {
            answers,
            nickname: None,
            role: None,
            consent: false,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_consent(mut self, consent: bool) -> Self {
        self.consent = consent;
        self
    }
}

/// What happened to the respondent's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceStatus {
    Stored,
    /// No consent, or a result rebuilt from a shared token
    Skipped,
    Failed { reason: String },
}

/// One sub-scale line of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSummary {
    pub subscale: Subscale,
    pub name: String,
    pub score: i32,
    pub band: Option<Band>,
    pub band_label: Option<String>,
}

/// Summary lines of one perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveSummary {
    pub perspective: Perspective,
    pub title: String,
    pub scales: Vec<ScaleSummary>,
}

/// The full, self-describing result of one assessment
///
/// Everything needed for presentation is resolved here; rendering never
/// compares scores against thresholds again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub instrument_version: String,
    pub scores: ScoreProfile,
    pub bands: BandSet,
    pub summary: Vec<PerspectiveSummary>,

    /// Applicable entries in priority order, rationale rendered
    pub recommendations: Vec<RecommendationEntry>,
    pub affirmations: Vec<Affirmation>,

    /// Present only when no recommendation applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_message: Option<String>,

    pub percentiles: PercentileResult,
    pub matrices: Vec<MatrixView>,
    pub token: ResultToken,
    pub persistence: PersistenceStatus,
}

impl Assessment {
    /// Query string that reproduces this result
    pub fn share_query(&self) -> String {
        self.token.to_query_string()
    }

    pub fn recommendation_titles(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|entry| entry.title.as_str())
            .collect()
    }

    /// Plain-text report
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Summary\n");
        for perspective in &self.summary {
            let labels: Vec<&str> = perspective
                .scales
                .iter()
                .filter_map(|scale| scale.band_label.as_deref())
                .collect();
            let _ = writeln!(out, "{}: {}", perspective.title, labels.join(", "));
        }

        out.push_str("\nScores\n");
        for perspective in &self.summary {
            for scale in &perspective.scales {
                let _ = write!(out, "{}: {} / {}", scale.name, scale.score, SCORE_MAX);
                if let Percentile::Ranked { value } = self.percentiles.get(scale.subscale) {
                    let _ = write!(out, " (higher than {:.0}% of respondents)", value);
                }
                out.push('\n');
            }
        }

        out.push_str("\nRecommendations\n");
        match &self.optimal_message {
            Some(message) => {
                let _ = writeln!(out, "{}", message);
            }
            None => {
                for entry in &self.recommendations {
                    let _ = writeln!(out, "\n{}\n{}", entry.title, entry.rationale);
                    for method in &entry.methods {
                        let _ = writeln!(out, "- {}: {}", method.name, method.procedure);
                        let _ = writeln!(out, "  Tip: {}", method.note);
                        let _ = writeln!(out, "  Check: {}", method.verification);
                    }
                }
            }
        }

        if !self.affirmations.is_empty() {
            out.push_str("\nStrengths\n");
            for affirmation in &self.affirmations {
                let _ = writeln!(out, "- {}", affirmation.message);
            }
        }

        out
    }
}

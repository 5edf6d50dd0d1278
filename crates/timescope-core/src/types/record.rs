//! Stored score records and respondent metadata

use crate::error::CoreError;
use crate::types::{ScoreProfile, Subscale};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Respondent role, from a closed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Engineer,
    Designer,
    Manager,
    Sales,
    Researcher,
    Other,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::Engineer,
        Role::Designer,
        Role::Manager,
        Role::Sales,
        Role::Researcher,
        Role::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Engineer => "engineer",
            Role::Designer => "designer",
            Role::Manager => "manager",
            Role::Sales => "sales",
            Role::Researcher => "researcher",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.key() == needle)
            .ok_or_else(|| CoreError::InvalidValue(format!("unknown role '{}'", s)))
    }
}

/// One persisted row: a consenting respondent's scores plus optional metadata
///
/// Score fields are optional because rows written by other tools may carry
/// empty or non-numeric cells; those are skipped when building a ranking
/// population instead of being read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub intensity: Option<i32>,
    pub quantity: Option<i32>,
    pub accuracy: Option<i32>,
    pub positivity: Option<i32>,
}

impl StoredRecord {
    /// Build a record for a scored respondent
    ///
    /// Blank nicknames are stored as absent.
    pub fn from_profile(
        profile: &ScoreProfile,
        nickname: Option<String>,
        role: Option<Role>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            nickname: nickname
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            role,
            intensity: Some(profile.intensity),
            quantity: Some(profile.quantity),
            accuracy: Some(profile.accuracy),
            positivity: Some(profile.positivity),
        }
    }

    pub fn score(&self, subscale: Subscale) -> Option<i32> {
        match subscale {
            Subscale::Intensity => self.intensity,
            Subscale::Quantity => self.quantity,
            Subscale::Accuracy => self.accuracy,
            Subscale::Positivity => self.positivity,
        }
    }

    /// The full profile, when all four scores are present
    pub fn profile(&self) -> Option<ScoreProfile> {
        Some(ScoreProfile::new(
            self.intensity?,
            self.quantity?,
            self.accuracy?,
            self.positivity?,
        ))
    }
}

//! Stateless result sharing
//!
//! A [`ResultToken`] carries the four sub-scale totals as named integer fields
//! and renders as a query string:
//!
//! ```text
//! intensity=14&quantity=9&accuracy=18&positivity=11
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use timescope_core::{CoreError, ScoreProfile, Subscale, SCORE_MAX, SCORE_MIN};

use crate::error::Result;

/// How decoded values outside the sub-scale range are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Accept any integer
    #[default]
    PassThrough,
    /// Reject values outside `[SCORE_MIN, SCORE_MAX]`
    Strict,
}

/// The four scores as a shareable token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultToken {
    pub intensity: i32,
    pub quantity: i32,
    pub accuracy: i32,
    pub positivity: i32,
}

impl ResultToken {
    pub fn value(&self, subscale: Subscale) -> i32 {
        match subscale {
            Subscale::Intensity => self.intensity,
            Subscale::Quantity => self.quantity,
            Subscale::Accuracy => self.accuracy,
            Subscale::Positivity => self.positivity,
        }
    }

    pub fn to_query_string(&self) -> String {
        Subscale::ALL
            .iter()
            .map(|s| format!("{}={}", s.key(), self.value(*s)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for ResultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Converts profiles to tokens and back
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultCodec {
    policy: RangePolicy,
}

impl ResultCodec {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    pub fn encode(&self, profile: &ScoreProfile) -> ResultToken {
        ResultToken {
            intensity: profile.intensity,
            quantity: profile.quantity,
            accuracy: profile.accuracy,
            positivity: profile.positivity,
        }
    }

    /// Rebuild a profile, applying the range policy
    pub fn decode(&self, token: &ResultToken) -> Result<ScoreProfile> {
        for subscale in Subscale::ALL {
            self.check_range(subscale, token.value(subscale))?;
        }
        Ok(ScoreProfile::new(
            token.intensity,
            token.quantity,
            token.accuracy,
            token.positivity,
        ))
    }

    /// Decode from already split query parameters
    ///
    /// Every field must be present and hold an integer; unknown keys are
    /// ignored.
    pub fn decode_params(&self, params: &HashMap<String, String>) -> Result<ScoreProfile> {
        let field = |subscale: Subscale| -> Result<i32> {
            let raw = params.get(subscale.key()).ok_or_else(|| {
                CoreError::InvalidToken(format!("missing field '{}'", subscale.key()))
            })?;
            raw.trim().parse::<i32>().map_err(|_| {
                CoreError::InvalidToken(format!(
                    "field '{}' is not an integer: '{}'",
                    subscale.key(),
                    raw
                ))
                .into()
            })
        };

        let token = ResultToken {
            intensity: field(Subscale::Intensity)?,
            quantity: field(Subscale::Quantity)?,
            accuracy: field(Subscale::Accuracy)?,
            positivity: field(Subscale::Positivity)?,
        };
        self.decode(&token)
    }

    /// Decode a raw query string, with or without a leading `?`
    pub fn decode_query(&self, query: &str) -> Result<ScoreProfile> {
        let mut params = HashMap::new();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key)?;
            let value = decode_component(value)?;
            if params.insert(key.clone(), value).is_some() {
                return Err(CoreError::InvalidToken(format!("duplicate field '{}'", key)).into());
            }
        }
        self.decode_params(&params)
    }

    fn check_range(&self, subscale: Subscale, value: i32) -> Result<()> {
        if self.policy == RangePolicy::Strict && !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(CoreError::InvalidToken(format!(
                "field '{}' is {}, expected a value between {} and {}",
                subscale.key(),
                value,
                SCORE_MIN,
                SCORE_MAX
            ))
            .into());
        }
        Ok(())
    }
}

fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| CoreError::InvalidToken(format!("bad percent-encoding: {}", e)).into())
}

//! Sub-scale definitions
//!
//! The questionnaire measures four fixed dimensions. Each is backed by five
//! contiguous items, in the order the variants are declared here.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four measured dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscale {
    /// How vividly the respondent anticipates the future
    Intensity,
    /// How many anticipated obligations occupy the respondent
    Quantity,
    /// How accurately past durations are recalled
    Accuracy,
    /// How favourably the past is recalled
    Positivity,
}

/// Which way a sub-scale looks in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Future,
    Past,
}

impl Subscale {
    /// All sub-scales in item order
    pub const ALL: [Subscale; 4] = [
        Subscale::Intensity,
        Subscale::Quantity,
        Subscale::Accuracy,
        Subscale::Positivity,
    ];

    /// Field name used in tokens, rows and band identifiers
    pub fn key(&self) -> &'static str {
        match self {
            Subscale::Intensity => "intensity",
            Subscale::Quantity => "quantity",
            Subscale::Accuracy => "accuracy",
            Subscale::Positivity => "positivity",
        }
    }

    /// Zero-based block index; items `5 * index + 1 ..= 5 * index + 5` belong here
    pub fn index(&self) -> usize {
        match self {
            Subscale::Intensity => 0,
            Subscale::Quantity => 1,
            Subscale::Accuracy => 2,
            Subscale::Positivity => 3,
        }
    }

    pub fn perspective(&self) -> Perspective {
        match self {
            Subscale::Intensity | Subscale::Quantity => Perspective::Future,
            Subscale::Accuracy | Subscale::Positivity => Perspective::Past,
        }
    }
}

impl fmt::Display for Subscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Subscale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subscale::ALL
            .into_iter()
            .find(|subscale| subscale.key() == s)
            .ok_or_else(|| CoreError::InvalidValue(format!("unknown subscale '{}'", s)))
    }
}

impl Perspective {
    pub fn subscales(&self) -> [Subscale; 2] {
        match self {
            Perspective::Future => [Subscale::Intensity, Subscale::Quantity],
            Perspective::Past => [Subscale::Accuracy, Subscale::Positivity],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Perspective::Future => "Future Perspective",
            Perspective::Past => "Past Perspective",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for subscale in Subscale::ALL {
            assert_eq!(subscale.key().parse::<Subscale>().unwrap(), subscale);
        }
        assert!("urgency".parse::<Subscale>().is_err());
    }

    #[test]
    fn test_indices_follow_declaration_order() {
        let indices: Vec<usize> = Subscale::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_perspective_grouping() {
        assert_eq!(Subscale::Intensity.perspective(), Perspective::Future);
        assert_eq!(Subscale::Positivity.perspective(), Perspective::Past);
        assert_eq!(
            Perspective::Past.subscales(),
            [Subscale::Accuracy, Subscale::Positivity]
        );
    }
}

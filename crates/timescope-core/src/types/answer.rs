//! Answers and response sets

use crate::error::{CoreError, Result};
use crate::types::Subscale;
use serde::{Deserialize, Serialize};

/// Number of statements in the questionnaire
pub const ITEM_COUNT: usize = 20;

/// Number of statements backing each sub-scale
pub const ITEMS_PER_SUBSCALE: usize = 5;

/// Lowest point on the agreement scale
pub const ANSWER_MIN: i64 = 1;

/// Highest point on the agreement scale
pub const ANSWER_MAX: i64 = 5;

/// A single reply on the 5-point agreement scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Answer(u8);

impl Answer {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Answer {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self> {
        if (ANSWER_MIN..=ANSWER_MAX).contains(&value) {
            Ok(Answer(value as u8))
        } else {
            Err(CoreError::InvalidValue(format!(
                "answer {} is outside {}..={}",
                value, ANSWER_MIN, ANSWER_MAX
            )))
        }
    }
}

impl From<Answer> for i64 {
    fn from(answer: Answer) -> Self {
        answer.0 as i64
    }
}

/// Exactly twenty answers, in questionnaire order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: [Answer; ITEM_COUNT],
}

impl ResponseSet {
    /// Validate raw answer values
    ///
    /// Fails with [`CoreError::AnswerCount`] when the count is not 20 and with
    /// [`CoreError::AnswerOutOfRange`] (1-based position) for the first value
    /// outside the scale. Values are never coerced.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        if values.len() != ITEM_COUNT {
            return Err(CoreError::AnswerCount {
                expected: ITEM_COUNT,
                actual: values.len(),
            });
        }

        let mut answers = [Answer(ANSWER_MIN as u8); ITEM_COUNT];
        for (index, value) in values.iter().enumerate() {
            answers[index] =
                Answer::try_from(*value).map_err(|_| CoreError::AnswerOutOfRange {
                    position: index + 1,
                    value: *value,
                    min: ANSWER_MIN,
                    max: ANSWER_MAX,
                })?;
        }

        Ok(Self { answers })
    }

    pub fn answers(&self) -> &[Answer; ITEM_COUNT] {
        &self.answers
    }

    /// The five answers that belong to `subscale`
    pub fn group(&self, subscale: Subscale) -> &[Answer] {
        let start = subscale.index() * ITEMS_PER_SUBSCALE;
        &self.answers[start..start + ITEMS_PER_SUBSCALE]
    }

    /// Sum of all twenty answers
    pub fn grand_total(&self) -> i32 {
        self.answers.iter().map(|a| a.value() as i32).sum()
    }
}

impl<'de> Deserialize<'de> for ResponseSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<i64>::deserialize(deserializer)?;
        ResponseSet::from_values(&values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: i64) -> Vec<i64> {
        vec![v; ITEM_COUNT]
    }

    #[test]
    fn test_accepts_twenty_answers_on_scale() {
        let set = ResponseSet::from_values(&values(3)).unwrap();
        assert_eq!(set.grand_total(), 60);
    }

    #[test]
    fn test_rejects_wrong_count() {
        let err = ResponseSet::from_values(&[3; 19]).unwrap_err();
        assert_eq!(
            err,
            CoreError::AnswerCount {
                expected: 20,
                actual: 19
            }
        );

        let err = ResponseSet::from_values(&[]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_out_of_range_with_position() {
        let mut raw = values(2);
        raw[11] = 0;
        match ResponseSet::from_values(&raw).unwrap_err() {
            CoreError::AnswerOutOfRange { position, value, .. } => {
                assert_eq!(position, 12);
                assert_eq!(value, 0);
            }
            other => panic!("Expected AnswerOutOfRange, got {:?}", other),
        }

        let mut raw = values(2);
        raw[19] = 6;
        assert!(ResponseSet::from_values(&raw).is_err());
    }

    #[test]
    fn test_groups_are_contiguous_blocks() {
        let raw: Vec<i64> = (0..ITEM_COUNT as i64).map(|i| i / 5 + 1).collect();
        let set = ResponseSet::from_values(&raw).unwrap();

        assert!(set.group(Subscale::Intensity).iter().all(|a| a.value() == 1));
        assert!(set.group(Subscale::Quantity).iter().all(|a| a.value() == 2));
        assert!(set.group(Subscale::Accuracy).iter().all(|a| a.value() == 3));
        assert!(set.group(Subscale::Positivity).iter().all(|a| a.value() == 4));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ResponseSet = serde_json::from_str(&serde_json::to_string(&values(5)).unwrap()).unwrap();
        assert_eq!(ok.grand_total(), 100);

        let bad = serde_json::from_str::<ResponseSet>("[1, 2, 3]");
        assert!(bad.is_err());
    }
}

//! Error types for Timescope Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The answer set does not contain exactly the expected number of answers
    #[error("Invalid input: expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    /// An answer lies outside the agreement scale (position is 1-based)
    #[error("Invalid input: answer {position} is {value}, expected a value between {min} and {max}")]
    AnswerOutOfRange {
        position: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A result token is missing a field or carries a malformed value
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The instrument reference document is inconsistent
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl CoreError {
    /// Whether this error rejects a submitted answer set
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CoreError::AnswerCount { .. } | CoreError::AnswerOutOfRange { .. }
        )
    }

    /// Whether this error rejects a shared result token
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, CoreError::InvalidToken(_))
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_count_display() {
        let err = CoreError::AnswerCount {
            expected: 20,
            actual: 19,
        };
        assert_eq!(err.to_string(), "Invalid input: expected 20 answers, got 19");
        assert!(err.is_invalid_input());
        assert!(!err.is_invalid_token());
    }

    #[test]
    fn test_out_of_range_display() {
        let err = CoreError::AnswerOutOfRange {
            position: 7,
            value: 6,
            min: 1,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: answer 7 is 6, expected a value between 1 and 5"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_token_is_not_input_error() {
        let err = CoreError::InvalidToken("missing field 'accuracy'".to_string());
        assert!(err.is_invalid_token());
        assert!(!err.is_invalid_input());
        assert!(err.to_string().contains("accuracy"));
    }
}

//! Timescope Core - Core types and definitions for the Timescope assessment engine
//!
//! This crate provides the fundamental types used across the Timescope ecosystem:
//! - Answers, response sets and score profiles
//! - Sub-scales and the bands a profile is classified into
//! - Stored score records and respondent metadata
//! - The [`Instrument`] reference document (questions, cut points,
//!   compound rules and recommendation copy)
//! - Error types

pub mod error;
pub mod instrument;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use instrument::{
    Affirmation, AxisDefinition, BandRules, CompoundRule, Instrument, MatrixDefinition, Method,
    NumberedItem, RecommendationEntry, RecommendationRule, ScaleOption, SubscaleDefinition,
};
pub use types::{
    Answer, Band, BandSet, Level, Perspective, ResponseSet, Role, ScoreProfile, StoredRecord,
    Subscale, SubscaleScore, ANSWER_MAX, ANSWER_MIN, ITEMS_PER_SUBSCALE, ITEM_COUNT, SCORE_MAX,
    SCORE_MIN,
};

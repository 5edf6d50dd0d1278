//! Timescope assessment engine
//!
//! Turns twenty Likert answers into a self-describing [`Assessment`]:
//!
//! ```text
//! answers ─▶ ScoreAggregator ─▶ ScoreProfile ─┬─▶ BandClassifier ─▶ RecommendationResolver
//!                                             └─▶ PercentileRanker ◀─ RecordStore::fetch_all
//! ```
//!
//! With consent, the totals are appended to the record store afterwards.
//!
//! ```rust,no_run
//! use timescope_engine::{AssessmentEngineBuilder, Submission};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = AssessmentEngineBuilder::new().build().await?;
//! let assessment = engine
//!     .assess(Submission::new(vec![3; 20]).with_consent(true))
//!     .await?;
//! println!("{}", assessment.render_text());
//! println!("share: ?{}", assessment.share_query());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod assessment;
pub mod builder;
pub mod classifier;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod percentile;
pub mod resolver;

pub use aggregator::ScoreAggregator;
pub use assessment::{
    Assessment, PersistenceStatus, PerspectiveSummary, ScaleSummary, Submission,
};
pub use builder::AssessmentEngineBuilder;
pub use classifier::BandClassifier;
pub use codec::{RangePolicy, ResultCodec, ResultToken};
pub use config::EngineConfig;
pub use engine::AssessmentEngine;
pub use error::{EngineError, Result};
pub use matrix::{AxisView, MatrixView, Region};
pub use percentile::{
    percentile_below, Percentile, PercentileRanker, PercentileResult, DEFAULT_MIN_SAMPLE_SIZE,
};
pub use resolver::RecommendationResolver;

// Re-export commonly used types from dependencies
pub use timescope_core::{Instrument, Role, ScoreProfile};
pub use timescope_repository::{RecordStore, StoreConfig};

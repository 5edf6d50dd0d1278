//! Domain types for the assessment engine

pub mod answer;
pub mod band;
pub mod profile;
pub mod record;
pub mod subscale;

pub use answer::{Answer, ResponseSet, ANSWER_MAX, ANSWER_MIN, ITEMS_PER_SUBSCALE, ITEM_COUNT};
pub use band::{Band, BandSet, Level};
pub use profile::{ScoreProfile, SubscaleScore, SCORE_MAX, SCORE_MIN};
pub use record::{Role, StoredRecord};
pub use subscale::{Perspective, Subscale};

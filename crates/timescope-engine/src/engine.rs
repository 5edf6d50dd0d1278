//! The assessment pipeline

use chrono::Utc;
use std::sync::Arc;
use timescope_core::{
    BandSet, Instrument, Perspective, RecommendationEntry, ScoreProfile, StoredRecord, Subscale,
};
use timescope_repository::RecordStore;
use tracing::{debug, info, warn};

use crate::aggregator::ScoreAggregator;
use crate::assessment::{
    Assessment, PersistenceStatus, PerspectiveSummary, ScaleSummary, Submission,
};
use crate::classifier::BandClassifier;
use crate::codec::{ResultCodec, ResultToken};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::matrix::MatrixView;
use crate::percentile::{PercentileRanker, PercentileResult};
use crate::resolver::RecommendationResolver;

/// Scores submissions, ranks them against the stored population and
/// assembles the full result
///
/// The engine holds no mutable state; share it across requests behind an
/// `Arc`.
pub struct AssessmentEngine {
    instrument: Arc<Instrument>,
    aggregator: ScoreAggregator,
    classifier: BandClassifier,
    resolver: RecommendationResolver,
    ranker: PercentileRanker,
    codec: ResultCodec,
    store: Arc<dyn RecordStore>,
}

impl AssessmentEngine {
    pub(crate) fn new(
        instrument: Instrument,
        config: EngineConfig,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            aggregator: ScoreAggregator::new(),
            classifier: BandClassifier::from_instrument(&instrument),
            resolver: RecommendationResolver::from_instrument(&instrument),
            ranker: PercentileRanker::new(config.min_sample_size),
            codec: ResultCodec::new(config.range_policy),
            instrument: Arc::new(instrument),
            store,
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn codec(&self) -> &ResultCodec {
        &self.codec
    }

    /// Score a submission
    ///
    /// Only malformed answers fail. A store that cannot be read leaves every
    /// percentile unavailable; a store that cannot be written is reported in
    /// [`Assessment::persistence`]. The population is read before the
    /// respondent's own record is appended.
    pub async fn assess(&self, submission: Submission) -> Result<Assessment> {
        let profile = self.aggregator.aggregate(&submission.answers)?;
        debug!("Aggregated profile {:?}", profile);

        let percentiles = self.rank(&profile).await;

        let persistence = if submission.consent {
            let record = StoredRecord::from_profile(
                &profile,
                submission.nickname,
                submission.role,
                Utc::now(),
            );
            match self.store.append(&record).await {
                Ok(()) => {
                    info!("Stored record in {} store", self.store.name());
                    PersistenceStatus::Stored
                }
                Err(e) => {
                    warn!("Failed to store record in {} store: {}", self.store.name(), e);
                    PersistenceStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        } else {
            PersistenceStatus::Skipped
        };

        Ok(self.evaluate_with(profile, percentiles, persistence))
    }

    /// Rebuild a shared result from its query string
    ///
    /// Fails with an invalid-token error; callers fall back to the
    /// questionnaire.
    pub async fn from_query(&self, query: &str) -> Result<Assessment> {
        let profile = self.codec.decode_query(query)?;
        let percentiles = self.rank(&profile).await;
        Ok(self.evaluate_with(profile, percentiles, PersistenceStatus::Skipped))
    }

    /// Rebuild a shared result from a decoded token
    pub async fn from_token(&self, token: &ResultToken) -> Result<Assessment> {
        let profile = self.codec.decode(token)?;
        let percentiles = self.rank(&profile).await;
        Ok(self.evaluate_with(profile, percentiles, PersistenceStatus::Skipped))
    }

    /// Rank a profile against the stored population
    pub async fn rank(&self, profile: &ScoreProfile) -> PercentileResult {
        match self.store.fetch_all().await {
            Ok(records) => {
                debug!("Ranking against {} stored records", records.len());
                self.ranker.rank_profile(profile, &records)
            }
            Err(e) => {
                warn!("Failed to read {} store, skipping ranking: {}", self.store.name(), e);
                PercentileResult::unavailable(0)
            }
        }
    }

    /// Classify and resolve a profile without touching the store
    pub fn evaluate(&self, profile: ScoreProfile) -> Assessment {
        self.evaluate_with(
            profile,
            PercentileResult::unavailable(0),
            PersistenceStatus::Skipped,
        )
    }

    fn evaluate_with(
        &self,
        profile: ScoreProfile,
        percentiles: PercentileResult,
        persistence: PersistenceStatus,
    ) -> Assessment {
        let bands = self.classifier.classify(&profile);

        let recommendations: Vec<RecommendationEntry> = self
            .resolver
            .resolve(&bands)
            .into_iter()
            .map(|mut entry| {
                entry.rationale = entry.render_rationale(&profile);
                entry
            })
            .collect();
        let affirmations = self.resolver.affirmations(&bands);
        let optimal_message = recommendations
            .is_empty()
            .then(|| self.instrument.optimal_message.clone());

        let summary = [Perspective::Future, Perspective::Past]
            .into_iter()
            .map(|perspective| PerspectiveSummary {
                perspective,
                title: perspective.title().to_string(),
                scales: perspective
                    .subscales()
                    .into_iter()
                    .map(|subscale| self.scale_summary(subscale, &profile, &bands))
                    .collect(),
            })
            .collect();

        let matrices = self
            .instrument
            .matrices
            .iter()
            .map(|def| MatrixView::build(def, &profile, &bands, self.classifier.rules()))
            .collect();

        Assessment {
            instrument_version: self.instrument.version.clone(),
            scores: profile,
            summary,
            recommendations,
            affirmations,
            optimal_message,
            percentiles,
            matrices,
            token: self.codec.encode(&profile),
            persistence,
            bands,
        }
    }

    fn scale_summary(
        &self,
        subscale: Subscale,
        profile: &ScoreProfile,
        bands: &BandSet,
    ) -> ScaleSummary {
        let band = bands.simple().find(|b| b.subscale() == Some(subscale)).cloned();
        ScaleSummary {
            subscale,
            name: self.instrument.subscale_name(subscale),
            score: profile.score(subscale),
            band_label: band.as_ref().map(|b| self.instrument.band_label(b)),
            band,
        }
    }
}

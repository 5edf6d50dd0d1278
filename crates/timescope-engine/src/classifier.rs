//! Sub-scale totals to qualitative bands

use timescope_core::{Band, BandRules, BandSet, Instrument, ScoreProfile, Subscale};

/// Splits each sub-scale at the instrument's cut point and derives compound
/// bands from the instrument's conjunction rules
#[derive(Debug, Clone)]
pub struct BandClassifier {
    rules: BandRules,
}

impl BandClassifier {
    pub fn new(rules: BandRules) -> Self {
        Self { rules }
    }

    pub fn from_instrument(instrument: &Instrument) -> Self {
        Self::new(instrument.bands.clone())
    }

    pub fn rules(&self) -> &BandRules {
        &self.rules
    }

    /// Classify a profile
    ///
    /// Always yields exactly one simple band per sub-scale. Compound bands
    /// are evaluated against the simple bands only.
    pub fn classify(&self, profile: &ScoreProfile) -> BandSet {
        let mut bands: BandSet = Subscale::ALL
            .into_iter()
            .map(|subscale| Band::simple(subscale, self.rules.level_of(profile.score(subscale))))
            .collect();

        let derived: Vec<Band> = self
            .rules
            .compound
            .iter()
            .filter(|rule| bands.contains_all(&rule.all))
            .map(|rule| rule.band())
            .collect();
        for band in derived {
            bands.insert(band);
        }

        bands
    }
}

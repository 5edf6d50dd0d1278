//! Bands to recommendations

use timescope_core::{Affirmation, BandSet, Instrument, RecommendationEntry, RecommendationRule};

/// Walks the instrument's priority table and collects every entry whose
/// conditions hold
#[derive(Debug, Clone)]
pub struct RecommendationResolver {
    table: Vec<RecommendationRule>,
    affirmations: Vec<Affirmation>,
}

impl RecommendationResolver {
    pub fn new(table: Vec<RecommendationRule>, affirmations: Vec<Affirmation>) -> Self {
        Self {
            table,
            affirmations,
        }
    }

    pub fn from_instrument(instrument: &Instrument) -> Self {
        Self::new(
            instrument.recommendations.clone(),
            instrument.affirmations.clone(),
        )
    }

    /// Entries that apply, in table order
    pub fn resolve(&self, bands: &BandSet) -> Vec<RecommendationEntry> {
        self.table
            .iter()
            .filter(|rule| bands.contains_all(&rule.when))
            .map(|rule| rule.entry.clone())
            .collect()
    }

    /// Positive messages for the bands that need no action
    pub fn affirmations(&self, bands: &BandSet) -> Vec<Affirmation> {
        self.affirmations
            .iter()
            .filter(|affirmation| bands.contains(&affirmation.band))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::BandClassifier;
    use timescope_core::{Band, Level, ScoreProfile, Subscale};

    fn resolve(profile: ScoreProfile) -> (Vec<String>, Vec<String>) {
        let instrument = Instrument::builtin().unwrap();
        let bands = BandClassifier::from_instrument(&instrument).classify(&profile);
        let resolver = RecommendationResolver::from_instrument(&instrument);

        let entries = resolver.resolve(&bands).into_iter().map(|e| e.id).collect();
        let affirmations = resolver
            .affirmations(&bands)
            .into_iter()
            .map(|a| a.band.id())
            .collect();
        (entries, affirmations)
    }

    #[test]
    fn test_all_threes() {
        let (entries, affirmations) = resolve(ScoreProfile::uniform(15));
        assert_eq!(entries, vec!["anxiety_management", "bandwidth_optimization"]);
        assert_eq!(
            affirmations,
            vec!["accuracy_high", "positivity_positive", "ideal_balance"]
        );
    }

    #[test]
    fn test_all_ones() {
        let (entries, affirmations) = resolve(ScoreProfile::uniform(5));
        assert_eq!(
            entries,
            vec!["future_connection", "calibration", "self_efficacy"]
        );
        assert!(!entries.contains(&"reality_check".to_string()));
        assert_eq!(affirmations, vec!["quantity_low"]);
    }

    #[test]
    fn test_reality_check_follows_calibration() {
        let (entries, _) = resolve(ScoreProfile::new(15, 8, 8, 20));
        assert_eq!(
            entries,
            vec!["anxiety_management", "calibration", "reality_check"]
        );
    }

    #[test]
    fn test_order_follows_table_not_band_order() {
        let instrument = Instrument::builtin().unwrap();
        let resolver = RecommendationResolver::from_instrument(&instrument);

        // Inserted in reverse of table priority
        let mut bands = BandSet::new();
        bands.insert(Band::simple(Subscale::Positivity, Level::Low));
        bands.insert(Band::simple(Subscale::Quantity, Level::High));
        bands.insert(Band::simple(Subscale::Intensity, Level::Low));

        let ids: Vec<String> = resolver.resolve(&bands).into_iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec!["future_connection", "bandwidth_optimization", "self_efficacy"]
        );
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let resolver = RecommendationResolver::new(vec![], vec![]);
        let bands: BandSet = [Band::simple(Subscale::Accuracy, Level::Low)]
            .into_iter()
            .collect();
        assert!(resolver.resolve(&bands).is_empty());
        assert!(resolver.affirmations(&bands).is_empty());
    }
}

//! Bands: qualitative labels attached to a score profile
//!
//! A simple band splits one sub-scale at the cut point; a compound band is
//! named by the instrument and holds when a conjunction of simple bands does.
//! Bands are identified by snake_case strings such as `intensity_weak`,
//! `accuracy_low` or `optimism_bias`.

use crate::error::CoreError;
use crate::types::Subscale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Side of the midpoint split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Sub-scale specific label: intensity reads weak/strong, positivity
    /// reads negative/positive, the rest read low/high
    pub fn label_for(&self, subscale: Subscale) -> &'static str {
        match (subscale, self) {
            (Subscale::Intensity, Level::Low) => "weak",
            (Subscale::Intensity, Level::High) => "strong",
            (Subscale::Positivity, Level::Low) => "negative",
            (Subscale::Positivity, Level::High) => "positive",
            (_, Level::Low) => "low",
            (_, Level::High) => "high",
        }
    }

    fn parse_for(subscale: Subscale, label: &str) -> Option<Level> {
        [Level::Low, Level::High]
            .into_iter()
            .find(|level| level.label_for(subscale) == label)
            .or(match label {
                "low" => Some(Level::Low),
                "high" => Some(Level::High),
                _ => None,
            })
    }
}

/// A qualitative label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Band {
    /// One side of a sub-scale's midpoint split
    Simple { subscale: Subscale, level: Level },
    /// A named conjunction across sub-scales
    Compound(String),
}

impl Band {
    pub fn simple(subscale: Subscale, level: Level) -> Self {
        Band::Simple { subscale, level }
    }

    pub fn compound(id: impl Into<String>) -> Self {
        Band::Compound(id.into())
    }

    /// Stable identifier, e.g. `positivity_negative` or `ideal_balance`
    pub fn id(&self) -> String {
        match self {
            Band::Simple { subscale, level } => {
                format!("{}_{}", subscale.key(), level.label_for(*subscale))
            }
            Band::Compound(id) => id.clone(),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Band::Compound(_))
    }

    pub fn subscale(&self) -> Option<Subscale> {
        match self {
            Band::Simple { subscale, .. } => Some(*subscale),
            Band::Compound(_) => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for Band {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidValue("empty band identifier".to_string()));
        }

        if let Some((prefix, label)) = s.split_once('_') {
            if let Ok(subscale) = prefix.parse::<Subscale>() {
                return Level::parse_for(subscale, label)
                    .map(|level| Band::simple(subscale, level))
                    .ok_or_else(|| {
                        CoreError::InvalidValue(format!(
                            "unknown level '{}' for subscale '{}'",
                            label, subscale
                        ))
                    });
            }
        }

        Ok(Band::Compound(s.to_string()))
    }
}

impl TryFrom<String> for Band {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Band> for String {
    fn from(band: Band) -> Self {
        band.id()
    }
}

/// The bands a profile carries
///
/// Iteration order is the derived [`Band`] ordering (simple bands in
/// sub-scale order first, then compound bands by id), never insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandSet(BTreeSet<Band>);

impl BandSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, band: Band) -> bool {
        self.0.insert(band)
    }

    pub fn contains(&self, band: &Band) -> bool {
        self.0.contains(band)
    }

    /// True when every band in `bands` is present
    pub fn contains_all<'a>(&self, bands: impl IntoIterator<Item = &'a Band>) -> bool {
        bands.into_iter().all(|band| self.contains(band))
    }

    /// Level of the simple band recorded for `subscale`, if any
    pub fn level(&self, subscale: Subscale) -> Option<Level> {
        self.0.iter().find_map(|band| match band {
            Band::Simple { subscale: s, level } if *s == subscale => Some(*level),
            _ => None,
        })
    }

    pub fn simple(&self) -> impl Iterator<Item = &Band> {
        self.0.iter().filter(|band| !band.is_compound())
    }

    pub fn compound(&self) -> impl Iterator<Item = &Band> {
        self.0.iter().filter(|band| band.is_compound())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Band> for BandSet {
    fn from_iter<I: IntoIterator<Item = Band>>(iter: I) -> Self {
        BandSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BandSet {
    type Item = &'a Band;
    type IntoIter = std::collections::btree_set::Iter<'a, Band>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_band_ids() {
        assert_eq!(Band::simple(Subscale::Intensity, Level::Low).id(), "intensity_weak");
        assert_eq!(Band::simple(Subscale::Intensity, Level::High).id(), "intensity_strong");
        assert_eq!(Band::simple(Subscale::Quantity, Level::High).id(), "quantity_high");
        assert_eq!(Band::simple(Subscale::Accuracy, Level::Low).id(), "accuracy_low");
        assert_eq!(
            Band::simple(Subscale::Positivity, Level::Low).id(),
            "positivity_negative"
        );
    }

    #[test]
    fn test_parse_simple_and_compound() {
        assert_eq!(
            "positivity_positive".parse::<Band>().unwrap(),
            Band::simple(Subscale::Positivity, Level::High)
        );
        // Generic low/high labels are accepted for every sub-scale
        assert_eq!(
            "intensity_low".parse::<Band>().unwrap(),
            Band::simple(Subscale::Intensity, Level::Low)
        );
        assert_eq!(
            "optimism_bias".parse::<Band>().unwrap(),
            Band::compound("optimism_bias")
        );
        assert!("accuracy_sideways".parse::<Band>().is_err());
        assert!("".parse::<Band>().is_err());
    }

    #[test]
    fn test_band_serde_uses_ids() {
        let band = Band::simple(Subscale::Quantity, Level::Low);
        let json = serde_json::to_string(&band).unwrap();
        assert_eq!(json, "\"quantity_low\"");

        let back: Band = serde_json::from_str(&json).unwrap();
        assert_eq!(back, band);
    }

    #[test]
    fn test_band_set_order_ignores_insertion_order() {
        let mut a = BandSet::new();
        a.insert(Band::compound("ideal_balance"));
        a.insert(Band::simple(Subscale::Positivity, Level::High));
        a.insert(Band::simple(Subscale::Intensity, Level::Low));

        let b: BandSet = vec![
            Band::simple(Subscale::Intensity, Level::Low),
            Band::compound("ideal_balance"),
            Band::simple(Subscale::Positivity, Level::High),
        ]
        .into_iter()
        .collect();

        let ids_a: Vec<String> = a.iter().map(Band::id).collect();
        let ids_b: Vec<String> = b.iter().map(Band::id).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(ids_a[0], "intensity_weak");
        assert_eq!(ids_a[2], "ideal_balance");
    }

    #[test]
    fn test_band_set_level_lookup() {
        let set: BandSet = vec![Band::simple(Subscale::Accuracy, Level::High)]
            .into_iter()
            .collect();
        assert_eq!(set.level(Subscale::Accuracy), Some(Level::High));
        assert_eq!(set.level(Subscale::Quantity), None);
        assert_eq!(set.simple().count(), 1);
        assert_eq!(set.compound().count(), 0);
    }
}

//! Instrument reference document
//!
//! The instrument bundles everything about the questionnaire that is content
//! rather than logic: statement text, answer labels, the cut point, compound
//! band rules, the recommendation priority table, affirmations and the
//! scatter-matrix layout. It is versioned and injected into the classifier and
//! resolver, so wording or thresholds can change without touching the engine.
//!
//! A default instrument is embedded in the crate:
//!
//! ```rust
//! use timescope_core::Instrument;
//!
//! let instrument = Instrument::builtin().unwrap();
//! assert_eq!(instrument.item_count(), 20);
//! ```

mod recommendation;
mod rules;

pub use recommendation::{Affirmation, Method, RecommendationEntry, RecommendationRule};
pub use rules::{BandRules, CompoundRule};

use crate::error::{CoreError, Result};
use crate::types::{
    Band, Level, Subscale, ANSWER_MAX, ANSWER_MIN, ITEMS_PER_SUBSCALE, ITEM_COUNT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BUILTIN_INSTRUMENT: &str = include_str!("default_instrument.yaml");

/// The questionnaire definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub version: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Labels for the five agreement levels
    pub options: Vec<ScaleOption>,

    /// Statements per sub-scale
    pub subscales: Vec<SubscaleDefinition>,

    pub bands: BandRules,

    /// Priority-ordered recommendation table
    pub recommendations: Vec<RecommendationRule>,

    #[serde(default)]
    pub affirmations: Vec<Affirmation>,

    /// Shown when no recommendation applies
    pub optimal_message: String,

    #[serde(default)]
    pub matrices: Vec<MatrixDefinition>,
}

/// One point on the agreement scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub value: i64,
    pub label: String,
}

/// Statements and display name of one sub-scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscaleDefinition {
    pub subscale: Subscale,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<String>,
}

/// Layout of a two-axis scatter view over a pair of sub-scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixDefinition {
    pub id: String,
    pub title: String,
    pub x: AxisDefinition,
    pub y: AxisDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDefinition {
    pub subscale: Subscale,
    pub label: String,
    pub low_label: String,
    pub high_label: String,
}

/// A statement with its 1-based position in the questionnaire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberedItem<'a> {
    pub number: usize,
    pub subscale: Subscale,
    pub text: &'a str,
}

impl Instrument {
    /// Parse and validate an instrument from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let instrument: Instrument = serde_yaml::from_str(content)
            .map_err(|e| CoreError::InvalidInstrument(format!("failed to parse YAML: {}", e)))?;
        instrument.validate()?;
        log::debug!(
            "Loaded instrument '{}' version {}",
            instrument.title,
            instrument.version
        );
        Ok(instrument)
    }

    /// The instrument embedded in this crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_INSTRUMENT)
    }

    pub fn subscale(&self, subscale: Subscale) -> Option<&SubscaleDefinition> {
        self.subscales.iter().find(|def| def.subscale == subscale)
    }

    /// Display name of a sub-scale, falling back to its key
    pub fn subscale_name(&self, subscale: Subscale) -> String {
        self.subscale(subscale)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| subscale.key().to_string())
    }

    /// Display label of a band, falling back to its identifier
    pub fn band_label(&self, band: &Band) -> String {
        if let Some(label) = self.bands.labels.get(band) {
            return label.clone();
        }
        if let Band::Compound(id) = band {
            if let Some(name) = self
                .bands
                .compound
                .iter()
                .find(|rule| &rule.id == id)
                .and_then(|rule| rule.name.clone())
            {
                return name;
            }
        }
        band.id()
    }

    pub fn affirmation(&self, band: &Band) -> Option<&Affirmation> {
        self.affirmations.iter().find(|a| &a.band == band)
    }

    pub fn item_count(&self) -> usize {
        self.subscales.iter().map(|def| def.items.len()).sum()
    }

    /// All statements numbered in questionnaire order
    pub fn numbered_items(&self) -> Vec<NumberedItem<'_>> {
        Subscale::ALL
            .iter()
            .filter_map(|subscale| self.subscale(*subscale))
            .flat_map(|def| {
                def.items.iter().enumerate().map(move |(offset, text)| NumberedItem {
                    number: def.subscale.index() * ITEMS_PER_SUBSCALE + offset + 1,
                    subscale: def.subscale,
                    text: text.as_str(),
                })
            })
            .collect()
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        self.validate_options()?;
        self.validate_subscales()?;
        self.validate_bands()?;
        self.validate_recommendations()?;
        self.validate_matrices()?;
        Ok(())
    }

    fn validate_options(&self) -> Result<()> {
        let values: Vec<i64> = self.options.iter().map(|o| o.value).collect();
        let expected: Vec<i64> = (ANSWER_MIN..=ANSWER_MAX).collect();
        if values != expected {
            return Err(CoreError::InvalidInstrument(format!(
                "options must cover {:?} in order, got {:?}",
                expected, values
            )));
        }
        Ok(())
    }

    fn validate_subscales(&self) -> Result<()> {
        for subscale in Subscale::ALL {
            let count = self
                .subscales
                .iter()
                .filter(|def| def.subscale == subscale)
                .count();
            if count != 1 {
                return Err(CoreError::InvalidInstrument(format!(
                    "subscale '{}' must be defined exactly once, found {}",
                    subscale, count
                )));
            }
        }

        for def in &self.subscales {
            if def.items.len() != ITEMS_PER_SUBSCALE {
                return Err(CoreError::InvalidInstrument(format!(
                    "subscale '{}' must have {} items, found {}",
                    def.subscale,
                    ITEMS_PER_SUBSCALE,
                    def.items.len()
                )));
            }
        }

        debug_assert_eq!(self.item_count(), ITEM_COUNT);
        Ok(())
    }

    fn validate_bands(&self) -> Result<()> {
        if !self.bands.is_cut_point_valid() {
            return Err(CoreError::InvalidInstrument(format!(
                "cut point {} leaves one band unreachable",
                self.bands.cut_point
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.bands.compound {
            if rule.id.parse::<Band>().ok() != Some(rule.band()) {
                return Err(CoreError::InvalidInstrument(format!(
                    "compound band id '{}' collides with a simple band",
                    rule.id
                )));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(CoreError::InvalidInstrument(format!(
                    "duplicate compound band '{}'",
                    rule.id
                )));
            }
            if rule.all.is_empty() {
                return Err(CoreError::InvalidInstrument(format!(
                    "compound band '{}' has no conditions",
                    rule.id
                )));
            }
            if let Some(band) = rule.all.iter().find(|band| band.is_compound()) {
                return Err(CoreError::InvalidInstrument(format!(
                    "compound band '{}' may only combine simple bands, found '{}'",
                    rule.id, band
                )));
            }
        }
        Ok(())
    }

    fn validate_recommendations(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for rule in &self.recommendations {
            if rule.when.is_empty() {
                return Err(CoreError::InvalidInstrument(format!(
                    "recommendation '{}' has no bands",
                    rule.entry.id
                )));
            }
            if !ids.insert(rule.entry.id.as_str()) {
                return Err(CoreError::InvalidInstrument(format!(
                    "duplicate recommendation '{}'",
                    rule.entry.id
                )));
            }
            for band in &rule.when {
                self.ensure_known(band)?;
            }
        }

        for affirmation in &self.affirmations {
            self.ensure_known(&affirmation.band)?;
        }
        Ok(())
    }

    fn validate_matrices(&self) -> Result<()> {
        for matrix in &self.matrices {
            if matrix.x.subscale == matrix.y.subscale {
                return Err(CoreError::InvalidInstrument(format!(
                    "matrix '{}' plots '{}' against itself",
                    matrix.id, matrix.x.subscale
                )));
            }
        }
        Ok(())
    }

    fn ensure_known(&self, band: &Band) -> Result<()> {
        match band {
            Band::Simple { .. } => Ok(()),
            Band::Compound(id) => {
                if self.bands.compound.iter().any(|rule| &rule.id == id) {
                    Ok(())
                } else {
                    Err(CoreError::InvalidInstrument(format!(
                        "band '{}' is not declared",
                        id
                    )))
                }
            }
        }
    }

    /// Every simple band this instrument can produce
    pub fn simple_bands() -> impl Iterator<Item = Band> {
        Subscale::ALL.into_iter().flat_map(|subscale| {
            [Level::Low, Level::High]
                .into_iter()
                .map(move |level| Band::simple(subscale, level))
        })
    }
}

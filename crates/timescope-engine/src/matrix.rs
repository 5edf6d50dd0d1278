//! Scatter matrix views
//!
//! Each matrix plots one sub-scale against another on fixed 0–25 axes with
//! dashed dividers at the band boundary and the (high, high) quadrant
//! highlighted. The engine emits the plot as data; drawing is left to the
//! rendering surface.

use serde::{Deserialize, Serialize};
use timescope_core::{AxisDefinition, BandRules, BandSet, Level, MatrixDefinition, ScoreProfile};

/// Lower bound of both axes
pub const AXIS_MIN: f64 = 0.0;

/// Upper bound of both axes
pub const AXIS_MAX: f64 = 25.0;

/// One plotted matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixView {
    pub id: String,
    pub title: String,
    pub x: AxisView,
    pub y: AxisView,
    pub axis_min: f64,
    pub axis_max: f64,
    /// Where the dashed lines cross both axes
    pub divider: f64,
    pub highlight: Region,
}

/// One axis with the respondent's position on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisView {
    #[serde(flatten)]
    pub definition: AxisDefinition,
    pub value: i32,
    /// Side of the divider the point falls on, `None` when the band set has
    /// no band for this sub-scale
    pub level: Option<Level>,
}

/// Axis-aligned rectangle in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_from: f64,
    pub x_to: f64,
    pub y_from: f64,
    pub y_to: f64,
}

impl MatrixView {
    /// Lay out a matrix for a classified profile
    ///
    /// Quadrant placement is read from `bands`, so the view always agrees
    /// with the classification.
    pub fn build(
        definition: &MatrixDefinition,
        profile: &ScoreProfile,
        bands: &BandSet,
        rules: &BandRules,
    ) -> Self {
        let axis = |def: &AxisDefinition| AxisView {
            definition: def.clone(),
            value: profile.score(def.subscale),
            level: bands.level(def.subscale),
        };
        let divider = rules.divider();

        Self {
            id: definition.id.clone(),
            title: definition.title.clone(),
            x: axis(&definition.x),
            y: axis(&definition.y),
            axis_min: AXIS_MIN,
            axis_max: AXIS_MAX,
            divider,
            highlight: Region {
                x_from: divider,
                x_to: AXIS_MAX,
                y_from: divider,
                y_to: AXIS_MAX,
            },
        }
    }

    /// The respondent's point
    pub fn point(&self) -> (i32, i32) {
        (self.x.value, self.y.value)
    }

    /// Whether the point sits in the highlighted quadrant
    pub fn in_highlight(&self) -> bool {
        self.x.level == Some(Level::High) && self.y.level == Some(Level::High)
    }

    /// Label of the point's side on each axis, e.g. ("Low", "Strong")
    pub fn quadrant_labels(&self) -> (Option<&str>, Option<&str>) {
        (self.x.side_label(), self.y.side_label())
    }
}

impl AxisView {
    pub fn side_label(&self) -> Option<&str> {
        self.level.map(|level| match level {
            Level::Low => self.definition.low_label.as_str(),
            Level::High => self.definition.high_label.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::BandClassifier;
    use timescope_core::{Instrument, Subscale};

    fn views(profile: ScoreProfile) -> Vec<MatrixView> {
        let instrument = Instrument::builtin().unwrap();
        let classifier = BandClassifier::from_instrument(&instrument);
        let bands = classifier.classify(&profile);
        instrument
            .matrices
            .iter()
            .map(|def| MatrixView::build(def, &profile, &bands, classifier.rules()))
            .collect()
    }

    #[test]
    fn test_future_matrix_axes() {
        let views = views(ScoreProfile::new(20, 8, 10, 10));
        let future = &views[0];

        assert_eq!(future.title, "Future Matrix");
        assert_eq!(future.x.definition.subscale, Subscale::Quantity);
        assert_eq!(future.y.definition.subscale, Subscale::Intensity);
        assert_eq!(future.point(), (8, 20));
        assert_eq!(future.quadrant_labels(), (Some("Low"), Some("Strong")));
        assert!(!future.in_highlight());
    }

    #[test]
    fn test_layout_constants() {
        let views = views(ScoreProfile::uniform(15));
        let past = &views[1];

        assert_eq!(past.title, "Past Matrix");
        assert_eq!(past.divider, 12.5);
        assert_eq!((past.axis_min, past.axis_max), (0.0, 25.0));
        assert_eq!(
            past.highlight,
            Region {
                x_from: 12.5,
                x_to: 25.0,
                y_from: 12.5,
                y_to: 25.0
            }
        );
        assert!(past.in_highlight());
        assert_eq!(past.quadrant_labels(), (Some("Positive"), Some("Correct")));
    }
}

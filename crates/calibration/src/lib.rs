//! Calibration Profile Provider
//!
//! Loads the per-category feature statistics emitted by the offline
//! calibration tool and derives the subject-specific thresholds the
//! classifiers score against. Calibration is a pure enhancement: a missing
//! or malformed profile degrades silently to the fixed fallback thresholds
//! and is never fatal.

use std::collections::HashMap;
use std::path::Path;

use feature_extract::FrameFeatures;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Calibration error types (internal; loading never fails outward)
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Failed to read calibration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed calibration profile: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-feature observed range in the reference images
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f32,
    pub max: f32,
}

/// Aggregate statistics for one calibration category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Number of reference images that contributed
    pub sample_count: u32,
    /// Per-feature averages, same field set as `FrameFeatures`
    pub avg: FrameFeatures,
    /// Per-feature min/max across the samples
    #[serde(default)]
    pub range: HashMap<String, FeatureRange>,
}

/// Category → statistics mapping, read-only after load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationProfile {
    categories: HashMap<String, CategoryStats>,
}

impl CalibrationProfile {
    /// Load a profile from disk, degrading to the empty profile on any
    /// failure. Absence of calibration is a supported state.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(profile) => {
                info!(
                    path = %path.display(),
                    categories = profile.categories.len(),
                    "Loaded calibration profile"
                );
                profile
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Calibration unavailable, using fallback thresholds"
                );
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, CalibrationError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&raw)?)
    }

    /// Parse a profile from its JSON representation
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryStats> {
        self.categories.get(name)
    }

    /// Total reference samples across categories, for health reporting
    pub fn total_samples(&self) -> u32 {
        self.categories.values().map(|c| c.sample_count).sum()
    }

    fn avg(&self, name: &str) -> Option<&FrameFeatures> {
        self.categories.get(name).map(|c| &c.avg)
    }
}

/// Derived score thresholds with fixed fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Eyes count as low when EAR drops below this
    pub ear: f32,
    /// Head counts as down when nose_pos rises above this
    pub nose: f32,
    /// Mouth counts as open/smiling above this ratio
    pub mouth: f32,
    /// Brows count as lowered below this raise value
    pub brow: f32,
}

impl Thresholds {
    pub const FALLBACK_EAR: f32 = 0.22;
    pub const FALLBACK_NOSE: f32 = 0.65;
    pub const FALLBACK_MOUTH: f32 = 0.08;
    pub const FALLBACK_BROW: f32 = 0.015;

    /// Derive thresholds from a profile, falling back per threshold when the
    /// categories it needs are missing or their averages are unusable.
    ///
    /// Several derived values end up as divisors in the scoring factors, so
    /// anything non-finite or non-positive degrades to the fallback rather
    /// than poisoning downstream arithmetic.
    pub fn from_profile(profile: &CalibrationProfile) -> Self {
        let ear = match (profile.avg("fatigue"), profile.avg("focus")) {
            (Some(fatigue), Some(focus)) => (fatigue.ear + focus.ear) / 2.0,
            _ => Self::FALLBACK_EAR,
        };
        let nose = match (profile.avg("fatigue"), profile.avg("focus")) {
            (Some(fatigue), Some(focus)) => (fatigue.nose_pos + focus.nose_pos) / 2.0,
            _ => Self::FALLBACK_NOSE,
        };
        let mouth = profile
            .avg("happy")
            .map(|happy| happy.mouth_ratio * 0.7)
            .unwrap_or(Self::FALLBACK_MOUTH);
        let brow = profile
            .avg("sad")
            .map(|sad| sad.brow_raise * 1.2)
            .unwrap_or(Self::FALLBACK_BROW);

        Self {
            ear: usable(ear, Self::FALLBACK_EAR),
            nose: usable(nose, Self::FALLBACK_NOSE),
            mouth: usable(mouth, Self::FALLBACK_MOUTH),
            brow: usable(brow, Self::FALLBACK_BROW),
        }
    }
}

fn usable(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ear: Self::FALLBACK_EAR,
            nose: Self::FALLBACK_NOSE,
            mouth: Self::FALLBACK_MOUTH,
            brow: Self::FALLBACK_BROW,
        }
    }
}

//! Screen Content Classification
//!
//! Stateless per-frame pipeline, independent of the face session state:
//! raw image statistics (brightness, saturation spread, edge density,
//! darkness, uniformity) feed an ordered activity rule table with fixed
//! distraction scores. A frame that cannot be decoded classifies as
//! `UNKNOWN` rather than failing the caller.

pub mod classify;
pub mod config;
pub mod stats;

pub use classify::{Activity, ScreenAnalysis};
pub use config::ScreenConfig;
pub use stats::ScreenFeatures;

use image::DynamicImage;
use thiserror::Error;
use tracing::warn;

/// Screen analysis error types (internal; the public API degrades instead)
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Stateless screen analyzer; freely shareable across threads
#[derive(Debug, Clone, Default)]
pub struct ScreenAnalyzer {
    config: ScreenConfig,
}

impl ScreenAnalyzer {
    pub fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Decode and classify raw image bytes. Decode failures report
    /// `UNKNOWN` with the default score, never an error.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> ScreenAnalysis {
        match image::load_from_memory(bytes) {
            Ok(image) => self.analyze_image(&image),
            Err(e) => {
                warn!(error = %e, "Screen frame decode failed");
                ScreenAnalysis::unknown(&self.config)
            }
        }
    }

    /// Classify an already-decoded frame
    pub fn analyze_image(&self, image: &DynamicImage) -> ScreenAnalysis {
        let features = ScreenFeatures::compute(image, &self.config);
        classify::classify(&features, &self.config)
    }
}

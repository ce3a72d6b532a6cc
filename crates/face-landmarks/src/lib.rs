//! Facial landmark types
//!
//! Input types for the behavioral scoring pipeline. Landmarks arrive from an
//! external face-mesh detector as normalized image-relative coordinates; this
//! crate only defines the point/frame containers and the fixed anatomical
//! index tables the feature extractor addresses them with.

pub mod mesh;

pub use mesh::{MeshIndices, MESH_POINT_COUNT};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Landmark error types
#[derive(Error, Debug)]
pub enum LandmarkError {
    /// A configured mesh index does not fit in the landmark sequence
    #[error("{name} index {index} exceeds mesh size {mesh_size}")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        mesh_size: usize,
    },
}

/// A single normalized facial keypoint in [0,1] image-relative coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detected face: an ordered, index-addressable landmark sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Mesh points in detector order (~468 for a full face mesh)
    pub points: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// No face was detected in this frame
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Get a landmark by mesh index, clamping missing tail points to origin.
    ///
    /// Detectors occasionally emit truncated meshes; reading past the end is
    /// treated as degenerate geometry rather than a panic.
    pub fn point(&self, index: usize) -> Landmark {
        self.points.get(index).copied().unwrap_or_default()
    }
}

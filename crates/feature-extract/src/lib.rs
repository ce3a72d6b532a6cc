//! Geometric Feature Extraction
//!
//! Turns one frame of facial landmarks into the scalar measurements the
//! classifiers score against: eye aspect ratio, head pitch/roll proxies,
//! mouth geometry, and brow geometry. All functions are pure; no state is
//! carried between frames.

use face_landmarks::{Landmark, LandmarkFrame, MeshIndices};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EAR reported when the eye contour collapses horizontally
pub const DEGENERATE_EAR: f32 = 0.25;

/// Nose position reported when the forehead-chin span is zero
pub const DEGENERATE_NOSE_POS: f32 = 0.5;

/// Feature extraction error types
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Landmarks absent: a valid state, handled upstream with defaults
    #[error("No face detected")]
    NoFace,

    /// Malformed index table (programmer error, caught at startup)
    #[error(transparent)]
    BadIndexTable(#[from] face_landmarks::LandmarkError),
}

/// Derived scalar measurements for one frame.
///
/// The field set doubles as the per-category averages in the calibration
/// profile, so names here are part of the calibration file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameFeatures {
    /// Eye aspect ratio, average of both eyes
    pub ear: f32,
    /// Vertical nose-tip position in the forehead-chin span (head pitch proxy)
    pub nose_pos: f32,
    /// Head tilt of the eye line, degrees
    pub roll: f32,
    /// Vertical mouth opening over horizontal mouth width
    pub mouth_ratio: f32,
    /// Horizontal distance between mouth corners
    pub lip_stretch: f32,
    /// Signed vertical inner-lip gap
    pub mouth_open: f32,
    /// Nose-bridge y minus average inner-brow y; positive = brows raised
    pub brow_raise: f32,
    /// Left/right inner-brow asymmetry, kept for calibration use
    pub brow_furrow: f32,
}

/// Landmark-to-feature extractor with a validated mesh index table
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    indices: MeshIndices,
}

impl FeatureExtractor {
    /// Create an extractor, validating the index table up front
    pub fn new(indices: MeshIndices) -> Result<Self, ExtractError> {
        indices.validate()?;
        Ok(Self { indices })
    }

    pub fn with_default_mesh() -> Result<Self, ExtractError> {
        Self::new(MeshIndices::default())
    }

    /// Extract all frame features from one landmark frame
    pub fn extract(&self, frame: &LandmarkFrame) -> Result<FrameFeatures, ExtractError> {
        if frame.is_empty() {
            return Err(ExtractError::NoFace);
        }
        let ix = &self.indices;

        let left_ear = eye_aspect_ratio(&eye_contour(frame, &ix.left_eye));
        let right_ear = eye_aspect_ratio(&eye_contour(frame, &ix.right_eye));
        let ear = (left_ear + right_ear) / 2.0;

        let nose = frame.point(ix.nose_tip);
        let forehead = frame.point(ix.forehead);
        let chin = frame.point(ix.chin);
        let face_h = (chin.y - forehead.y).abs();
        let nose_pos = if face_h > 0.0 {
            (nose.y - forehead.y) / face_h
        } else {
            DEGENERATE_NOSE_POS
        };

        let le = frame.point(ix.left_eye_corner);
        let re = frame.point(ix.right_eye_corner);
        let roll = (re.y - le.y).atan2(re.x - le.x).to_degrees();

        let mouth_left = frame.point(ix.mouth_left);
        let mouth_right = frame.point(ix.mouth_right);
        let upper_lip = frame.point(ix.upper_lip);
        let lower_lip = frame.point(ix.lower_lip);
        let mouth_w = (mouth_right.x - mouth_left.x).abs();
        let mouth_h = (lower_lip.y - upper_lip.y).abs();
        let mouth_ratio = if mouth_w > 0.0 { mouth_h / mouth_w } else { 0.0 };
        let lip_stretch = mouth_w;
        let mouth_open = lower_lip.y - upper_lip.y;

        let left_brow =
            (frame.point(ix.left_brow_inner).y + frame.point(ix.left_brow_mid).y) / 2.0;
        let right_brow =
            (frame.point(ix.right_brow_inner).y + frame.point(ix.right_brow_mid).y) / 2.0;
        let avg_brow = (left_brow + right_brow) / 2.0;
        let brow_raise = frame.point(ix.nose_bridge).y - avg_brow;
        let brow_furrow =
            (frame.point(ix.left_brow_inner).y - frame.point(ix.right_brow_inner).y).abs();

        Ok(FrameFeatures {
            ear,
            nose_pos,
            roll,
            mouth_ratio,
            lip_stretch,
            mouth_open,
            brow_raise,
            brow_furrow,
        })
    }

    /// Horizontal offset between the eye-line midpoint and the nose tip.
    ///
    /// Positive = eyes shifted right of the nose; drives gaze direction.
    pub fn eye_nose_offset(&self, frame: &LandmarkFrame) -> Result<f32, ExtractError> {
        if frame.is_empty() {
            return Err(ExtractError::NoFace);
        }
        let le = frame.point(self.indices.left_eye_corner);
        let re = frame.point(self.indices.right_eye_corner);
        let nose = frame.point(self.indices.nose_tip);
        Ok((le.x + re.x) / 2.0 - nose.x)
    }
}

fn eye_contour(frame: &LandmarkFrame, indices: &[usize; 6]) -> [Landmark; 6] {
    let mut points = [Landmark::default(); 6];
    for (slot, &index) in points.iter_mut().zip(indices.iter()) {
        *slot = frame.point(index);
    }
    points
}

/// Eye aspect ratio over 6 ordered contour points:
/// `(‖p1-p5‖ + ‖p2-p4‖) / (2·‖p0-p3‖)`
pub fn eye_aspect_ratio(points: &[Landmark; 6]) -> f32 {
    let a = points[1].distance(&points[5]);
    let b = points[2].distance(&points[4]);
    let c = points[0].distance(&points[3]);
    if c > 0.0 {
        (a + b) / (2.0 * c)
    } else {
        DEGENERATE_EAR
    }
}

//! MediaPipe FaceMesh index tables
//!
//! Fixed anatomical indices into the 468-point mesh. The table is validated
//! once at pipeline startup; a bad index is a programmer error and fails
//! construction rather than surfacing per-frame.

use crate::LandmarkError;
use serde::{Deserialize, Serialize};

/// Number of points in the full face mesh
pub const MESH_POINT_COUNT: usize = 468;

/// Anatomical index table for feature extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshIndices {
    /// Left eye contour: outer corner, upper lid (x2), inner corner, lower lid (x2)
    pub left_eye: [usize; 6],
    /// Right eye contour, mirror order of the left
    pub right_eye: [usize; 6],
    /// Nose tip
    pub nose_tip: usize,
    /// Nose bridge (between the brows)
    pub nose_bridge: usize,
    /// Top of the forehead
    pub forehead: usize,
    /// Chin point
    pub chin: usize,
    /// Outer eye corners, used for roll and gaze
    pub left_eye_corner: usize,
    pub right_eye_corner: usize,
    /// Mouth corners
    pub mouth_left: usize,
    pub mouth_right: usize,
    /// Inner lips, upper and lower midpoints
    pub upper_lip: usize,
    pub lower_lip: usize,
    /// Brow points: inner and mid, per side
    pub left_brow_inner: usize,
    pub left_brow_mid: usize,
    pub right_brow_inner: usize,
    pub right_brow_mid: usize,
}

impl Default for MeshIndices {
    fn default() -> Self {
        Self {
            left_eye: [33, 7, 163, 144, 145, 153],
            right_eye: [362, 398, 384, 385, 387, 263],
            nose_tip: 1,
            nose_bridge: 6,
            forehead: 10,
            chin: 152,
            left_eye_corner: 33,
            right_eye_corner: 263,
            mouth_left: 61,
            mouth_right: 291,
            upper_lip: 13,
            lower_lip: 14,
            left_brow_inner: 107,
            left_brow_mid: 66,
            right_brow_inner: 336,
            right_brow_mid: 296,
        }
    }
}

impl MeshIndices {
    /// Validate every index against the mesh size. Called at startup.
    pub fn validate(&self) -> Result<(), LandmarkError> {
        let named: [(&'static str, usize); 14] = [
            ("nose_tip", self.nose_tip),
            ("nose_bridge", self.nose_bridge),
            ("forehead", self.forehead),
            ("chin", self.chin),
            ("left_eye_corner", self.left_eye_corner),
            ("right_eye_corner", self.right_eye_corner),
            ("mouth_left", self.mouth_left),
            ("mouth_right", self.mouth_right),
            ("upper_lip", self.upper_lip),
            ("lower_lip", self.lower_lip),
            ("left_brow_inner", self.left_brow_inner),
            ("left_brow_mid", self.left_brow_mid),
            ("right_brow_inner", self.right_brow_inner),
            ("right_brow_mid", self.right_brow_mid),
        ];

        for (name, index) in named {
            Self::check(name, index)?;
        }
        for &index in self.left_eye.iter() {
            Self::check("left_eye", index)?;
        }
        for &index in self.right_eye.iter() {
            Self::check("right_eye", index)?;
        }
        Ok(())
    }

    fn check(name: &'static str, index: usize) -> Result<(), LandmarkError> {
        if index >= MESH_POINT_COUNT {
            return Err(LandmarkError::IndexOutOfRange {
                name,
                index,
                mesh_size: MESH_POINT_COUNT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(MeshIndices::default().validate().is_ok());
    }

    #[test]
    fn test_bad_index_rejected() {
        let table = MeshIndices {
            chin: MESH_POINT_COUNT,
            ..Default::default()
        };
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            LandmarkError::IndexOutOfRange { name: "chin", .. }
        ));
    }

    #[test]
    fn test_bad_eye_contour_rejected() {
        let mut table = MeshIndices::default();
        table.right_eye[3] = 9999;
        assert!(table.validate().is_err());
    }
}

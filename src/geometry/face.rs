//! Cube face identification, enumeration and the per-face axis table.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifies one of the six faces of the unit cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face (right)
    PosX = 0,
    /// -X face (left)
    NegX = 1,
    /// +Y face (top)
    PosY = 2,
    /// -Y face (bottom)
    NegY = 3,
    /// +Z face (front)
    PosZ = 4,
    /// -Z face (back)
    NegZ = 5,
}

/// Fixed orientation of a face: outward normal plus the cube axes that
/// face-local `u` and `v` increase along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub normal: Vec3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

static FACE_FRAMES: [FaceFrame; 6] = [
    FaceFrame { normal: Vec3::X, u_axis: Vec3::NEG_Z, v_axis: Vec3::Y },
    FaceFrame { normal: Vec3::NEG_X, u_axis: Vec3::Z, v_axis: Vec3::Y },
    FaceFrame { normal: Vec3::Y, u_axis: Vec3::X, v_axis: Vec3::Z },
    FaceFrame { normal: Vec3::NEG_Y, u_axis: Vec3::X, v_axis: Vec3::NEG_Z },
    FaceFrame { normal: Vec3::Z, u_axis: Vec3::X, v_axis: Vec3::Y },
    FaceFrame { normal: Vec3::NEG_Z, u_axis: Vec3::NEG_X, v_axis: Vec3::Y },
];

/// Tile (column, row) of each face in the 4x3 unfolded-cross atlas.
const ATLAS_TILES: [(f32, f32); 6] = [
    (2.0, 1.0),
    (0.0, 1.0),
    (1.0, 0.0),
    (1.0, 2.0),
    (1.0, 1.0),
    (3.0, 1.0),
];

impl CubeFace {
    /// Number of cube faces.
    pub const COUNT: usize = 6;

    /// All six faces in iteration order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Returns all six cube faces in order.
    pub const fn all() -> [CubeFace; 6] {
        Self::ALL
    }

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<CubeFace> {
        match index {
            0 => Some(CubeFace::PosX),
            1 => Some(CubeFace::NegX),
            2 => Some(CubeFace::PosY),
            3 => Some(CubeFace::NegY),
            4 => Some(CubeFace::PosZ),
            5 => Some(CubeFace::NegZ),
            _ => None,
        }
    }

    /// Returns a short name for the face (e.g., "posx", "negy").
    pub const fn short_name(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx",
            CubeFace::NegX => "negx",
            CubeFace::PosY => "posy",
            CubeFace::NegY => "negy",
            CubeFace::PosZ => "posz",
            CubeFace::NegZ => "negz",
        }
    }

    /// Orientation frame of this face.
    #[inline]
    pub fn frame(self) -> &'static FaceFrame {
        &FACE_FRAMES[self.index()]
    }

    /// Outward unit normal of the face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        self.frame().normal
    }

    /// True when `u_axis x v_axis` points along the outward normal.
    pub fn is_right_handed(self) -> bool {
        let f = self.frame();
        f.u_axis.cross(f.v_axis).dot(f.normal) > 0.0
    }

    /// Face whose axis has the largest absolute component of `dir`.
    ///
    /// Ties go to X, then Y, then Z; a zero component counts as positive.
    pub fn from_direction(dir: Vec3) -> CubeFace {
        let abs = dir.abs();
        if abs.x >= abs.y && abs.x >= abs.z {
            if dir.x >= 0.0 {
                CubeFace::PosX
            } else {
                CubeFace::NegX
            }
        } else if abs.y >= abs.z {
            if dir.y >= 0.0 {
                CubeFace::PosY
            } else {
                CubeFace::NegY
            }
        } else if dir.z >= 0.0 {
            CubeFace::PosZ
        } else {
            CubeFace::NegZ
        }
    }

    /// Atlas tile (column, row) in the 4x3 cross layout.
    pub(crate) fn atlas_tile(self) -> (f32, f32) {
        ATLAS_TILES[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_faces() {
        let faces = CubeFace::all();
        assert_eq!(faces.len(), CubeFace::COUNT);
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_from_index() {
        for i in 0..6 {
            let face = CubeFace::from_index(i).unwrap();
            assert_eq!(face.index(), i);
        }
        assert!(CubeFace::from_index(6).is_none());
    }

    #[test]
    fn test_short_names() {
        assert_eq!(CubeFace::PosX.short_name(), "posx");
        assert_eq!(CubeFace::NegY.short_name(), "negy");
    }

    #[test]
    fn test_frames_are_orthonormal() {
        for face in CubeFace::ALL {
            let f = face.frame();
            assert_eq!(f.normal.dot(f.u_axis), 0.0);
            assert_eq!(f.normal.dot(f.v_axis), 0.0);
            assert_eq!(f.u_axis.dot(f.v_axis), 0.0);
        }
    }

    #[test]
    fn test_only_y_faces_are_left_handed() {
        for face in CubeFace::ALL {
            let expected = !matches!(face, CubeFace::PosY | CubeFace::NegY);
            assert_eq!(face.is_right_handed(), expected, "{:?}", face);
        }
    }

    #[test]
    fn test_from_direction_axis_aligned() {
        for face in CubeFace::ALL {
            assert_eq!(CubeFace::from_direction(face.normal()), face);
            assert_eq!(CubeFace::from_direction(face.normal() * 3.5), face);
        }
    }

    #[test]
    fn test_from_direction_ties_prefer_x_then_y() {
        assert_eq!(CubeFace::from_direction(Vec3::new(1.0, 1.0, 1.0)), CubeFace::PosX);
        assert_eq!(CubeFace::from_direction(Vec3::new(0.0, -1.0, 1.0)), CubeFace::NegY);
        assert_eq!(CubeFace::from_direction(Vec3::ZERO), CubeFace::PosX);
    }

    #[test]
    fn test_faces_are_ordered_for_iteration() {
        let mut faces = CubeFace::ALL;
        faces.reverse();
        faces.sort();
        assert_eq!(faces, CubeFace::ALL);
    }
}

//! Unit cube face descriptors used by the mesher

use crate::core::types::IVec3;

/// One face of a unit cube: outward direction and four corners in `[0,1]³`.
///
/// Corners are ordered so that indices `0,1,2` and `2,1,3` are the face's two
/// counter-clockwise triangles seen from outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub dir: IVec3,
    pub corners: [[f32; 3]; 4],
}

/// Triangle indices of one quad relative to its first vertex
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// The six cube faces: left, right, bottom, top, back, front
pub const FACES: [Face; 6] = [
    // left
    Face {
        dir: IVec3::new(-1, 0, 0),
        corners: [[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
    },
    // right
    Face {
        dir: IVec3::new(1, 0, 0),
        corners: [[1.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    },
    // bottom
    Face {
        dir: IVec3::new(0, -1, 0),
        corners: [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
    },
    // top
    Face {
        dir: IVec3::new(0, 1, 0),
        corners: [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
    },
    // back
    Face {
        dir: IVec3::new(0, 0, -1),
        corners: [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    },
    // front
    Face {
        dir: IVec3::new(0, 0, 1),
        corners: [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_corners_lie_on_face_plane() {
        for face in &FACES {
            let dir = face.dir.as_vec3();
            // Plane offset: 1 for positive faces, 0 for negative faces
            let plane = if dir.max_element() > 0.0 { 1.0 } else { 0.0 };
            for corner in face.corners {
                let c = Vec3::from(corner);
                assert_eq!(c.dot(dir.abs()), plane, "face {:?}", face.dir);
            }
        }
    }

    #[test]
    fn test_triangles_wind_outward() {
        for face in &FACES {
            let dir = face.dir.as_vec3();
            for tri in QUAD_INDICES.chunks_exact(3) {
                let a = Vec3::from(face.corners[tri[0] as usize]);
                let b = Vec3::from(face.corners[tri[1] as usize]);
                let c = Vec3::from(face.corners[tri[2] as usize]);
                let n = (b - a).cross(c - a);
                assert!(n.dot(dir) > 0.0, "face {:?} winds inward", face.dir);
            }
        }
    }

    #[test]
    fn test_directions_are_distinct_units() {
        for (i, a) in FACES.iter().enumerate() {
            assert_eq!(a.dir.abs().element_sum(), 1);
            for b in &FACES[i + 1..] {
                assert_ne!(a.dir, b.dir);
            }
        }
    }
}

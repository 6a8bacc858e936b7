//! Axis-aligned bounds of mesh geometry

use crate::core::types::Vec3;

/// Box spanned by its `min` and `max` corners, inclusive
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`, `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Aabb>, p| {
            Some(match acc {
                Some(aabb) => aabb.including(p),
                None => Aabb::new(p, p),
            })
        })
    }

    /// Grown to cover `point`
    pub fn including(self, point: Vec3) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Moved by `offset`, e.g. from chunk-local into world space
    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

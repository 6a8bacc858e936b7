//! Ray segment type

use crate::core::error::Error;
use crate::core::types::{DVec3, Result};

/// A bounded ray segment: normalized direction plus the distance to its end point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction from origin towards the end point
    pub direction: DVec3,
    /// Euclidean distance between the two end points
    pub length: f64,
}

impl Ray {
    /// Build the segment from `start` to `end`.
    ///
    /// Fails with `InvalidInput` for non-finite points, coincident end points,
    /// or end points so far apart that the length overflows.
    pub fn segment(start: DVec3, end: DVec3) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::InvalidInput(format!(
                "ray end points must be finite, got {start} -> {end}"
            )));
        }

        let delta = end - start;
        let length = delta.length();
        if length == 0.0 {
            return Err(Error::InvalidInput(format!(
                "zero-length ray at {start}"
            )));
        }

        // Far-apart finite points can still overflow the difference
        let direction = delta / length;
        if !length.is_finite() || !direction.is_finite() {
            return Err(Error::InvalidInput(format!(
                "ray {start} -> {end} is too long to traverse"
            )));
        }

        Ok(Self {
            origin: start,
            direction,
            length,
        })
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// End point of the segment
    pub fn end(&self) -> DVec3 {
        self.at(self.length)
    }
}

//! Ray picking against the voxel grid.
//!
//! Incremental grid traversal after Amanatides & Woo, "A Fast Voxel Traversal
//! Algorithm for Ray Tracing". The ray is a bounded segment: traversal stops
//! once the parameter passes the segment length.

use crate::core::types::{DVec3, IVec3, MaterialId, Result, AIR};
use crate::math::Ray;
use super::world::VoxelWorld;

/// First solid voxel along a ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Point where the ray entered the voxel
    pub position: DVec3,
    /// Outward normal of the entered face; zero when the ray starts inside a solid voxel
    pub normal: IVec3,
    /// Material of the hit voxel
    pub voxel: MaterialId,
}

/// Walk the grid cells crossed by `ray` and return the first non-empty one.
///
/// On exact ties between boundary parameters, x is stepped only when strictly
/// nearest; otherwise y is stepped only when strictly nearer than z, so ties
/// resolve to z. Keep this order: it decides which face is reported when a ray
/// passes exactly through an edge or corner.
pub fn intersect_ray(world: &VoxelWorld, ray: &Ray) -> Option<RayHit> {
    let start = ray.origin;
    let d = ray.direction;

    let mut cell = start.floor().as_ivec3();
    let step = IVec3::new(
        if d.x > 0.0 { 1 } else { -1 },
        if d.y > 0.0 { 1 } else { -1 },
        if d.z > 0.0 { 1 } else { -1 },
    );

    // Parameter distance to cross one whole cell; infinite along a zero component
    let t_delta = DVec3::new((1.0 / d.x).abs(), (1.0 / d.y).abs(), (1.0 / d.z).abs());

    let dist = DVec3::new(
        boundary_distance(start.x, cell.x, step.x),
        boundary_distance(start.y, cell.y, step.y),
        boundary_distance(start.z, cell.z, step.z),
    );

    // Parameter of the next boundary crossing on each axis
    let mut t_max = DVec3::new(
        next_boundary(t_delta.x, dist.x),
        next_boundary(t_delta.y, dist.y),
        next_boundary(t_delta.z, dist.z),
    );

    let mut t = 0.0;
    let mut stepped_axis: Option<usize> = None;

    while t <= ray.length {
        let voxel = world.get_voxel(cell);
        if voxel != AIR {
            let mut normal = IVec3::ZERO;
            if let Some(axis) = stepped_axis {
                normal[axis] = -step[axis];
            }
            return Some(RayHit {
                position: ray.at(t),
                normal,
                voxel,
            });
        }

        let axis = if t_max.x < t_max.y {
            if t_max.x < t_max.z { 0 } else { 2 }
        } else if t_max.y < t_max.z {
            1
        } else {
            2
        };

        // Past 2^53 the boundary parameter stops advancing in f64
        let next = t_max[axis] + t_delta[axis];
        if next <= t_max[axis] {
            break;
        }

        cell[axis] = cell[axis].wrapping_add(step[axis]);
        t = t_max[axis];
        t_max[axis] = next;
        stepped_axis = Some(axis);
    }

    None
}

/// Distance from `start` to the next cell boundary in the direction of `step`
#[inline]
fn boundary_distance(start: f64, cell: i32, step: i32) -> f64 {
    if step > 0 {
        cell as f64 + 1.0 - start
    } else {
        start - cell as f64
    }
}

#[inline]
fn next_boundary(t_delta: f64, dist: f64) -> f64 {
    if t_delta < f64::INFINITY {
        t_delta * dist
    } else {
        f64::INFINITY
    }
}

impl VoxelWorld {
    /// Pick the first solid voxel on the segment `start -> end`.
    ///
    /// Fails with `InvalidInput` when the segment has zero length.
    pub fn intersect_ray(&self, start: DVec3, end: DVec3) -> Result<Option<RayHit>> {
        let ray = Ray::segment(start, end)?;
        Ok(intersect_ray(self, &ray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn world_with(voxels: &[(IVec3, MaterialId)]) -> VoxelWorld {
        let mut world = VoxelWorld::new(8).unwrap();
        for &(pos, id) in voxels {
            world.set_voxel(pos, id, true);
        }
        world
    }

    #[test]
    fn test_hit_from_negative_x() {
        let world = world_with(&[(IVec3::ZERO, 4)]);
        let hit = world
            .intersect_ray(DVec3::new(-5.0, 0.5, 0.5), DVec3::new(5.0, 0.5, 0.5))
            .unwrap()
            .expect("ray should hit");

        assert_eq!(hit.normal, IVec3::new(-1, 0, 0));
        assert_eq!(hit.voxel, 4);
        assert!((hit.position - DVec3::new(0.0, 0.5, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_hit_from_above() {
        let world = world_with(&[(IVec3::new(2, 0, 3), 7)]);
        let hit = world
            .intersect_ray(DVec3::new(2.5, 10.0, 3.5), DVec3::new(2.5, -10.0, 3.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.normal, IVec3::new(0, 1, 0));
        assert_eq!(hit.voxel, 7);
        assert!((hit.position.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_across_negative_chunk() {
        let world = world_with(&[(IVec3::new(-20, 0, 0), 2)]);
        let hit = world
            .intersect_ray(DVec3::new(0.5, 0.5, 0.5), DVec3::new(-30.5, 0.5, 0.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.normal, IVec3::new(1, 0, 0));
        assert!((hit.position.x - -19.0).abs() < 1e-9);
    }

    #[test]
    fn test_miss_returns_none() {
        let world = world_with(&[(IVec3::ZERO, 1)]);
        let miss = world
            .intersect_ray(DVec3::new(-5.0, 3.5, 0.5), DVec3::new(5.0, 3.5, 0.5))
            .unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn test_segment_too_short_misses() {
        let world = world_with(&[(IVec3::ZERO, 1)]);
        let miss = world
            .intersect_ray(DVec3::new(-5.0, 0.5, 0.5), DVec3::new(-1.5, 0.5, 0.5))
            .unwrap();
        assert!(miss.is_none());

        // Ending exactly on the face still reaches it
        let hit = world
            .intersect_ray(DVec3::new(-5.0, 0.5, 0.5), DVec3::new(0.0, 0.5, 0.5))
            .unwrap();
        assert!(hit.is_some());
    }

    #[test]
    fn test_start_inside_solid_has_zero_normal() {
        let world = world_with(&[(IVec3::ZERO, 3)]);
        let hit = world
            .intersect_ray(DVec3::splat(0.5), DVec3::new(4.0, 0.5, 0.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.normal, IVec3::ZERO);
        assert_eq!(hit.position, DVec3::splat(0.5));
        assert_eq!(hit.voxel, 3);
    }

    #[test]
    fn test_degenerate_ray_is_invalid_input() {
        let world = VoxelWorld::default();
        let p = DVec3::new(1.0, 1.0, 1.0);
        assert!(matches!(world.intersect_ray(p, p), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_tie_y_z_steps_z() {
        // Diagonal in y/z through the edge at y = z = 1; both boundaries tie.
        // Cells (0,1,0) and (0,0,1) are solid: z is stepped first, so (0,0,1)
        // is reported through its back face.
        let world = world_with(&[(IVec3::new(0, 1, 0), 5), (IVec3::new(0, 0, 1), 6)]);
        let hit = world
            .intersect_ray(DVec3::new(0.5, 0.5, 0.5), DVec3::new(0.5, 3.5, 3.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.voxel, 6);
        assert_eq!(hit.normal, IVec3::new(0, 0, -1));
    }

    #[test]
    fn test_tie_x_y_does_not_step_x() {
        // Diagonal in x/y through the edge at x = y = 1: x only wins when
        // strictly nearest, so y is stepped.
        let world = world_with(&[(IVec3::new(1, 0, 0), 5), (IVec3::new(0, 1, 0), 6)]);
        let hit = world
            .intersect_ray(DVec3::new(0.5, 0.5, 0.5), DVec3::new(3.5, 3.5, 0.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.voxel, 6);
        assert_eq!(hit.normal, IVec3::new(0, -1, 0));
    }

    #[test]
    fn test_tie_x_z_steps_z() {
        let world = world_with(&[(IVec3::new(1, 0, 0), 5), (IVec3::new(0, 0, 1), 6)]);
        let hit = world
            .intersect_ray(DVec3::new(0.5, 0.5, 0.5), DVec3::new(3.5, 0.5, 3.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.voxel, 6);
        assert_eq!(hit.normal, IVec3::new(0, 0, -1));
    }

    #[test]
    fn test_negative_direction_on_grid_line() {
        // Start exactly on a boundary heading in -x: the first step happens at t = 0
        let world = world_with(&[(IVec3::new(1, 0, 0), 9)]);
        let hit = world
            .intersect_ray(DVec3::new(2.0, 0.5, 0.5), DVec3::new(-3.0, 0.5, 0.5))
            .unwrap()
            .unwrap();

        assert_eq!(hit.voxel, 9);
        assert_eq!(hit.normal, IVec3::new(1, 0, 0));
        assert_eq!(hit.position, DVec3::new(2.0, 0.5, 0.5));
    }

    #[test]
    fn test_far_out_segments_terminate() {
        let world = world_with(&[]);
        let hit = world
            .intersect_ray(DVec3::new(1e17, 0.5, 0.5), DVec3::new(1e17 + 1e6, 0.5, 0.5))
            .unwrap();
        assert!(hit.is_none());
        assert!(matches!(
            world.intersect_ray(DVec3::new(-1e308, 0.5, 0.5), DVec3::new(1e308, 0.5, 0.5)),
            Err(Error::InvalidInput(_))
        ));
    }

}

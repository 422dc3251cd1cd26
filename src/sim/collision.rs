//! Collision detection for the drone against static buildings
//!
//! The drone is a sphere, buildings are axis-aligned boxes. A candidate pose
//! either commits as a whole or is rejected as a whole; there is no sliding.

use glam::Vec3;

use super::kinematics::DronePose;
use super::world::{Aabb, WorldModel};

/// Result of validating a candidate pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Candidate is collision-free and becomes the new pose
    Committed(DronePose),
    /// Candidate touches a building; the previous pose stays
    Blocked { building_id: u32 },
}

/// Sphere vs. box overlap test
///
/// Touching counts: a sphere exactly tangent to a face is a collision.
#[inline]
pub fn sphere_intersects_aabb(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    closest.distance_squared(center) <= radius * radius
}

/// Validate a candidate pose against every building
///
/// The first intersecting building in iteration order is reported.
pub fn resolve_move(candidate: DronePose, world: &WorldModel, radius: f32) -> MoveOutcome {
    match world.first_intersecting(candidate.position, radius) {
        Some(building) => MoveOutcome::Blocked {
            building_id: building.id,
        },
        None => MoveOutcome::Committed(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::{Building, BuildingKind};

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_sphere_clear_of_box() {
        assert!(!sphere_intersects_aabb(Vec3::new(3.0, 0.5, 0.5), 1.0, &unit_box()));
    }

    #[test]
    fn test_sphere_overlapping_face() {
        assert!(sphere_intersects_aabb(Vec3::new(1.5, 0.5, 0.5), 1.0, &unit_box()));
    }

    #[test]
    fn test_sphere_tangent_counts_as_collision() {
        // Exactly one radius from the +X face
        assert!(sphere_intersects_aabb(Vec3::new(2.0, 0.5, 0.5), 1.0, &unit_box()));
        // A hair further is free
        assert!(!sphere_intersects_aabb(Vec3::new(2.001, 0.5, 0.5), 1.0, &unit_box()));
    }

    #[test]
    fn test_sphere_near_corner_uses_true_distance() {
        // Within radius on each axis but not diagonally
        let c = Vec3::new(1.8, 1.8, 0.5);
        assert!(!sphere_intersects_aabb(c, 1.0, &unit_box()));
    }

    #[test]
    fn test_center_inside_box() {
        assert!(sphere_intersects_aabb(Vec3::splat(0.5), 0.1, &unit_box()));
    }

    #[test]
    fn test_resolve_move_reports_first_building() {
        let world = WorldModel::new(vec![
            Building::new(7, BuildingKind::House, Vec3::ZERO),
            Building::new(8, BuildingKind::House, Vec3::new(1.0, 0.0, 0.0)),
        ]);
        let candidate = DronePose::new(Vec3::new(0.5, 2.0, 0.0), 0.0);
        assert_eq!(
            resolve_move(candidate, &world, 1.0),
            MoveOutcome::Blocked { building_id: 7 }
        );

        let free = DronePose::new(Vec3::new(0.0, 10.0, 0.0), 0.0);
        assert_eq!(resolve_move(free, &world, 1.0), MoveOutcome::Committed(free));
    }
}

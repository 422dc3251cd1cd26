//! Building cleaning
//!
//! Spraying near a building wears its dirt down. "Near" is measured from the
//! drone to the building's anchor point, not to its box, so tall or wide
//! buildings clean from further away on one side than the other.

use glam::Vec3;

use super::world::WorldModel;
use crate::tuning::Tuning;

/// Clean every building whose anchor is within the cleaning radius
///
/// Returns the ids of buildings that became fully clean on this pass.
pub fn clean_nearby(world: &mut WorldModel, drone_position: Vec3, tuning: &Tuning) -> Vec<u32> {
    let radius_sq = tuning.cleaning_radius * tuning.cleaning_radius;
    let mut finished = Vec::new();

    for building in world.buildings_mut() {
        if building.is_clean() || building.anchor.distance_squared(drone_position) > radius_sq {
            continue;
        }
        building.clean(tuning.cleaning_power);
        if building.is_clean() {
            finished.push(building.id);
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::{Building, BuildingKind};

    fn world() -> WorldModel {
        WorldModel::new(vec![
            Building::new(1, BuildingKind::House, Vec3::ZERO),
            Building::new(2, BuildingKind::House, Vec3::new(40.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn test_only_buildings_in_range_are_cleaned() {
        let mut world = world();
        let tuning = Tuning::default();
        clean_nearby(&mut world, Vec3::new(5.0, 3.0, 0.0), &tuning);
        assert_eq!(world.buildings()[0].dirt_level(), 100.0 - tuning.cleaning_power);
        assert_eq!(world.buildings()[1].dirt_level(), 100.0);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let mut world = world();
        let tuning = Tuning::default();
        let edge = Vec3::new(tuning.cleaning_radius, 0.0, 0.0);
        clean_nearby(&mut world, edge, &tuning);
        assert!(world.buildings()[0].dirt_level() < 100.0);
    }

    #[test]
    fn test_reports_completion_once() {
        let mut world = world();
        let tuning = Tuning {
            cleaning_power: 60.0,
            ..Default::default()
        };
        assert!(clean_nearby(&mut world, Vec3::ZERO, &tuning).is_empty());
        assert_eq!(clean_nearby(&mut world, Vec3::ZERO, &tuning), vec![1]);
        // Already clean: no-op
        assert!(clean_nearby(&mut world, Vec3::ZERO, &tuning).is_empty());
        assert_eq!(world.buildings()[0].dirt_level(), 0.0);
    }
}

//! Floating logo pickups
//!
//! A logo is collected when any spray particle passes within the collect
//! radius of it. Every logo is tested independently, so one particle can
//! collect several overlapping logos on the same tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{LOGO_BOB_HEIGHT, LOGO_SPIN_SPEED};

/// A floating logo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub position: Vec3,
    /// Text shown when the logo is collected
    pub info: String,
    pub collected: bool,
    /// Spin/bob phase (radians, cosmetic)
    #[serde(skip)]
    pub phase: f32,
}

impl Collectible {
    pub fn new(id: u32, position: Vec3, info: impl Into<String>) -> Self {
        Self {
            id,
            position,
            info: info.into(),
            collected: false,
            // Stagger so the logos don't bob in lockstep
            phase: id as f32 * 1.3,
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.phase = (self.phase + LOGO_SPIN_SPEED * dt) % std::f32::consts::TAU;
    }

    /// Where to draw the logo this frame
    pub fn display_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.phase.sin() * LOGO_BOB_HEIGHT
    }

    /// Any particle strictly within `radius`
    pub fn hit_by(&self, particles: &[Vec3], radius: f32) -> bool {
        let radius_sq = radius * radius;
        particles
            .iter()
            .any(|p| p.distance_squared(self.position) < radius_sq)
    }
}

/// Mark and remove every logo touched by a particle
///
/// Returns the logos collected this tick, in their original order.
pub fn collect_hits(
    collectibles: &mut Vec<Collectible>,
    particles: &[Vec3],
    radius: f32,
) -> Vec<Collectible> {
    if particles.is_empty() {
        return Vec::new();
    }

    let mut collected = Vec::new();
    collectibles.retain_mut(|logo| {
        if logo.collected || !logo.hit_by(particles, radius) {
            return true;
        }
        logo.collected = true;
        collected.push(logo.clone());
        false
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_requires_strictly_inside() {
        let logo = Collectible::new(1, Vec3::ZERO, "a");
        assert!(logo.hit_by(&[Vec3::new(0.49, 0.0, 0.0)], 0.5));
        assert!(!logo.hit_by(&[Vec3::new(0.5, 0.0, 0.0)], 0.5));
        assert!(!logo.hit_by(&[], 0.5));
    }

    #[test]
    fn test_collect_removes_hit_logos() {
        let mut logos = vec![
            Collectible::new(1, Vec3::ZERO, "a"),
            Collectible::new(2, Vec3::new(10.0, 0.0, 0.0), "b"),
        ];
        let hits = collect_hits(&mut logos, &[Vec3::new(0.1, 0.0, 0.0)], 0.5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert!(hits[0].collected);
        assert_eq!(logos.len(), 1);
        assert_eq!(logos[0].id, 2);
    }

    #[test]
    fn test_overlapping_logos_both_collected() {
        let mut logos = vec![
            Collectible::new(1, Vec3::new(1.0, 1.0, 1.0), "a"),
            Collectible::new(2, Vec3::new(1.0, 1.0, 1.0), "b"),
        ];
        let hits = collect_hits(&mut logos, &[Vec3::new(1.0, 1.2, 1.0)], 0.5);
        assert_eq!(hits.len(), 2);
        assert!(logos.is_empty());
    }

    #[test]
    fn test_many_particles_count_once() {
        let mut logos = vec![Collectible::new(1, Vec3::ZERO, "a")];
        let particles = vec![Vec3::splat(0.01); 50];
        assert_eq!(collect_hits(&mut logos, &particles, 0.5).len(), 1);
        assert!(collect_hits(&mut logos, &particles, 0.5).is_empty());
    }

    #[test]
    fn test_animation_is_cosmetic() {
        let mut logo = Collectible::new(3, Vec3::new(0.0, 4.0, 0.0), "a");
        logo.animate(0.7);
        let drawn = logo.display_position();
        assert!((drawn.y - 4.0).abs() <= LOGO_BOB_HEIGHT + 1e-6);
        assert_eq!(logo.position, Vec3::new(0.0, 4.0, 0.0));
    }
}

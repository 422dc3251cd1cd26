//! Spray particle simulation
//!
//! Particles live in the emitter's local frame: x/y are lateral offsets from
//! the spray axis, z is depth along it. The buffer is allocated when the
//! spray turns on and never grows; particles past the maximum depth are
//! recycled at the nozzle.

use glam::{Affine3A, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::kinematics::DronePose;
use crate::tuning::Tuning;

/// An active spray with its particle buffer
#[derive(Debug, Clone)]
pub struct SprayEmitter {
    particles: Vec<Vec3>,
    rng: Pcg32,
    step: f32,
    max_distance: f32,
    damping: f32,
    cone_spread: f32,
    respawn_jitter: f32,
    nozzle_offset: Vec3,
}

impl SprayEmitter {
    /// Allocate the buffer and lay out the full cone in one pass
    pub fn activate(capacity: usize, seed: u64, tuning: &Tuning) -> Self {
        let mut emitter = Self {
            particles: Vec::with_capacity(capacity),
            rng: Pcg32::seed_from_u64(seed),
            step: tuning.spray_step,
            max_distance: tuning.spray_max_distance,
            damping: tuning.spray_damping,
            cone_spread: tuning.spray_cone_spread,
            respawn_jitter: tuning.spray_respawn_jitter,
            nozzle_offset: tuning.nozzle_offset,
        };
        emitter.fill_cone(capacity);
        emitter
    }

    /// Particles further along the buffer start deeper and wider
    fn fill_cone(&mut self, capacity: usize) {
        self.particles.clear();
        for i in 0..capacity {
            let progress = i as f32 / capacity as f32;
            let spread = progress * self.cone_spread;
            let x = self.jitter(spread);
            let y = self.jitter(spread);
            self.particles.push(Vec3::new(x, y, progress * self.max_distance));
        }
    }

    /// Uniform offset in [-width/2, width/2)
    fn jitter(&mut self, width: f32) -> f32 {
        if width <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-0.5f32..0.5) * width
    }

    /// Move every particle one step down the axis
    ///
    /// A particle reaching the maximum depth (inclusive) respawns at the
    /// nozzle on the same tick.
    pub fn advance(&mut self) {
        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            p.z += self.step;
            p.x *= self.damping;
            p.y *= self.damping;
            if p.z >= self.max_distance {
                p = Vec3::new(
                    self.jitter(self.respawn_jitter),
                    self.jitter(self.respawn_jitter),
                    0.0,
                );
            }
            self.particles[i] = p;
        }
    }

    /// Local particle positions
    pub fn particles(&self) -> &[Vec3] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Vec3] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Emitter-local to world transform for the given drone pose
    ///
    /// The spray's +Z depth axis points along the drone's forward (-Z).
    pub fn world_transform(&self, pose: &DronePose) -> Affine3A {
        Affine3A::from_rotation_translation(pose.rotation(), pose.position)
            * Affine3A::from_translation(self.nozzle_offset)
            * Affine3A::from_quat(Quat::from_rotation_y(std::f32::consts::PI))
    }

    /// World-space particle positions for the given drone pose
    pub fn world_positions<'a>(&'a self, pose: &DronePose) -> impl Iterator<Item = Vec3> + 'a {
        let transform = self.world_transform(pose);
        self.particles.iter().map(move |p| transform.transform_point3(*p))
    }

    /// Nozzle position in world space
    pub fn nozzle_position(&self, pose: &DronePose) -> Vec3 {
        self.world_transform(pose).transform_point3(Vec3::ZERO)
    }
}

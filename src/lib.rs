//! Drone Wash - fly a cleaning drone through a tiny town
//!
//! Core modules:
//! - `sim`: Frame simulation (flight, collision, spray, collection, cleaning)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences persisted in LocalStorage
//! - `platform`: Browser input mapping

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{ConfigError, Tuning};

use glam::{Quat, Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta accepted from the browser (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Dirt level of a freshly built building
    pub const MAX_DIRT: f32 = 100.0;

    /// Number of logos placed in the default town
    pub const COLLECTIBLE_COUNT: usize = 5;

    /// Bobbing amplitude of floating logos (cosmetic)
    pub const LOGO_BOB_HEIGHT: f32 = 0.25;
    /// Logo spin speed (radians/sec, cosmetic)
    pub const LOGO_SPIN_SPEED: f32 = 1.5;
}

/// Normalized angle to [-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    (angle + PI).rem_euclid(TAU) - PI
}

/// Rotation about the +Y (up) axis for a yaw angle
#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Rotate a planar (x, z) offset into the world frame of the given yaw
#[inline]
pub fn rotate_planar(offset: Vec2, yaw: f32) -> Vec2 {
    let rotated = yaw_rotation(yaw) * Vec3::new(offset.x, 0.0, offset.y);
    Vec2::new(rotated.x, rotated.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn same_heading(a: f32, b: f32) -> bool {
        (a.sin() - b.sin()).abs() < 0.001 && (a.cos() - b.cos()).abs() < 0.001
    }

    #[test]
    fn test_normalize_angle() {
        // 3π lands on the ±π seam; either side is the same heading
        let wrapped = normalize_angle(3.0 * PI);
        assert!((-PI..=PI).contains(&wrapped));
        assert!(same_heading(wrapped, PI));
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 0.001);
        assert!((normalize_angle(5.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_normalize_huge_angle_terminates() {
        for angle in [1.0e8_f32, -3.0e9, 1.0e30] {
            let wrapped = normalize_angle(angle);
            assert!((-PI..=PI).contains(&wrapped), "{angle} -> {wrapped}");
        }
    }

    #[test]
    fn test_rotate_planar_quarter_turn() {
        // Forward (-Z) turned a quarter left ends up facing -X
        let out = rotate_planar(Vec2::new(0.0, -1.0), FRAC_PI_2);
        assert!((out.x + 1.0).abs() < 0.001);
        assert!(out.y.abs() < 0.001);
    }
}

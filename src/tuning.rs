//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`], so a
//! balance pass is a JSON edit instead of a rebuild.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Error raised while loading configuration or layout data
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// The JSON parsed but a value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Flight ===
    /// Horizontal speed (units/sec)
    pub move_speed: f32,
    /// Vertical speed (units/sec)
    pub climb_speed: f32,
    /// Yaw speed (radians/sec)
    pub rotation_speed: f32,
    /// Altitude floor for the drone
    pub min_altitude: f32,
    /// Drone sphere radius used for building collisions
    pub drone_radius: f32,

    // === Spray ===
    /// Particle buffer size while spraying
    pub spray_capacity: usize,
    /// Depth advanced by every particle per tick
    pub spray_step: f32,
    /// Depth at which a particle is recycled
    pub spray_max_distance: f32,
    /// Lateral damping factor applied per tick (0-1]
    pub spray_damping: f32,
    /// Lateral jitter of the farthest particle in the initial cone
    pub spray_cone_spread: f32,
    /// Lateral jitter of a recycled particle
    pub spray_respawn_jitter: f32,
    /// Nozzle position in the drone's local frame
    pub nozzle_offset: Vec3,

    // === Scoring / cleaning ===
    /// Particle-to-logo distance that counts as a hit
    pub collect_radius: f32,
    /// Drone-to-building-anchor distance within which spraying cleans
    pub cleaning_radius: f32,
    /// Dirt removed per tick from each building in range
    pub cleaning_power: f32,
    /// Logos needed to win
    pub collectible_target: u32,

    // === HUD ===
    /// How long a collision warning stays visible (seconds)
    pub warning_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            climb_speed: 5.0,
            rotation_speed: 2.0,
            min_altitude: 2.0,
            drone_radius: 1.0,

            spray_capacity: 1500,
            spray_step: 0.3,
            spray_max_distance: 10.0,
            spray_damping: 0.98,
            spray_cone_spread: 1.2,
            spray_respawn_jitter: 0.1,
            nozzle_offset: Vec3::new(0.0, -0.3, -0.6),

            collect_radius: 0.5,
            cleaning_radius: 15.0,
            cleaning_power: 0.5,
            collectible_target: crate::consts::COLLECTIBLE_COUNT as u32,

            warning_duration: 3.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("climb_speed", self.climb_speed),
            ("rotation_speed", self.rotation_speed),
            ("drone_radius", self.drone_radius),
            ("spray_step", self.spray_step),
            ("spray_max_distance", self.spray_max_distance),
            ("collect_radius", self.collect_radius),
            ("cleaning_radius", self.cleaning_radius),
            ("cleaning_power", self.cleaning_power),
            ("warning_duration", self.warning_duration),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.spray_damping > 0.0 && self.spray_damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "spray_damping must be in (0, 1], got {}",
                self.spray_damping
            )));
        }
        if self.min_altitude < 0.0 {
            return Err(ConfigError::Invalid("min_altitude must not be negative".into()));
        }
        if self.collectible_target == 0 {
            return Err(ConfigError::Invalid("collectible_target must be at least 1".into()));
        }
        Ok(())
    }
}

//! Notifications from the simulation to the presentation layer
//!
//! Events flow one way: the HUD and scene react to them but never feed
//! anything back into the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera viewpoint, cycled by the player (not used by the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    Chase,
    FirstPerson,
    TopDown,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::TopDown,
            CameraMode::TopDown => CameraMode::Chase,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Chase => "chase",
            CameraMode::FirstPerson => "first_person",
            CameraMode::TopDown => "top_down",
        }
    }
}

/// Something the presentation layer should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Drone bumped into a building
    WarningRaised { building_id: u32 },
    /// Collision warning timed out
    WarningCleared,
    ScoreChanged { score: u32 },
    /// Logo picked up (show its info popup at `position`)
    Collected { id: u32, position: Vec3, info: String },
    /// All logos collected
    Won { score: u32, elapsed: f32 },
    BuildingCleaned { id: u32 },
    AllBuildingsClean,
    SprayToggled { on: bool },
    CameraChanged { mode: CameraMode },
}

/// Receiver for simulation events (HUD, popups, sound)
pub trait PresentationSink {
    fn present(&mut self, event: &GameEvent);
}

impl PresentationSink for Vec<GameEvent> {
    fn present(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_cycle() {
        let mut mode = CameraMode::default();
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, CameraMode::Chase);
        assert_eq!(CameraMode::Chase.next().as_str(), "first_person");
    }

    #[test]
    fn test_events_serialize_tagged() {
        let json = serde_json::to_string(&GameEvent::ScoreChanged { score: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"score_changed","score":3}"#);
    }
}

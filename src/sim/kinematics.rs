//! Drone flight controls
//!
//! Turns the held inputs of a frame into a candidate pose. No physics: speed
//! is constant while a key is held and zero otherwise.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{normalize_angle, rotate_planar, yaw_rotation};

/// Drone position and heading
///
/// +Y is up, yaw 0 faces -Z, positive yaw turns left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DronePose {
    pub position: Vec3,
    pub yaw: f32,
}

impl DronePose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        yaw_rotation(self.yaw)
    }

    /// Unit vector the drone's nose points at
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

/// Logical input actions, independent of keyboard or touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Ascend,
    Descend,
    YawLeft,
    YawRight,
    ToggleSpray,
    CleanTrigger,
    ToggleCamera,
}

/// Input commands for a single frame
///
/// Movement actions are held states. The two toggles are one-shot presses
/// that the frame loop clears after each consumed tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// Spray on/off (pressed this frame)
    pub toggle_spray: bool,
    /// Held while the player wants cleaning even without moving
    pub clean_trigger: bool,
    /// Cycle camera view (pressed this frame)
    pub toggle_camera: bool,
}

impl InputState {
    /// Update the flag for one action
    pub fn set(&mut self, action: InputAction, pressed: bool) {
        let flag = match action {
            InputAction::Forward => &mut self.forward,
            InputAction::Back => &mut self.back,
            InputAction::StrafeLeft => &mut self.strafe_left,
            InputAction::StrafeRight => &mut self.strafe_right,
            InputAction::Ascend => &mut self.ascend,
            InputAction::Descend => &mut self.descend,
            InputAction::YawLeft => &mut self.yaw_left,
            InputAction::YawRight => &mut self.yaw_right,
            InputAction::ToggleSpray => &mut self.toggle_spray,
            InputAction::CleanTrigger => &mut self.clean_trigger,
            InputAction::ToggleCamera => &mut self.toggle_camera,
        };
        *flag = pressed;
    }

    /// Clear one-shot presses after a tick consumed them
    pub fn clear_one_shots(&mut self) {
        self.toggle_spray = false;
        self.toggle_camera = false;
    }

    /// Planar movement axes in the drone frame: x = right, y = back
    fn planar_axes(&self) -> Vec2 {
        Vec2::new(
            axis(self.strafe_right, self.strafe_left),
            axis(self.back, self.forward),
        )
    }
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

/// Propose the next pose from held inputs
///
/// Pure: the committed pose only changes once collision checks accept it.
pub fn propose_pose(pose: &DronePose, input: &InputState, tuning: &Tuning, dt: f32) -> DronePose {
    let yaw = normalize_angle(
        pose.yaw + axis(input.yaw_left, input.yaw_right) * tuning.rotation_speed * dt,
    );

    // Normalized so diagonals are no faster than a single axis
    let planar = input.planar_axes().normalize_or_zero() * tuning.move_speed * dt;
    let planar = rotate_planar(planar, yaw);

    let climb = axis(input.ascend, input.descend) * tuning.climb_speed * dt;
    let y = (pose.position.y + climb).max(tuning.min_altitude);

    DronePose {
        position: Vec3::new(pose.position.x + planar.x, y, pose.position.z + planar.y),
        yaw,
    }
}

//! Keyboard and touch input mapping

use std::collections::HashSet;

use crate::sim::{InputAction, InputState};

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<InputAction> {
    let action = match code {
        "KeyW" | "ArrowUp" => InputAction::Forward,
        "KeyS" | "ArrowDown" => InputAction::Back,
        "KeyA" => InputAction::StrafeLeft,
        "KeyD" => InputAction::StrafeRight,
        "KeyR" | "PageUp" => InputAction::Ascend,
        "KeyF" | "PageDown" => InputAction::Descend,
        "KeyQ" | "ArrowLeft" => InputAction::YawLeft,
        "KeyE" | "ArrowRight" => InputAction::YawRight,
        "Space" => InputAction::ToggleSpray,
        "KeyC" => InputAction::CleanTrigger,
        "KeyV" => InputAction::ToggleCamera,
        _ => return None,
    };
    Some(action)
}

/// Map an on-screen control's `data-action` name to an action
pub fn action_for_control(name: &str) -> Option<InputAction> {
    let action = match name {
        "forward" => InputAction::Forward,
        "back" => InputAction::Back,
        "left" => InputAction::StrafeLeft,
        "right" => InputAction::StrafeRight,
        "up" => InputAction::Ascend,
        "down" => InputAction::Descend,
        "turn-left" => InputAction::YawLeft,
        "turn-right" => InputAction::YawRight,
        "spray" => InputAction::ToggleSpray,
        "clean" => InputAction::CleanTrigger,
        "camera" => InputAction::ToggleCamera,
        _ => return None,
    };
    Some(action)
}

fn is_toggle(action: InputAction) -> bool {
    matches!(action, InputAction::ToggleSpray | InputAction::ToggleCamera)
}

/// Accumulates press/release events between simulation ticks
///
/// Held actions follow the latest event. Toggles latch on the initial
/// press (key repeat is ignored) and stay set until a tick consumes them.
#[derive(Debug, Default)]
pub struct InputTracker {
    down: HashSet<InputAction>,
    state: InputState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: InputAction) {
        let fresh = self.down.insert(action);
        if is_toggle(action) {
            if fresh {
                self.state.set(action, true);
            }
        } else {
            self.state.set(action, true);
        }
    }

    pub fn release(&mut self, action: InputAction) {
        self.down.remove(&action);
        if !is_toggle(action) {
            self.state.set(action, false);
        }
    }

    /// Drop every held action (window lost focus)
    pub fn release_all(&mut self) {
        self.down.clear();
        self.state = InputState::default();
    }

    /// Input for the next tick; latched toggles are handed out once
    pub fn take_frame(&mut self) -> InputState {
        let frame = self.state.clone();
        self.state.clear_one_shots();
        frame
    }
}

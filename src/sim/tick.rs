//! Per-frame simulation step
//!
//! Order within a tick: timers, toggles, flight proposal, collision check,
//! cleaning, spray advance, logo collection.

use super::cleaning::clean_nearby;
use super::collection::collect_hits;
use super::collision::{MoveOutcome, resolve_move};
use super::events::GameEvent;
use super::kinematics::{InputState, propose_pose};
use super::state::{Drone, GameState};

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) {
    state.frame += 1;
    if !state.has_won {
        state.elapsed += dt;
    }

    if state.warning.update(dt) {
        state.emit(GameEvent::WarningCleared);
    }

    for logo in &mut state.collectibles {
        logo.animate(dt);
    }

    if input.toggle_camera {
        state.camera = state.camera.next();
        log::info!("Camera: {}", state.camera.as_str());
        state.emit(GameEvent::CameraChanged { mode: state.camera });
    }

    // Drone model not ready yet: nothing else to simulate
    let Some(mut drone) = state.drone.take() else {
        return;
    };

    if input.toggle_spray {
        toggle_spray(state, &mut drone);
    }

    let committed = fly(state, &mut drone, input, dt);

    if drone.is_spraying() && (committed || input.clean_trigger) {
        clean(state, &drone);
    }

    if let Some(spray) = drone.spray.as_mut() {
        spray.advance();
    }

    if drone.is_spraying() && !state.has_won {
        collect(state, &drone);
    }

    state.drone = Some(drone);
}

fn toggle_spray(state: &mut GameState, drone: &mut Drone) {
    let seed = state.next_spray_seed();
    let on = drone.toggle_spray(state.tuning.spray_capacity, seed, &state.tuning);
    log::info!("Spray {}", if on { "on" } else { "off" });
    state.emit(GameEvent::SprayToggled { on });
}

/// Propose and validate this frame's move; returns true if it was committed
fn fly(state: &mut GameState, drone: &mut Drone, input: &InputState, dt: f32) -> bool {
    let candidate = propose_pose(&drone.pose, input, &state.tuning, dt);
    match resolve_move(candidate, &state.world, state.tuning.drone_radius) {
        MoveOutcome::Committed(pose) => {
            drone.pose = pose;
            true
        }
        MoveOutcome::Blocked { building_id } => {
            log::debug!(
                "Move to {:?} blocked by building {}",
                candidate.position,
                building_id
            );
            if state.warning.signal() {
                state.emit(GameEvent::WarningRaised { building_id });
            }
            false
        }
    }
}

fn clean(state: &mut GameState, drone: &Drone) {
    let finished = clean_nearby(&mut state.world, drone.pose.position, &state.tuning);
    if finished.is_empty() {
        return;
    }
    for id in finished {
        log::info!("Building {} is spotless", id);
        state.emit(GameEvent::BuildingCleaned { id });
    }
    if state.world.all_clean() {
        log::info!("Every building in town is clean");
        state.emit(GameEvent::AllBuildingsClean);
    }
}

fn collect(state: &mut GameState, drone: &Drone) {
    if state.collectibles.is_empty() {
        return;
    }
    let particles = drone.spray_world_positions();
    let hits = collect_hits(
        &mut state.collectibles,
        &particles,
        state.tuning.collect_radius,
    );

    for logo in hits {
        state.score += 1;
        log::info!(
            "Collected logo {} ({}/{})",
            logo.id,
            state.score,
            state.win_target()
        );
        state.emit(GameEvent::Collected {
            id: logo.id,
            position: logo.position,
            info: logo.info,
        });
        state.emit(GameEvent::ScoreChanged { score: state.score });

        if !state.has_won && state.score >= state.win_target() {
            state.has_won = true;
            log::info!("All logos collected in {:.1}s", state.elapsed);
            state.emit(GameEvent::Won {
                score: state.score,
                elapsed: state.elapsed,
            });
        }
    }
}

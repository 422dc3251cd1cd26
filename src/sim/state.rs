//! Session state
//!
//! One explicit struct owns everything a session mutates: drone, town,
//! logos, score and pending presentation events.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collection::Collectible;
use super::events::{CameraMode, GameEvent, PresentationSink};
use super::kinematics::DronePose;
use super::spray::SprayEmitter;
use super::warning::WarningNotifier;
use super::world::{WorldModel, default_collectibles, town_layout};
use crate::tuning::{ConfigError, Tuning};

/// Where the drone starts: hovering over the head of the main street
pub const DRONE_START: Vec3 = Vec3::new(0.0, 3.0, 5.0);

/// The player's drone
#[derive(Debug, Clone)]
pub struct Drone {
    pub pose: DronePose,
    /// Active spray, if any
    pub spray: Option<SprayEmitter>,
}

impl Drone {
    pub fn new(pose: DronePose) -> Self {
        Self { pose, spray: None }
    }

    #[inline]
    pub fn is_spraying(&self) -> bool {
        self.spray.is_some()
    }

    /// Switch the spray on (fresh cone) or off (buffer dropped)
    ///
    /// Returns the new spray state.
    pub fn toggle_spray(&mut self, capacity: usize, seed: u64, tuning: &Tuning) -> bool {
        if self.spray.take().is_none() {
            self.spray = Some(SprayEmitter::activate(capacity, seed, tuning));
        }
        self.spray.is_some()
    }

    /// World-space particle positions (empty when not spraying)
    pub fn spray_world_positions(&self) -> Vec<Vec3> {
        match &self.spray {
            Some(spray) => spray.world_positions(&self.pose).collect(),
            None => Vec::new(),
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// `None` until the drone model is ready
    pub drone: Option<Drone>,
    pub world: WorldModel,
    /// Logos still floating in the town
    pub collectibles: Vec<Collectible>,
    /// Logos placed at session start
    pub collectible_total: u32,
    pub score: u32,
    pub has_won: bool,
    /// Passed through to the presentation layer
    pub camera: CameraMode,
    pub warning: WarningNotifier,
    /// Session time in seconds (stops when the game is won)
    pub elapsed: f32,
    /// Simulation tick counter
    pub frame: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Default town, default logos, drone at the start position
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        let mut state = Self::with_world(seed, tuning, town_layout(), default_collectibles())?;
        state.attach_drone(DronePose::new(DRONE_START, 0.0))?;
        Ok(state)
    }

    /// Custom world; no drone until [`GameState::attach_drone`]
    pub fn with_world(
        seed: u64,
        tuning: Tuning,
        world: WorldModel,
        collectibles: Vec<Collectible>,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = tuning.validate() {
            log::warn!("Rejected tuning: {}", e);
            return Err(e);
        }
        let warning = WarningNotifier::new(tuning.warning_duration);
        let collectible_total = collectibles.len() as u32;
        if collectible_total < tuning.collectible_target {
            log::warn!(
                "Only {} logos placed, winning takes all of them instead of {}",
                collectible_total,
                tuning.collectible_target
            );
        }
        Ok(Self {
            seed,
            tuning,
            drone: None,
            world,
            collectibles,
            collectible_total,
            score: 0,
            has_won: false,
            camera: CameraMode::default(),
            warning,
            elapsed: 0.0,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    /// Hand over a ready drone at `pose`
    ///
    /// A pose touching a building is refused and the session stays without
    /// a drone.
    pub fn attach_drone(&mut self, pose: DronePose) -> Result<(), ConfigError> {
        let mut pose = pose;
        pose.position.y = pose.position.y.max(self.tuning.min_altitude);
        if let Some(building) = self
            .world
            .first_intersecting(pose.position, self.tuning.drone_radius)
        {
            log::warn!(
                "Drone start {:?} overlaps building {}",
                pose.position,
                building.id
            );
            return Err(ConfigError::Invalid(format!(
                "drone start overlaps building {}",
                building.id
            )));
        }
        self.drone = Some(Drone::new(pose));
        Ok(())
    }

    pub fn is_spraying(&self) -> bool {
        self.drone.as_ref().is_some_and(Drone::is_spraying)
    }

    /// Logos needed to win this session
    ///
    /// Never more than the logos actually placed, so every session stays
    /// winnable.
    pub fn win_target(&self) -> u32 {
        self.tuning
            .collectible_target
            .min(self.collectible_total)
            .max(1)
    }

    /// Seed for a new spray buffer, drawn from the session RNG
    pub(crate) fn next_spray_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver pending events to a presentation sink
    pub fn drain_events_into(&mut self, sink: &mut impl PresentationSink) {
        for event in self.events.drain(..) {
            sink.present(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::{Building, BuildingKind};

    #[test]
    fn test_new_session() {
        let state = GameState::new(7, Tuning::default()).unwrap();
        assert_eq!(state.score, 0);
        assert!(!state.has_won);
        assert_eq!(state.collectible_total, 5);
        assert_eq!(state.win_target(), 5);
        assert!(state.drone.is_some());
        assert!(!state.is_spraying());
        assert!(state.world.first_intersecting(DRONE_START, 1.0).is_none());
    }

    #[test]
    fn test_toggle_spray_allocates_and_releases() {
        let tuning = Tuning::default();
        let mut drone = Drone::new(DronePose::new(DRONE_START, 0.0));
        assert!(drone.toggle_spray(100, 1, &tuning));
        assert_eq!(drone.spray.as_ref().map(SprayEmitter::len), Some(100));
        assert_eq!(drone.spray_world_positions().len(), 100);
        assert!(!drone.toggle_spray(100, 1, &tuning));
        assert!(drone.spray.is_none());
        assert!(drone.spray_world_positions().is_empty());
    }

    #[test]
    fn test_attach_drone_respects_floor() {
        let mut state =
            GameState::with_world(1, Tuning::default(), WorldModel::default(), Vec::new())
                .unwrap();
        assert!(state.drone.is_none());
        state.attach_drone(DronePose::new(Vec3::ZERO, 0.0)).unwrap();
        assert_eq!(state.drone.as_ref().unwrap().pose.position.y, 2.0);
    }

    #[test]
    fn test_attach_drone_inside_building_is_refused() {
        let world = WorldModel::new(vec![Building::new(4, BuildingKind::House, Vec3::ZERO)]);
        let mut state = GameState::with_world(1, Tuning::default(), world, Vec::new()).unwrap();
        let inside = DronePose::new(Vec3::new(0.0, 2.5, 0.0), 0.0);
        assert!(matches!(
            state.attach_drone(inside),
            Err(ConfigError::Invalid(_))
        ));
        assert!(state.drone.is_none());

        // Clear of the walls is fine
        let outside = DronePose::new(Vec3::new(0.0, 2.5, 5.0), 0.0);
        assert!(state.attach_drone(outside).is_ok());
        assert!(state.drone.is_some());
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let tuning = Tuning {
            warning_duration: 0.0,
            ..Default::default()
        };
        let result = GameState::with_world(1, tuning.clone(), WorldModel::default(), Vec::new());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(GameState::new(1, tuning).is_err());
    }

    #[test]
    fn test_win_target_capped_by_placed_logos() {
        let logos = vec![
            Collectible::new(1, Vec3::new(0.0, 4.0, -3.0), "a"),
            Collectible::new(2, Vec3::new(0.0, 4.0, -3.0), "b"),
        ];
        let state =
            GameState::with_world(1, Tuning::default(), WorldModel::default(), logos).unwrap();
        assert_eq!(state.collectible_total, 2);
        assert_eq!(state.win_target(), 2);

        let empty =
            GameState::with_world(1, Tuning::default(), WorldModel::default(), Vec::new())
                .unwrap();
        assert_eq!(empty.win_target(), 1);
    }

    #[test]
    fn test_drain_events_into_sink() {
        let mut state = GameState::new(1, Tuning::default()).unwrap();
        state.emit(GameEvent::WarningCleared);
        let mut sink: Vec<GameEvent> = Vec::new();
        state.drain_events_into(&mut sink);
        assert_eq!(sink, vec![GameEvent::WarningCleared]);
        assert!(state.pending_events().is_empty());
    }
}

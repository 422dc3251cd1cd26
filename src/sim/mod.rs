//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Caller-supplied time deltas only
//! - Seeded RNG only
//! - Stable iteration order (buildings and logos keep their setup order)
//! - No rendering or platform dependencies

pub mod cleaning;
pub mod collection;
pub mod collision;
pub mod events;
pub mod kinematics;
pub mod spray;
pub mod state;
pub mod tick;
pub mod warning;
pub mod world;

pub use cleaning::clean_nearby;
pub use collection::{Collectible, collect_hits};
pub use collision::{MoveOutcome, resolve_move, sphere_intersects_aabb};
pub use events::{CameraMode, GameEvent, PresentationSink};
pub use kinematics::{DronePose, InputAction, InputState, propose_pose};
pub use spray::SprayEmitter;
pub use state::{DRONE_START, Drone, GameState};
pub use tick::tick;
pub use warning::WarningNotifier;
pub use world::{Aabb, Building, BuildingKind, WorldModel, default_collectibles, town_layout};

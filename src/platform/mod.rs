//! Platform abstraction layer
//!
//! Maps browser input (keyboard codes, on-screen touch buttons) onto the
//! logical actions the simulation understands.

pub mod input;

pub use input::{InputTracker, action_for_control, action_for_key};

//! Input handling for Hyperdrive
//!
//! This crate turns host input events (or a script) into the per-tick
//! control bundle the engine consumes.

mod controller;
mod controls;
mod script;

pub use controller::DriveController;
pub use controls::{ControlInputs, Controls};
pub use script::{InputScript, ScriptStep};

//! Core types for the Hyperdrive engine
//!
//! This crate ties the physics together into a runnable simulation:
//!
//! - [`Scene`] - Loadable/saveable world descriptor
//! - [`SceneValidator`] - Static checks run before a scene is simulated
//! - [`SimulationState`] - Player, camera and world, advanced by [`tick`]
//! - [`Frame`] - Projected poses handed to a renderer

mod frame;
mod scene;
mod scene_validator;
mod simulation;

pub use frame::{EntityPose, Frame};
pub use scene::{EntityTemplate, Scene, SceneLoadError, SceneSaveError, ShapeTemplate, DEFAULT_SPAWN};
pub use scene_validator::{SceneError, SceneValidator, ValidationError};
pub use simulation::{tick, SimulationError, SimulationState, TickEvents};

// Re-export commonly used types for convenience
pub use hyperdrive_input::{ControlInputs, Controls, DriveController, InputScript, ScriptStep};
pub use hyperdrive_math::{CameraOrientation, Point3D, Point4D, Pose3D};
pub use hyperdrive_physics::{
    BoundsLimits, CrossSectionProfile, EntityKey, PhysicsConfig, PhysicsError, PlayerState,
    RampDirection, WorldBoundsPolicy, WorldModel,
};

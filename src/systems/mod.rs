//! Application systems

mod simulation;

pub use simulation::{RunSummary, SimulationSystem};

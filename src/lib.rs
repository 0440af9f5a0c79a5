//! Hyperdrive - headless 4D driving engine
//!
//! The binary loads configuration and a scene, then runs the engine from
//! an input script. The library half exposes the pieces it is built from.

pub mod config;
pub mod systems;

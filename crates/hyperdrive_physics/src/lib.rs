//! 4D vehicle physics for Hyperdrive
//!
//! This crate provides the per-tick engine:
//! - W-slicing of 4D solids into cross-section scales
//! - The static world model of platforms, ramps, buildings and hyper-solids
//! - Vehicle integration with W steering
//! - Slice-aware collision, boost pads and ring pickups
//! - World boundary policies

pub mod boost;
pub mod bounds;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod pickup;
pub mod player;
pub mod slice;
pub mod world;

// Re-export commonly used types
pub use boost::apply_boosts;
pub use bounds::{BoundsHit, BoundsLimits, WorldBoundsPolicy};
pub use collision::{resolve, Footprint, GroundReport};
pub use config::{PhysicsConfig, SolidityThresholds, BOOST_W_SCALE, BOOST_XZ_SPEED_FACTOR};
pub use entity::{Box3, Entity, EntityKind, HyperCone, RampDirection};
pub use error::PhysicsError;
pub use pickup::collect_rings;
pub use player::{decompose_motion, DriveInput, Motion, PlayerState};
pub use slice::{slice, slice_with_profile, CrossSectionProfile, SliceResult};
pub use world::{EntityKey, WorldModel};

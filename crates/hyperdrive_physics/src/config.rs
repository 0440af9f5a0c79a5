//! Tuning constants for the engine
//!
//! All rates are per tick. There is no fixed timestep: one tick runs per
//! render callback, so the defaults assume roughly 60 ticks per second and
//! the simulation runs faster or slower with the frame rate.

use std::f64::consts::FRAC_PI_3;

use serde::{Deserialize, Serialize};

use crate::bounds::WorldBoundsPolicy;
use crate::entity::EntityKind;
use crate::slice::CrossSectionProfile;

/// Multiplier on the W impulse of a hypercone boost
///
/// The X/Y/Z components of a boost are applied as-is; W is tripled so that
/// hopping across slices feels as punchy as a jump.
pub const BOOST_W_SCALE: f64 = 3.0;

/// Fraction of a boost's horizontal magnitude converted into forward speed
pub const BOOST_XZ_SPEED_FACTOR: f64 = 0.5;

/// Minimum cross-section scale at which each kind of entity is solid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidityThresholds {
    pub platform: f64,
    pub ramp: f64,
    pub building: f64,
    pub hypercube: f64,
}

impl Default for SolidityThresholds {
    fn default() -> Self {
        Self {
            platform: 0.2,
            ramp: 0.2,
            building: 0.3,
            hypercube: 0.3,
        }
    }
}

impl SolidityThresholds {
    /// Threshold for an entity kind; `None` for kinds that are never solid
    pub fn for_kind(&self, kind: &EntityKind) -> Option<f64> {
        match kind {
            EntityKind::Platform => Some(self.platform),
            EntityKind::Ramp { .. } => Some(self.ramp),
            EntityKind::Building => Some(self.building),
            EntityKind::Hypercube => Some(self.hypercube),
            EntityKind::Hypersphere { .. } | EntityKind::HyperCone(_) | EntityKind::Ring { .. } => {
                None
            }
        }
    }
}

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Longitudinal
    /// Speed gained per tick of throttle
    pub acceleration: f64,
    /// Speed lost per tick of brake
    pub braking: f64,
    /// Forward speed cap
    pub max_speed: f64,
    /// Reverse speed cap as a fraction of `max_speed`
    pub reverse_factor: f64,
    /// Per-tick speed multiplier when coasting
    pub friction: f64,
    /// Coasting speed below which the car stops dead
    pub stop_epsilon: f64,

    // Steering
    /// XZ turn rate (radians per tick)
    pub turn_speed: f64,
    /// Minimum |speed| for XZ steering to take effect
    pub steer_deadzone: f64,
    /// Fraction of the remaining W angle covered per tick while steering into W
    pub turn_speed_w: f64,
    /// W heading limit (radians)
    pub max_w_angle: f64,
    /// Self-centering rate as a fraction of `turn_speed_w`
    pub w_recenter_factor: f64,

    // Vertical
    /// Downward acceleration per tick
    pub gravity: f64,
    /// Vertical velocity set by a jump
    pub jump_force: f64,
    /// Y below which the player is returned to spawn
    pub fall_reset_y: f64,

    // Ramps
    /// Minimum speed for leaving a ramp lip to launch the car
    pub ramp_launch_min_speed: f64,
    /// Launch impulse per unit of speed
    pub ramp_launch_factor: f64,
    /// Ramp progress from which a contact counts as leaving the lip
    pub ramp_exit_progress: f64,

    // Collision
    /// Distance from the player's centre to its wheels
    pub player_half_height: f64,
    /// Horizontal margin added to every footprint
    pub player_margin: f64,
    /// How far below a surface the wheels may be and still snap up onto it
    pub ground_band_below: f64,
    /// How far above a surface the wheels may be and still count as touching it
    pub ground_band_above: f64,
    /// Broad-phase radius for collision queries
    pub nearby_radius: f64,
    /// Speed multiplier after hitting a building side
    pub building_damping: f64,
    /// Speed multiplier after hitting a hypercube side
    pub hypercube_damping: f64,
    pub solidity: SolidityThresholds,

    // Boosts
    /// Ticks a hypercone stays inactive after firing
    pub boost_cooldown_ticks: u32,

    // World
    pub bounds: WorldBoundsPolicy,
    pub cross_section: CrossSectionProfile,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.02,
            braking: 0.04,
            max_speed: 1.5,
            reverse_factor: 0.4,
            friction: 0.98,
            stop_epsilon: 0.001,

            turn_speed: 0.035,
            steer_deadzone: 0.05,
            turn_speed_w: 0.05,
            max_w_angle: FRAC_PI_3,
            w_recenter_factor: 0.3,

            gravity: 0.015,
            jump_force: 0.35,
            fall_reset_y: -50.0,

            ramp_launch_min_speed: 0.3,
            ramp_launch_factor: 0.3,
            ramp_exit_progress: 0.95,

            player_half_height: 0.5,
            player_margin: 1.0,
            ground_band_below: 1.0,
            ground_band_above: 0.1,
            nearby_radius: 4.0,
            building_damping: 0.3,
            hypercube_damping: 0.5,
            solidity: SolidityThresholds::default(),

            boost_cooldown_ticks: 60,

            bounds: WorldBoundsPolicy::Unbounded,
            cross_section: CrossSectionProfile::Spherical,
        }
    }
}

impl PhysicsConfig {
    /// Default tuning inside a fenced world (the driving variant)
    pub fn bounded(limit_x: f64, limit_z: f64, limit_w: f64) -> Self {
        Self {
            bounds: WorldBoundsPolicy::bounded(limit_x, limit_z, limit_w),
            ..Self::default()
        }
    }

    /// Set the world bounds policy
    pub fn with_bounds(mut self, bounds: WorldBoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the cross-section profile
    pub fn with_cross_section(mut self, profile: CrossSectionProfile) -> Self {
        self.cross_section = profile;
        self
    }

    /// Speed multiplier for a side hit against `kind`, if it is volumetric
    pub fn side_damping(&self, kind: &EntityKind) -> Option<f64> {
        match kind {
            EntityKind::Building => Some(self.building_damping),
            EntityKind::Hypercube => Some(self.hypercube_damping),
            _ => None,
        }
    }
}

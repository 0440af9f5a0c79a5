//! World boundary policies
//!
//! The driving variant of the game fences the player into a fixed box in
//! X, Z and W; the platforming variant lets the player roam freely. Both are
//! expressed here as one tagged policy instead of two forked engines.

use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Multiplier applied to speed when the car hits an XZ wall (bounces back)
pub const XZ_WALL_SPEED_FACTOR: f64 = -0.5;

/// Multiplier applied to the car's W heading when it hits a W wall
pub const W_WALL_ANGLE_FACTOR: f64 = 0.5;

/// Symmetric half-extents of the playable box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundsLimits {
    /// |x| limit
    pub x: f64,
    /// |z| limit
    pub z: f64,
    /// |w| limit
    pub w: f64,
}

impl Default for BoundsLimits {
    fn default() -> Self {
        Self {
            x: 200.0,
            z: 200.0,
            w: 40.0,
        }
    }
}

impl BoundsLimits {
    /// Every limit is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.x, self.z, self.w]
            .iter()
            .all(|limit| limit.is_finite() && *limit > 0.0)
    }
}

/// How the world edge treats the player
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldBoundsPolicy {
    /// Clamp to `limits` and damp the motion that crossed the edge
    Bounded { limits: BoundsLimits },
    /// No boundary at all
    #[default]
    Unbounded,
}

/// Which edges were hit during [`WorldBoundsPolicy::apply`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsHit {
    pub xz: bool,
    pub w: bool,
}

impl WorldBoundsPolicy {
    /// Convenience constructor for a bounded world
    pub fn bounded(x: f64, z: f64, w: f64) -> Self {
        WorldBoundsPolicy::Bounded {
            limits: BoundsLimits { x, z, w },
        }
    }

    /// The fence's limits, if it has any
    pub fn limits(&self) -> Option<BoundsLimits> {
        match self {
            WorldBoundsPolicy::Bounded { limits } => Some(*limits),
            WorldBoundsPolicy::Unbounded => None,
        }
    }

    /// Unbounded, or bounded with valid limits
    pub fn is_valid(&self) -> bool {
        self.limits().map_or(true, |limits| limits.is_valid())
    }

    /// Clamp the player into the world and damp the offending motion
    ///
    /// An XZ clamp reverses and halves speed; a W clamp halves the car's W
    /// heading so it eases off the wall instead of grinding into it.
    /// A fence with a non-positive or non-finite limit is ignored.
    pub fn apply(&self, player: &mut PlayerState) -> BoundsHit {
        let limits = match self {
            WorldBoundsPolicy::Unbounded => return BoundsHit::default(),
            WorldBoundsPolicy::Bounded { limits } if !limits.is_valid() => {
                log::debug!("Ignoring invalid world bounds {:?}", limits);
                return BoundsHit::default();
            }
            WorldBoundsPolicy::Bounded { limits } => limits,
        };

        let mut hit = BoundsHit::default();
        let pos = &mut player.position;

        let x = pos.x.clamp(-limits.x, limits.x);
        let z = pos.z.clamp(-limits.z, limits.z);
        if x != pos.x || z != pos.z {
            pos.x = x;
            pos.z = z;
            hit.xz = true;
        }

        let w = pos.w.clamp(-limits.w, limits.w);
        if w != pos.w {
            pos.w = w;
            hit.w = true;
        }

        if hit.xz {
            player.speed *= XZ_WALL_SPEED_FACTOR;
        }
        if hit.w {
            player.car_angle_w *= W_WALL_ANGLE_FACTOR;
        }
        hit
    }
}

//! Vehicle integration in 4D
//!
//! The car drives like a car in XZ and can additionally pitch its heading
//! into W. Steering into W trades XZ motion for W motion continuously:
//! at a W heading of 60° half the speed goes forward and the rest carries
//! the car across slices.

use hyperdrive_math::Point4D;

use crate::collision::GroundReport;
use crate::config::PhysicsConfig;
use crate::error::PhysicsError;

/// One tick's worth of driving controls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub throttle: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    /// Steer the car's heading toward +W
    pub w_steer_in: bool,
    /// Steer the car's heading toward -W
    pub w_steer_out: bool,
    pub jump: bool,
}

/// Displacement produced by one tick of driving
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub move_x: f64,
    pub move_z: f64,
    pub move_w: f64,
}

/// Split speed into X, Z and W displacement
///
/// `cos(angle_w)` of the speed stays in the XZ plane along the car's XZ
/// heading; `sin(angle_w)` of it goes into W.
#[inline]
pub fn decompose_motion(speed: f64, angle_xz: f64, angle_w: f64) -> Motion {
    let (w_comp, xz_comp) = angle_w.sin_cos();
    let (sin_xz, cos_xz) = angle_xz.sin_cos();
    Motion {
        move_x: sin_xz * speed * xz_comp,
        move_z: cos_xz * speed * xz_comp,
        move_w: speed * w_comp,
    }
}

/// Kinematic state of the player's car
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Centre of the car in 4-space
    pub position: Point4D,
    /// Vertical velocity (units per tick, positive is up)
    pub vertical_velocity: f64,
    /// Signed speed along the heading (negative is reverse)
    pub speed: f64,
    /// Heading in the XZ plane (radians, unbounded)
    pub car_angle_xz: f64,
    /// Heading into W (radians, within ±max_w_angle)
    pub car_angle_w: f64,
    /// Whether the car is resting on a surface
    pub grounded: bool,
}

impl PlayerState {
    /// A car at rest at the given position
    pub fn new(position: Point4D) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            speed: 0.0,
            car_angle_xz: 0.0,
            car_angle_w: 0.0,
            grounded: false,
        }
    }

    /// Reject NaN or infinite state before it enters a tick
    pub fn validate(&self) -> Result<(), PhysicsError> {
        PhysicsError::check_finite("position.x", self.position.x)?;
        PhysicsError::check_finite("position.y", self.position.y)?;
        PhysicsError::check_finite("position.z", self.position.z)?;
        PhysicsError::check_finite("position.w", self.position.w)?;
        PhysicsError::check_finite("vertical_velocity", self.vertical_velocity)?;
        PhysicsError::check_finite("speed", self.speed)?;
        PhysicsError::check_finite("car_angle_xz", self.car_angle_xz)?;
        PhysicsError::check_finite("car_angle_w", self.car_angle_w)?;
        Ok(())
    }

    /// Throttle, brake, or coast
    ///
    /// Throttle wins when both pedals are held. Coasting decays speed
    /// geometrically and stops dead below `stop_epsilon`, so it never
    /// crosses zero.
    pub fn update_speed(&mut self, input: &DriveInput, config: &PhysicsConfig) {
        if input.throttle {
            self.speed = (self.speed + config.acceleration).min(config.max_speed);
        } else if input.brake {
            let reverse_cap = -config.max_speed * config.reverse_factor;
            self.speed = (self.speed - config.braking).max(reverse_cap);
        } else {
            self.speed *= config.friction;
            if self.speed.abs() < config.stop_epsilon {
                self.speed = 0.0;
            }
        }
    }

    /// Turn in the XZ plane
    ///
    /// Ignored below the steering deadzone. Direction follows the sign of
    /// speed so steering inverts in reverse.
    pub fn steer_xz(&mut self, input: &DriveInput, config: &PhysicsConfig) {
        if self.speed.abs() <= config.steer_deadzone {
            return;
        }
        let dir = (input.steer_left as i32 - input.steer_right as i32) as f64;
        self.car_angle_xz += config.turn_speed * dir * self.speed.signum();
    }

    /// Pitch the heading into W, or let it self-center
    ///
    /// Held: closes `turn_speed_w` of the remaining gap to ±max each tick,
    /// so the angle rises strictly and never passes the limit. Released:
    /// decays toward zero at 30% of that rate without snapping.
    pub fn steer_w(&mut self, input: &DriveInput, config: &PhysicsConfig) {
        let limit = config.max_w_angle;
        let target = match (input.w_steer_in, input.w_steer_out) {
            (true, false) => Some(limit),
            (false, true) => Some(-limit),
            _ => None,
        };

        match target {
            Some(target) => {
                self.car_angle_w += (target - self.car_angle_w) * config.turn_speed_w;
            }
            None => {
                self.car_angle_w -= self.car_angle_w * config.turn_speed_w * config.w_recenter_factor;
            }
        }
        self.car_angle_w = self.car_angle_w.clamp(-limit, limit);
    }

    /// Advance one tick from controls, producing the proposed position
    ///
    /// Collision has not run yet: the caller resolves contacts against the
    /// world and then calls [`apply_ground`](Self::apply_ground).
    pub fn integrate(&mut self, input: &DriveInput, config: &PhysicsConfig) -> Result<Motion, PhysicsError> {
        self.validate()?;

        self.update_speed(input, config);
        self.steer_xz(input, config);
        self.steer_w(input, config);

        let motion = decompose_motion(self.speed, self.car_angle_xz, self.car_angle_w);
        self.position.x += motion.move_x;
        self.position.z += motion.move_z;
        self.position.w += motion.move_w;

        if input.jump && self.grounded {
            self.vertical_velocity = config.jump_force;
            self.grounded = false;
        }
        self.vertical_velocity -= config.gravity;
        self.position.y += self.vertical_velocity;

        Ok(motion)
    }

    /// Finalize the tick from the collision resolver's ground report
    ///
    /// Returns true when leaving a ramp lip launched the car.
    pub fn apply_ground(&mut self, report: &GroundReport, config: &PhysicsConfig) -> bool {
        if !report.on_ground {
            self.grounded = false;
            return false;
        }

        self.position.y = report.ground_y;
        self.vertical_velocity = 0.0;
        self.grounded = true;

        if report.ramp_exit && self.speed > config.ramp_launch_min_speed {
            self.vertical_velocity += self.speed * config.ramp_launch_factor;
            return true;
        }
        false
    }

    /// Return to spawn after falling out of the world
    ///
    /// Not a physical response, just a safety net for falling through gaps.
    pub fn recover(&mut self, spawn: Point4D, config: &PhysicsConfig) -> bool {
        if self.position.y >= config.fall_reset_y {
            return false;
        }
        log::warn!(
            "Player fell to y={:.1}, resetting to spawn ({:.1}, {:.1}, {:.1}, {:.1})",
            self.position.y,
            spawn.x,
            spawn.y,
            spawn.z,
            spawn.w
        );
        self.position = spawn;
        self.speed = 0.0;
        self.vertical_velocity = 0.0;
        true
    }

    /// Check if the player is currently in the air
    pub fn is_airborne(&self) -> bool {
        !self.grounded
    }
}

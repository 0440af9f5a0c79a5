//! The per-tick control bundle

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use hyperdrive_physics::DriveInput;

bitflags! {
    /// Driving buttons held during a tick
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Controls: u8 {
        const THROTTLE = 1 << 0;
        const BRAKE = 1 << 1;
        const STEER_LEFT = 1 << 2;
        const STEER_RIGHT = 1 << 3;
        /// Pitch the car's heading toward +W
        const W_STEER_IN = 1 << 4;
        /// Pitch the car's heading toward -W
        const W_STEER_OUT = 1 << 5;
        const JUMP = 1 << 6;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Controls::empty()
    }
}

/// Everything the engine consumes from the input collaborator in one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInputs {
    /// Held driving buttons
    pub controls: Controls,
    /// Camera rotation delta in the XW plane (radians)
    pub view_xw: f64,
    /// Camera rotation delta in the ZW plane (radians)
    pub view_zw: f64,
}

impl ControlInputs {
    /// Inputs with the given buttons and no view rotation
    pub fn new(controls: Controls) -> Self {
        Self {
            controls,
            view_xw: 0.0,
            view_zw: 0.0,
        }
    }

    /// Add a camera rotation delta
    pub fn with_view(mut self, view_xw: f64, view_zw: f64) -> Self {
        self.view_xw = view_xw;
        self.view_zw = view_zw;
        self
    }

    /// The driving half of the bundle, as the integrator wants it
    pub fn drive(&self) -> DriveInput {
        let c = self.controls;
        DriveInput {
            throttle: c.contains(Controls::THROTTLE),
            brake: c.contains(Controls::BRAKE),
            steer_left: c.contains(Controls::STEER_LEFT),
            steer_right: c.contains(Controls::STEER_RIGHT),
            w_steer_in: c.contains(Controls::W_STEER_IN),
            w_steer_out: c.contains(Controls::W_STEER_OUT),
            jump: c.contains(Controls::JUMP),
        }
    }
}

impl From<Controls> for ControlInputs {
    fn from(controls: Controls) -> Self {
        Self::new(controls)
    }
}

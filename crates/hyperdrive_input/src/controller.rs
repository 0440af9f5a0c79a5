//! Drive controller: turns press/release events into per-tick inputs
//!
//! Bindings (as wired by the host):
//! - W/S: throttle / brake
//! - A/D: steer left / right
//! - Q/E: steer into +W / -W
//! - Space: jump
//! - Mouse drag: rotate the 4D view (XW horizontally, ZW vertically)

use crate::controls::{ControlInputs, Controls};

/// Accumulates input events between ticks
#[derive(Clone, Debug)]
pub struct DriveController {
    held: Controls,
    jump_pending: bool,
    pending_xw: f64,
    pending_zw: f64,

    /// Radians of view rotation per unit of pointer motion
    pub view_sensitivity: f64,
}

impl Default for DriveController {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveController {
    pub fn new() -> Self {
        Self {
            held: Controls::empty(),
            jump_pending: false,
            pending_xw: 0.0,
            pending_zw: 0.0,
            view_sensitivity: 0.005,
        }
    }

    /// Builder method to set view sensitivity
    pub fn with_view_sensitivity(mut self, sensitivity: f64) -> Self {
        self.view_sensitivity = sensitivity;
        self
    }

    /// A button went down
    ///
    /// Jump is edge-triggered: pressing it queues exactly one jump for the
    /// next sample, however long it is held.
    pub fn press(&mut self, controls: Controls) {
        if controls.contains(Controls::JUMP) {
            self.jump_pending = true;
        }
        self.held.insert(controls - Controls::JUMP);
    }

    /// A button went up
    pub fn release(&mut self, controls: Controls) {
        self.held.remove(controls);
    }

    /// Pointer motion while dragging the view
    pub fn process_view_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_xw += delta_x * self.view_sensitivity;
        self.pending_zw += delta_y * self.view_sensitivity;
    }

    /// Buttons currently held (jump excluded)
    pub fn held(&self) -> Controls {
        self.held
    }

    /// Produce this tick's inputs and drain queued jump and view motion
    pub fn sample(&mut self) -> ControlInputs {
        let mut controls = self.held;
        if self.jump_pending {
            controls.insert(Controls::JUMP);
        }

        let inputs = ControlInputs {
            controls,
            view_xw: self.pending_xw,
            view_zw: self.pending_zw,
        };

        self.jump_pending = false;
        self.pending_xw = 0.0;
        self.pending_zw = 0.0;
        inputs
    }

    /// Forget everything held or queued (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.held = Controls::empty();
        self.jump_pending = false;
        self.pending_xw = 0.0;
        self.pending_zw = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_buttons_persist() {
        let mut controller = DriveController::new();
        controller.press(Controls::THROTTLE | Controls::STEER_LEFT);
        assert_eq!(controller.sample().controls, Controls::THROTTLE | Controls::STEER_LEFT);
        assert_eq!(controller.sample().controls, Controls::THROTTLE | Controls::STEER_LEFT);

        controller.release(Controls::STEER_LEFT);
        assert_eq!(controller.sample().controls, Controls::THROTTLE);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut controller = DriveController::new();
        controller.press(Controls::JUMP);
        assert!(controller.sample().controls.contains(Controls::JUMP));
        assert!(!controller.sample().controls.contains(Controls::JUMP));
        assert!(!controller.held().contains(Controls::JUMP));
    }

    #[test]
    fn test_view_motion_drained_on_sample() {
        let mut controller = DriveController::new().with_view_sensitivity(0.01);
        controller.process_view_motion(10.0, -5.0);
        controller.process_view_motion(10.0, 0.0);
        let inputs = controller.sample();
        assert!((inputs.view_xw - 0.2).abs() < 1e-12);
        assert!((inputs.view_zw + 0.05).abs() < 1e-12);

        let next = controller.sample();
        assert_eq!(next.view_xw, 0.0);
        assert_eq!(next.view_zw, 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut controller = DriveController::new();
        controller.press(Controls::BRAKE | Controls::JUMP);
        controller.process_view_motion(3.0, 3.0);
        controller.reset();
        assert_eq!(controller.sample(), ControlInputs::default());
    }
}

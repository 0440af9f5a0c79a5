//! Headless simulation system
//!
//! Drives a [`SimulationState`] through a fixed number of ticks:
//! - Script → per-tick control inputs
//! - One engine tick per step
//! - Periodic frame summaries in the log
//! - Event totals for the run

use hyperdrive_core::{tick, Frame, InputScript, PhysicsConfig, SimulationError, SimulationState, TickEvents};

/// Event totals over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: u64,
    /// Ticks that ended on a surface
    pub grounded_ticks: u64,
    /// Ramp launches
    pub launches: u32,
    /// Hypercone boosts fired
    pub boosts: u32,
    /// Rings collected
    pub rings: u32,
    /// Side push-outs
    pub side_hits: u32,
    /// Ticks that hit the world fence
    pub bounds_hits: u32,
    /// Respawns after falling out of the world
    pub recoveries: u32,
}

impl RunSummary {
    fn record(&mut self, events: &TickEvents) {
        self.ticks += 1;
        self.grounded_ticks += events.grounded as u64;
        self.launches += events.launched as u32;
        self.boosts += events.boosts;
        self.rings += events.rings;
        self.side_hits += events.side_hits;
        self.bounds_hits += (events.bounds.xz || events.bounds.w) as u32;
        self.recoveries += events.recovered as u32;
    }
}

/// Runs the engine without a window
pub struct SimulationSystem {
    physics: PhysicsConfig,
    script: InputScript,
    frame_log_interval: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(physics: PhysicsConfig, script: InputScript) -> Self {
        Self {
            physics,
            script,
            frame_log_interval: 0,
        }
    }

    /// Log a frame summary every `interval` ticks (0 disables)
    pub fn with_frame_log_interval(mut self, interval: u64) -> Self {
        self.frame_log_interval = interval;
        self
    }

    /// Run `ticks` ticks, returning the final state and the event totals
    ///
    /// Ticks are counted from the state's own tick counter, so a resumed
    /// state picks the script up where it left off.
    pub fn run(
        &self,
        mut state: SimulationState,
        ticks: u64,
    ) -> Result<(SimulationState, RunSummary), SimulationError> {
        let mut summary = RunSummary::default();

        for _ in 0..ticks {
            let inputs = self.script.inputs_at(state.tick);
            state = tick(state, &inputs, &self.physics)?;
            summary.record(&state.last_events);

            if self.frame_log_interval > 0 && state.tick % self.frame_log_interval == 0 {
                log_frame(&state, &state.frame(&self.physics));
            }
        }

        Ok((state, summary))
    }
}

fn log_frame(state: &SimulationState, frame: &Frame) {
    let p = state.player.position;
    log::info!(
        "tick {}: pos=({:.2}, {:.2}, {:.2}, {:.2}) speed={:.3} w_angle={:.3} grounded={} visible={}/{}",
        frame.tick,
        p.x,
        p.y,
        p.z,
        p.w,
        state.player.speed,
        state.player.car_angle_w,
        state.player.grounded,
        frame.visible().count(),
        frame.entities.len()
    );
}

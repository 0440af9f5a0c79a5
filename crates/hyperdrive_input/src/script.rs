//! Scripted input for headless runs
//!
//! A script is a list of steps, each holding a set of buttons (and an
//! optional per-tick view rotation) for a number of ticks. After the last
//! step the script yields empty inputs.

use serde::{Deserialize, Serialize};

use crate::controls::{ControlInputs, Controls};

/// Hold `controls` for `ticks` ticks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub ticks: u32,
    #[serde(default)]
    pub controls: Controls,
    #[serde(default)]
    pub view_xw: f64,
    #[serde(default)]
    pub view_zw: f64,
}

impl ScriptStep {
    pub fn new(ticks: u32, controls: Controls) -> Self {
        Self {
            ticks,
            controls,
            view_xw: 0.0,
            view_zw: 0.0,
        }
    }

    fn inputs(&self) -> ControlInputs {
        ControlInputs::new(self.controls).with_view(self.view_xw, self.view_zw)
    }
}

/// A sequence of [`ScriptStep`]s
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Append a step
    pub fn then(mut self, ticks: u32, controls: Controls) -> Self {
        self.steps.push(ScriptStep::new(ticks, controls));
        self
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Total ticks covered by all steps
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| s.ticks as u64).sum()
    }

    /// Inputs for a given tick (0-based)
    pub fn inputs_at(&self, tick: u64) -> ControlInputs {
        let mut start = 0u64;
        for step in &self.steps {
            let end = start + step.ticks as u64;
            if tick < end {
                return step.inputs();
            }
            start = end;
        }
        ControlInputs::default()
    }
}

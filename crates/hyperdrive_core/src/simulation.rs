//! The simulation state and its per-frame tick
//!
//! One tick runs, in order: camera rotation, kinematic integration, ground
//! and side collision, ramp launch, hypercone boosts, ring pickups, the world
//! fence, and fall recovery. Every step reads the result of the one before.

use hyperdrive_input::ControlInputs;
use hyperdrive_math::{CameraOrientation, Point4D};
use hyperdrive_physics::{
    apply_boosts, collect_rings, resolve, BoundsHit, BoundsLimits, PhysicsConfig, PhysicsError, PlayerState,
    WorldBoundsPolicy, WorldModel,
};

use crate::frame::Frame;
use crate::scene::Scene;

/// Error returned by [`tick`]
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A control input was NaN or infinite
    InvalidInput { field: &'static str, value: f64 },
    /// The world fence has a non-positive or non-finite limit
    InvalidBounds(BoundsLimits),
    /// The player state was rejected by the integrator
    Physics(PhysicsError),
}

impl From<PhysicsError> for SimulationError {
    fn from(e: PhysicsError) -> Self {
        SimulationError::Physics(e)
    }
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidInput { field, value } => {
                write!(f, "Invalid control input {}: {}", field, value)
            }
            SimulationError::InvalidBounds(limits) => write!(
                f,
                "Invalid world bounds: x={}, z={}, w={}",
                limits.x, limits.z, limits.w
            ),
            SimulationError::Physics(e) => write!(f, "Physics error: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidInput { .. } | SimulationError::InvalidBounds(_) => None,
            SimulationError::Physics(e) => Some(e),
        }
    }
}

fn check_input(field: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidInput { field, value })
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// The car ended the tick on a surface
    pub grounded: bool,
    /// A ramp exit threw the car upward
    pub launched: bool,
    /// Hypercones that fired
    pub boosts: u32,
    /// Rings collected
    pub rings: u32,
    /// Side faces that pushed the car back
    pub side_hits: u32,
    /// Which walls of the fence were hit
    pub bounds: BoundsHit,
    /// The car fell out of the world and was respawned
    pub recovered: bool,
}

/// Everything that changes from tick to tick
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// The car
    pub player: PlayerState,
    /// The viewer's 4D look angles
    pub camera: CameraOrientation,
    /// Static scenery plus per-entity mutable state (cooldowns, rings)
    pub world: WorldModel,
    /// Where a fallen car is put back
    pub spawn: Point4D,
    /// Fence that overrides the configured one, usually from the scene
    pub bounds: Option<WorldBoundsPolicy>,
    /// Ticks simulated so far
    pub tick: u64,
    /// Rings collected so far
    pub rings_collected: u32,
    /// Events of the most recent tick
    pub last_events: TickEvents,
}

impl SimulationState {
    /// A car at rest at `spawn` in the given world
    pub fn new(world: WorldModel, spawn: Point4D) -> Self {
        Self {
            player: PlayerState::new(spawn),
            camera: CameraOrientation::default(),
            world,
            spawn,
            bounds: None,
            tick: 0,
            rings_collected: 0,
            last_events: TickEvents::default(),
        }
    }

    /// Instantiate a scene
    pub fn from_scene(scene: &Scene) -> Self {
        let mut state = Self::new(scene.instantiate(), scene.spawn());
        state.bounds = scene.bounds_policy();
        state
    }

    /// Override the configured fence
    pub fn with_bounds(mut self, bounds: WorldBoundsPolicy) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Fence in force for this state
    pub fn bounds_policy(&self, config: &PhysicsConfig) -> WorldBoundsPolicy {
        self.bounds.unwrap_or(config.bounds)
    }

    /// Advance one tick in place
    ///
    /// All inputs are checked before anything is mutated, so on error the
    /// state is exactly as it was.
    pub fn step(&mut self, inputs: &ControlInputs, config: &PhysicsConfig) -> Result<TickEvents, SimulationError> {
        self.player.validate()?;
        check_input("view_xw", inputs.view_xw)?;
        check_input("view_zw", inputs.view_zw)?;
        let fence = self.bounds_policy(config);
        if let Some(limits) = fence.limits().filter(|limits| !limits.is_valid()) {
            return Err(SimulationError::InvalidBounds(limits));
        }

        self.camera.apply_delta(inputs.view_xw, inputs.view_zw);

        let drive = inputs.drive();
        self.player.integrate(&drive, config)?;

        let report = resolve(&self.world, &mut self.player, config);
        let launched = self.player.apply_ground(&report, config);

        let boosts = apply_boosts(&mut self.world, &mut self.player, config);
        let rings = collect_rings(&mut self.world, &self.player, config);
        self.rings_collected += rings;

        let bounds = fence.apply(&mut self.player);
        let recovered = self.player.recover(self.spawn, config);

        self.tick += 1;
        self.last_events = TickEvents {
            grounded: self.player.grounded,
            launched,
            boosts,
            rings,
            side_hits: report.side_hits,
            bounds,
            recovered,
        };
        Ok(self.last_events)
    }

    /// Project the current state for the renderer
    pub fn frame(&self, config: &PhysicsConfig) -> Frame {
        Frame::capture(self, config)
    }
}

/// Advance one tick, consuming and returning the state
pub fn tick(
    mut state: SimulationState,
    inputs: &ControlInputs,
    config: &PhysicsConfig,
) -> Result<SimulationState, SimulationError> {
    state.step(inputs, config)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdrive_input::Controls;
    use hyperdrive_math::Point3D;
    use hyperdrive_physics::Entity;

    fn flat_world() -> WorldModel {
        let mut world = WorldModel::new();
        world.add(Entity::platform(
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(100.0, 1.0, 100.0),
            0.0,
            10.0,
        ));
        world
    }

    #[test]
    fn test_tick_counts_and_returns_state() {
        let config = PhysicsConfig::default();
        let state = SimulationState::new(flat_world(), Point4D::new(0.0, 1.0, 0.0, 0.0));
        let state = tick(state, &ControlInputs::default(), &config).unwrap();
        let state = tick(state, &ControlInputs::default(), &config).unwrap();
        assert_eq!(state.tick, 2);
    }

    #[test]
    fn test_camera_rotation_does_not_steer_car() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::new(flat_world(), Point4D::new(0.0, 1.0, 0.0, 0.0));
        let inputs = ControlInputs::new(Controls::THROTTLE).with_view(0.2, -0.1);
        state.step(&inputs, &config).unwrap();

        assert_eq!(state.camera.rot_xw, 0.2);
        assert_eq!(state.camera.rot_zw, -0.1);
        assert_eq!(state.player.car_angle_w, 0.0);
        assert_eq!(state.player.position.w, 0.0);
    }

    #[test]
    fn test_non_finite_view_leaves_state_untouched() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::new(flat_world(), Point4D::new(0.0, 1.0, 0.0, 0.0));
        let before_player = state.player;

        let err = state
            .step(&ControlInputs::default().with_view(f64::NAN, 0.0), &config)
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput { field: "view_xw", .. }));
        assert_eq!(state.player, before_player);
        assert_eq!(state.camera, CameraOrientation::default());
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_non_finite_player_rejected() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::new(flat_world(), Point4D::new(0.0, 1.0, 0.0, 0.0));
        state.player.speed = f64::INFINITY;
        let err = tick(state, &ControlInputs::default(), &config).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Physics(PhysicsError::NonFinite {
                field: "speed",
                value: f64::INFINITY,
            })
        );
        assert!(format!("{}", err).starts_with("Physics error"));
    }

    #[test]
    fn test_scene_bounds_override_config() {
        let config = PhysicsConfig::default();
        let state = SimulationState::new(flat_world(), Point4D::ZERO)
            .with_bounds(WorldBoundsPolicy::bounded(10.0, 10.0, 5.0));
        assert_eq!(state.bounds_policy(&config), WorldBoundsPolicy::bounded(10.0, 10.0, 5.0));

        let unfenced = SimulationState::new(flat_world(), Point4D::ZERO);
        assert_eq!(unfenced.bounds_policy(&config), WorldBoundsPolicy::Unbounded);
    }

    #[test]
    fn test_fence_reverses_speed() {
        let config = PhysicsConfig::default();
        let mut state = SimulationState::new(flat_world(), Point4D::new(9.9, 1.0, 0.0, 0.0))
            .with_bounds(WorldBoundsPolicy::bounded(10.0, 10.0, 5.0));
        state.player.car_angle_xz = std::f64::consts::FRAC_PI_2;
        state.player.speed = 1.0;

        let events = state.step(&ControlInputs::new(Controls::THROTTLE), &config).unwrap();
        assert!(events.bounds.xz);
        assert_eq!(state.player.position.x, 10.0);
        assert!(state.player.speed < 0.0);
    }

    #[test]
    fn test_fall_out_of_world_respawns() {
        let config = PhysicsConfig::default();
        let spawn = Point4D::new(0.0, 5.0, 0.0, 0.0);
        let mut state = SimulationState::new(WorldModel::new(), spawn);
        state.player.position.y = -49.99;
        state.player.vertical_velocity = -1.0;

        let events = state.step(&ControlInputs::default(), &config).unwrap();
        assert!(events.recovered);
        assert_eq!(state.player.position, spawn);
        assert_eq!(state.player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_invalid_fence_rejected_before_mutation() {
        let mut config = PhysicsConfig::default();
        config.bounds = WorldBoundsPolicy::bounded(10.0, 10.0, f64::NAN);
        let mut state = SimulationState::new(flat_world(), Point4D::new(0.0, 1.0, 0.0, 0.0));
        let before_player = state.player;

        let err = state.step(&ControlInputs::new(Controls::THROTTLE), &config).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidBounds(limits) if limits.w.is_nan()));
        assert_eq!(state.player, before_player);
        assert_eq!(state.tick, 0);

        let state = state.with_bounds(WorldBoundsPolicy::bounded(-10.0, 10.0, 5.0));
        let err = tick(state, &ControlInputs::default(), &PhysicsConfig::default()).unwrap_err();
        assert!(format!("{}", err).starts_with("Invalid world bounds"));
    }
}

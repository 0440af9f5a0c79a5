//! Render-ready output of one tick
//!
//! Positions are taken relative to the player's W, rotated by the camera and
//! then perspective-projected into 3D. An entity's pose scale is the
//! projection scale times its cross-section scale, so a solid shrinks both
//! with W distance from the camera and as the player's slice nears its edge.

use hyperdrive_math::{projection_scale, CameraOrientation, Point3D, Point4D, Pose3D};
use hyperdrive_physics::{CrossSectionProfile, Entity, EntityKey, EntityKind, PhysicsConfig, SliceResult};

use crate::simulation::SimulationState;

/// Projected pose of one entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityPose {
    pub key: EntityKey,
    pub pose: Pose3D,
    pub slice: SliceResult,
}

/// Everything the renderer needs for one tick
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub player: Pose3D,
    pub entities: Vec<EntityPose>,
}

impl Frame {
    /// Project a simulation state
    pub fn capture(state: &SimulationState, config: &PhysicsConfig) -> Self {
        let player_w = state.player.position.w;
        let p = state.player.position;
        let player = pose_at(&state.camera, Point4D::new(p.x, p.y, p.z, 0.0), 1.0);

        let entities = state
            .world
            .iter()
            .map(|(key, entity)| {
                let (pose, slice) = entity_pose(&state.camera, entity, player_w, config.cross_section);
                EntityPose { key, pose, slice }
            })
            .collect();

        Self {
            tick: state.tick,
            player,
            entities,
        }
    }

    /// Entities currently visible in the player's slice
    pub fn visible(&self) -> impl Iterator<Item = &EntityPose> + '_ {
        self.entities.iter().filter(|e| e.pose.opacity > 0.0)
    }
}

/// Rotate, project and scale a point relative to the viewer
///
/// Points rotated to `w <= -W_DIST / W_PERSPECTIVE` sit at or behind the
/// projection centre. They get a hidden pose at their unprojected position
/// so the renderer never sees an infinite or negative scale.
fn pose_at(camera: &CameraOrientation, relative: Point4D, slice_scale: f64) -> Pose3D {
    let rotated = camera.rotate(relative);
    let perspective = projection_scale(rotated.w);
    if !(perspective.is_finite() && perspective > 0.0) {
        return Pose3D::hidden(Point3D::new(rotated.x, rotated.y, rotated.z));
    }
    Pose3D {
        position: hyperdrive_math::project(rotated).to_array(),
        scale: perspective * slice_scale,
        opacity: slice_scale,
    }
}

fn entity_pose(
    camera: &CameraOrientation,
    entity: &Entity,
    player_w: f64,
    profile: CrossSectionProfile,
) -> (Pose3D, SliceResult) {
    let c = entity.body.center;
    let relative = Point4D::new(c.x, c.y, c.z, entity.w_center - player_w);
    let slice = entity.slice_at(player_w, profile);

    let collected = matches!(entity.kind, EntityKind::Ring { collected: true, .. });
    let slice_scale = if !slice.visible || collected { 0.0 } else { slice.scale };
    let pose = pose_at(camera, relative, slice_scale);
    (pose, slice)
}

//! Slice-aware collision against the world model
//!
//! Each nearby solid is sliced at the player's W. Solids that are hidden or
//! below their solidity threshold are skipped; the rest shrink their
//! horizontal footprint by the cross-section scale before the overlap test.
//! Collision is discrete: only the post-move position is tested, so a fast
//! car boosting through W can tunnel through thin volumes at low frame rates.

use crate::config::PhysicsConfig;
use crate::entity::{Box3, Entity, EntityKind, RampDirection};
use crate::player::PlayerState;
use crate::world::WorldModel;

/// Ground state gathered from every contributing entity
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundReport {
    /// True if any surface supports the player
    pub on_ground: bool,
    /// Y the player's centre should snap to (highest supporting surface)
    pub ground_y: f64,
    /// The highest supporting surface is a ramp lip
    pub ramp_exit: bool,
    /// Number of side push-outs applied this tick
    pub side_hits: u32,
}

impl GroundReport {
    /// Fold in one supporting surface; the highest one wins
    pub fn merge_ground(&mut self, ground_y: f64, ramp_exit: bool) {
        if !self.on_ground || ground_y > self.ground_y {
            self.ground_y = ground_y;
            self.ramp_exit = ramp_exit;
        } else if ground_y == self.ground_y {
            self.ramp_exit |= ramp_exit;
        }
        self.on_ground = true;
    }
}

/// A horizontal footprint, already scaled and padded by the player margin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub center_x: f64,
    pub center_z: f64,
    pub half_x: f64,
    pub half_z: f64,
}

impl Footprint {
    /// `half * scale + margin` on each horizontal axis
    pub fn scaled(body: &Box3, scale: f64, margin: f64) -> Self {
        Self {
            center_x: body.center.x,
            center_z: body.center.z,
            half_x: body.half_extents.x * scale + margin,
            half_z: body.half_extents.z * scale + margin,
        }
    }

    /// Strict overlap; a point clamped onto the edge is outside
    #[inline]
    pub fn contains(&self, x: f64, z: f64) -> bool {
        (x - self.center_x).abs() < self.half_x && (z - self.center_z).abs() < self.half_z
    }
}

/// Whether the wheels at `foot` rest on a surface at `surface_y`
#[inline]
fn touches_surface(surface_y: f64, foot: f64, falling: bool, config: &PhysicsConfig) -> bool {
    falling
        && foot <= surface_y + config.ground_band_above
        && foot >= surface_y - config.ground_band_below
}

/// Height of a ramp surface under (x, z), and whether that point is at the lip
fn ramp_surface(
    body: &Box3,
    direction: RampDirection,
    height: f64,
    scale: f64,
    x: f64,
    z: f64,
    config: &PhysicsConfig,
) -> Option<(f64, bool)> {
    let half_x = body.half_extents.x * scale;
    let half_z = body.half_extents.z * scale;
    if half_x <= 0.0 || half_z <= 0.0 {
        return None;
    }
    let raw = direction.progress(body.center, half_x, half_z, x, z);
    let progress = raw.clamp(0.0, 1.0);
    let surface = body.bottom() + progress * height;
    Some((surface, raw >= config.ramp_exit_progress))
}

/// Push the player out of a footprint along the shallower axis
///
/// Normalized offsets `|dx| / half_x` and `|dz| / half_z` measure how close
/// the player is to each pair of walls; the larger one is the shallower
/// penetration and is the axis that gets resolved.
pub fn push_out(footprint: &Footprint, player: &mut PlayerState, damping: f64) {
    let dx = player.position.x - footprint.center_x;
    let dz = player.position.z - footprint.center_z;
    let nx = dx.abs() / footprint.half_x;
    let nz = dz.abs() / footprint.half_z;

    if nx >= nz {
        let side = if dx >= 0.0 { 1.0 } else { -1.0 };
        player.position.x = footprint.center_x + side * footprint.half_x;
    } else {
        let side = if dz >= 0.0 { 1.0 } else { -1.0 };
        player.position.z = footprint.center_z + side * footprint.half_z;
    }
    player.speed *= damping;
}

/// Resolve one entity against the player, updating the report
fn resolve_entity(
    entity: &Entity,
    scale: f64,
    player: &mut PlayerState,
    report: &mut GroundReport,
    config: &PhysicsConfig,
) {
    let footprint = Footprint::scaled(&entity.body, scale, config.player_margin);
    if !footprint.contains(player.position.x, player.position.z) {
        return;
    }

    let falling = player.vertical_velocity <= 0.0;
    let foot = player.position.y - config.player_half_height;

    match &entity.kind {
        EntityKind::Platform => {
            let top = entity.body.top();
            if touches_surface(top, foot, falling, config) {
                report.merge_ground(top + config.player_half_height, false);
            }
        }
        EntityKind::Ramp { direction, height } => {
            let surface = ramp_surface(
                &entity.body,
                *direction,
                *height,
                scale,
                player.position.x,
                player.position.z,
                config,
            );
            if let Some((surface_y, at_lip)) = surface {
                if touches_surface(surface_y, foot, falling, config) {
                    report.merge_ground(surface_y + config.player_half_height, at_lip);
                }
            }
        }
        EntityKind::Building | EntityKind::Hypercube => {
            let top = entity.body.top();
            let head = player.position.y + config.player_half_height;
            if touches_surface(top, foot, falling, config) {
                report.merge_ground(top + config.player_half_height, false);
            } else if foot < top && head > entity.body.bottom() {
                let damping = config.side_damping(&entity.kind).unwrap_or(1.0);
                push_out(&footprint, player, damping);
                report.side_hits += 1;
            }
        }
        EntityKind::Hypersphere { .. } | EntityKind::HyperCone(_) | EntityKind::Ring { .. } => {}
    }
}

/// Resolve the player's proposed position against every nearby solid
///
/// Side push-outs are applied to `player` directly (position and speed).
/// Ground state is returned for [`PlayerState::apply_ground`]: `on_ground`
/// is the OR over all contributors and `ground_y` the highest surface.
pub fn resolve(world: &WorldModel, player: &mut PlayerState, config: &PhysicsConfig) -> GroundReport {
    let mut report = GroundReport::default();
    let (x, z, w) = (player.position.x, player.position.z, player.position.w);

    for (_key, entity) in world.nearby(x, z, config.nearby_radius) {
        let Some(threshold) = config.solidity.for_kind(&entity.kind) else {
            continue;
        };
        let slice = entity.slice_at(w, config.cross_section);
        if !slice.is_solid(threshold) {
            continue;
        }
        resolve_entity(entity, slice.scale, player, &mut report, config);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdrive_math::{Point3D, Point4D};

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    /// Platform 20x1x20 whose top is at y = 1
    fn platform_world() -> WorldModel {
        let mut world = WorldModel::new();
        world.add(Entity::platform(
            Point3D::new(0.0, 0.5, 0.0),
            Point3D::new(20.0, 1.0, 20.0),
            0.0,
            8.0,
        ));
        world
    }

    fn falling_player(x: f64, y: f64, z: f64, w: f64) -> PlayerState {
        let mut player = PlayerState::new(Point4D::new(x, y, z, w));
        player.vertical_velocity = -0.1;
        player
    }

    #[test]
    fn test_footprint_scaling() {
        let body = Box3::from_size(Point3D::ZERO, Point3D::new(4.0, 2.0, 6.0));
        let fp = Footprint::scaled(&body, 0.5, 1.0);
        assert_eq!(fp.half_x, 2.0);
        assert_eq!(fp.half_z, 2.5);
        assert!(fp.contains(1.9, 0.0));
        assert!(!fp.contains(2.0, 0.0));
    }

    #[test]
    fn test_platform_grounds_player_within_band() {
        let world = platform_world();
        let mut player = falling_player(0.0, 1.4, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert_eq!(report.ground_y, 1.5);
        assert!(!report.ramp_exit);
    }

    #[test]
    fn test_platform_ignored_when_above_band() {
        let world = platform_world();
        let mut player = falling_player(0.0, 3.0, 0.0, 0.0);
        assert!(!resolve(&world, &mut player, &config()).on_ground);
    }

    #[test]
    fn test_platform_ignored_when_rising() {
        let world = platform_world();
        let mut player = falling_player(0.0, 1.45, 0.0, 0.0);
        player.vertical_velocity = 0.2;
        assert!(!resolve(&world, &mut player, &config()).on_ground);
    }

    #[test]
    fn test_platform_out_of_slice_is_not_solid() {
        let world = platform_world();
        // W distance 7.9 of 8 gives scale ~0.16, below the 0.2 threshold
        let mut player = falling_player(0.0, 1.4, 0.0, 7.9);
        assert!(!resolve(&world, &mut player, &config()).on_ground);

        let mut player = falling_player(0.0, 1.4, 0.0, 20.0);
        assert!(!resolve(&world, &mut player, &config()).on_ground);
    }

    #[test]
    fn test_footprint_shrinks_with_slice() {
        let world = platform_world();
        // At W=0 the footprint half-width is 10 + 1
        let mut player = falling_player(10.5, 1.4, 0.0, 0.0);
        assert!(resolve(&world, &mut player, &config()).on_ground);

        // At W=4 the scale is ~0.866 so the half-width is ~9.66
        let mut player = falling_player(10.5, 1.4, 0.0, 4.0);
        assert!(!resolve(&world, &mut player, &config()).on_ground);
    }

    #[test]
    fn test_highest_surface_wins() {
        let mut world = platform_world();
        world.add(Entity::platform(
            Point3D::new(0.0, 1.25, 0.0),
            Point3D::new(4.0, 0.5, 4.0),
            0.0,
            8.0,
        ));
        // Second platform top at 1.5; foot at 1.0 is within both bands
        let mut player = falling_player(0.0, 1.5, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert_eq!(report.ground_y, 2.0);
    }

    #[test]
    fn test_merge_ground_keeps_max() {
        let mut report = GroundReport::default();
        report.merge_ground(1.0, true);
        report.merge_ground(3.0, false);
        report.merge_ground(2.0, true);
        assert!(report.on_ground);
        assert_eq!(report.ground_y, 3.0);
        assert!(!report.ramp_exit);
    }

    fn ramp_world(direction: RampDirection) -> WorldModel {
        let mut world = WorldModel::new();
        // Foot at y = 0, 10 long on X, 4 wide on Z, rises 2
        world.add(Entity::ramp(
            Point3D::new(0.0, 0.0, 0.0),
            10.0,
            4.0,
            2.0,
            direction,
            0.0,
            8.0,
        ));
        world
    }

    #[test]
    fn test_ramp_height_interpolates() {
        let world = ramp_world(RampDirection::PosX);
        // Halfway up: surface 1.0, centre 1.5
        let mut player = falling_player(0.0, 1.45, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert!((report.ground_y - 1.5).abs() < 1e-12);
        assert!(!report.ramp_exit);
    }

    #[test]
    fn test_ramp_direction_matters() {
        let world = ramp_world(RampDirection::NegX);
        // At x = -2.5 a NegX ramp is three quarters up: surface 1.5
        let mut player = falling_player(-2.5, 1.9, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert!((report.ground_y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_lip_reports_exit() {
        let world = ramp_world(RampDirection::PosX);
        // Past the lip but inside the player margin: progress clamps to 1
        let mut player = falling_player(5.5, 2.45, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert!((report.ground_y - 2.5).abs() < 1e-12);
        assert!(report.ramp_exit);
    }

    fn block_world(kind: &str) -> WorldModel {
        let mut world = WorldModel::new();
        // 4x4x4 block standing on y = 0
        let center = Point3D::new(0.0, 2.0, 0.0);
        let entity = match kind {
            "building" => Entity::building(center, Point3D::new(4.0, 4.0, 4.0), 0.0, 8.0),
            _ => Entity::hypercube(center, 4.0, 0.0, 8.0),
        };
        world.add(entity);
        world
    }

    #[test]
    fn test_volume_landing_on_top() {
        let world = block_world("building");
        let mut player = falling_player(0.5, 4.4, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(report.on_ground);
        assert_eq!(report.ground_y, 4.5);
        assert_eq!(report.side_hits, 0);
    }

    #[test]
    fn test_building_side_push_along_shallow_axis() {
        let world = block_world("building");
        // Footprint half-width is 2 + 1 = 3; player is deep in Z, shallow in X
        let mut player = falling_player(2.8, 1.0, 0.5, 0.0);
        player.speed = 1.0;
        let report = resolve(&world, &mut player, &config());
        assert!(!report.on_ground);
        assert_eq!(report.side_hits, 1);
        assert_eq!(player.position.x, 3.0);
        assert_eq!(player.position.z, 0.5);
        assert!((player.speed - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_hypercube_side_push_on_z() {
        let world = block_world("hypercube");
        let mut player = falling_player(0.2, 1.0, -2.9, 0.0);
        player.speed = 1.0;
        let report = resolve(&world, &mut player, &config());
        assert_eq!(report.side_hits, 1);
        assert_eq!(player.position.z, -3.0);
        assert_eq!(player.position.x, 0.2);
        assert!((player.speed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pushed_player_no_longer_overlaps() {
        let world = block_world("hypercube");
        let mut player = falling_player(2.8, 1.0, 0.5, 0.0);
        resolve(&world, &mut player, &config());
        let report = resolve(&world, &mut player, &config());
        assert_eq!(report.side_hits, 0);
    }

    #[test]
    fn test_player_above_volume_is_untouched() {
        let world = block_world("building");
        let mut player = falling_player(2.8, 10.0, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert!(!report.on_ground);
        assert_eq!(report.side_hits, 0);
        assert_eq!(player.position.x, 2.8);
    }

    #[test]
    fn test_non_solid_kinds_ignored() {
        let mut world = WorldModel::new();
        world.add(Entity::hypersphere(Point3D::new(0.0, 1.0, 0.0), 3.0, 0.0, 5.0));
        world.add(Entity::ring(Point3D::new(0.0, 1.0, 0.0), 2.0, 0.0, 5.0));
        let mut player = falling_player(0.0, 1.0, 0.0, 0.0);
        let report = resolve(&world, &mut player, &config());
        assert_eq!(report, GroundReport::default());
    }
}

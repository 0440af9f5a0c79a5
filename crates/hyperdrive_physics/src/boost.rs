//! Hypercone boost pads
//!
//! A hypercone fires once on contact and then stays inactive for
//! `boost_cooldown_ticks`. Every cone counts down on every tick, whether or
//! not the player is nearby.

use hyperdrive_math::Point4D;

use crate::config::{PhysicsConfig, BOOST_W_SCALE, BOOST_XZ_SPEED_FACTOR};
use crate::entity::{Entity, EntityKind, HyperCone};
use crate::player::PlayerState;
use crate::world::WorldModel;

/// Whether the player is touching a cone's pad
///
/// Requires the player to be within the cone's W radius, within its planar
/// radius, and with the wheels below the pad top.
pub fn in_contact(entity: &Entity, cone: &HyperCone, player: &PlayerState, config: &PhysicsConfig) -> bool {
    let pos = player.position;
    let w_distance = (pos.w - entity.w_center).abs();
    let center = entity.body.center;
    let planar = pos.planar_distance(Point4D::new(center.x, 0.0, center.z, entity.w_center));
    let foot = pos.y - config.player_half_height;

    w_distance < entity.w_extent && planar < cone.radius && foot < entity.body.top()
}

/// Apply a cone's impulse to the player
///
/// X/Y/Z of the boost act unscaled (Y on vertical velocity, the horizontal
/// magnitude on speed); W is scaled by [`BOOST_W_SCALE`] and moves the player
/// across slices immediately.
pub fn apply_impulse(cone: &HyperCone, player: &mut PlayerState) {
    let boost = cone.boost;
    player.vertical_velocity += boost.y;
    player.speed += boost.x.hypot(boost.z) * BOOST_XZ_SPEED_FACTOR;
    player.position.w += boost.w * BOOST_W_SCALE;
    player.grounded = false;
}

/// Tick every cone's cooldown and fire the ones the player touches
///
/// Returns the number of cones that fired.
pub fn apply_boosts(world: &mut WorldModel, player: &mut PlayerState, config: &PhysicsConfig) -> u32 {
    let mut fired = 0;

    for (_key, entity) in world.hypercones_mut() {
        let mut cone = match &entity.kind {
            EntityKind::HyperCone(cone) => *cone,
            _ => continue,
        };

        cone.cooldown = cone.cooldown.saturating_sub(1);
        if cone.is_ready() && in_contact(entity, &cone, player, config) {
            apply_impulse(&cone, player);
            cone.cooldown = config.boost_cooldown_ticks;
            fired += 1;
            log::debug!(
                "Boost {} fired: player now at w={:.2}, speed={:.2}",
                entity.name.as_deref().unwrap_or("<unnamed>"),
                player.position.w,
                player.speed
            );
        }

        entity.kind = EntityKind::HyperCone(cone);
    }

    fired
}

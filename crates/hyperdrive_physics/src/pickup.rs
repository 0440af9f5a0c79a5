//! Collectible rings

use crate::config::PhysicsConfig;
use crate::entity::EntityKind;
use crate::player::PlayerState;
use crate::world::WorldModel;

/// Collect every ring the player is touching in the current slice
///
/// A ring only exists for the player while its slice is visible, and it can
/// be collected once. Returns how many rings were collected this tick.
pub fn collect_rings(world: &mut WorldModel, player: &PlayerState, config: &PhysicsConfig) -> u32 {
    let mut collected_now = 0;
    let p = player.position;

    for (_key, entity) in world.rings_mut() {
        if !entity.slice_at(p.w, config.cross_section).visible {
            continue;
        }
        let c = entity.body.center;
        let distance = ((p.x - c.x).powi(2) + (p.y - c.y).powi(2) + (p.z - c.z).powi(2)).sqrt();

        if let EntityKind::Ring { radius, collected } = &mut entity.kind {
            if distance < *radius {
                *collected = true;
                collected_now += 1;
                log::debug!(
                    "Collected ring {}",
                    entity.name.as_deref().unwrap_or("<unnamed>")
                );
            }
        }
    }

    collected_now
}

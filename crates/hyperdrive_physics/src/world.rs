//! World model: the static registry of entities

use slotmap::{new_key_type, SlotMap};

use crate::entity::{Entity, EntityKind, HyperCone};

new_key_type! {
    /// Key to an entity in the world model
    ///
    /// Generational, so a key to a removed entity never aliases a new one.
    pub struct EntityKey;
}

/// All entities in the world, built once at load time
#[derive(Clone, Debug, Default)]
pub struct WorldModel {
    entities: SlotMap<EntityKey, Entity>,
}

impl WorldModel {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Create a world with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add an entity and return its key
    pub fn add(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Get an entity by key
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable entity by key
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Iterate over all entities with their keys
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> + '_ {
        self.entities.iter()
    }

    /// Number of entities
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities whose footprint comes within `radius` of (x, z) in the XZ plane
    ///
    /// A coarse broad phase; exact overlap is decided by the collision resolver.
    pub fn nearby(&self, x: f64, z: f64, radius: f64) -> impl Iterator<Item = (EntityKey, &Entity)> + '_ {
        self.entities.iter().filter(move |(_, e)| {
            let dx = (x - e.body.center.x).abs() - e.body.half_extents.x;
            let dz = (z - e.body.center.z).abs() - e.body.half_extents.z;
            dx <= radius && dz <= radius
        })
    }

    /// Iterate over every hypercone with its W placement
    pub fn hypercones_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> + '_ {
        self.entities
            .iter_mut()
            .filter(|(_, e)| matches!(e.kind, EntityKind::HyperCone(_)))
    }

    /// Iterate over every ring that is still waiting to be collected
    pub fn rings_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> + '_ {
        self.entities
            .iter_mut()
            .filter(|(_, e)| matches!(e.kind, EntityKind::Ring { collected: false, .. }))
    }

    /// Hypercone data for a key, if that entity is a hypercone
    pub fn hypercone(&self, key: EntityKey) -> Option<&HyperCone> {
        match &self.entities.get(key)?.kind {
            EntityKind::HyperCone(cone) => Some(cone),
            _ => None,
        }
    }

    /// Number of rings not yet collected
    pub fn rings_remaining(&self) -> usize {
        self.entities
            .values()
            .filter(|e| matches!(e.kind, EntityKind::Ring { collected: false, .. }))
            .count()
    }
}

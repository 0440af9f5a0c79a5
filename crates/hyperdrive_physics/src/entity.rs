//! World entity descriptors
//!
//! Entities are built once from the scene and are immutable afterwards,
//! with two exceptions: a hypercone's boost `cooldown` and a ring's
//! `collected` flag.

use hyperdrive_math::{Point3D, Point4D};
use serde::{Deserialize, Serialize};

use crate::slice::{slice_with_profile, CrossSectionProfile, SliceResult};

/// An axis-aligned 3D box (the entity's footprint at full cross-section)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Box3 {
    pub center: Point3D,
    pub half_extents: Point3D,
}

impl Box3 {
    pub fn new(center: Point3D, half_extents: Point3D) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build from a center and full size
    pub fn from_size(center: Point3D, size: Point3D) -> Self {
        Self::new(center, Point3D::new(size.x * 0.5, size.y * 0.5, size.z * 0.5))
    }

    /// Y of the top face
    #[inline]
    pub fn top(&self) -> f64 {
        self.center.y + self.half_extents.y
    }

    /// Y of the bottom face
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y - self.half_extents.y
    }
}

/// The horizontal direction a ramp climbs toward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampDirection {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl RampDirection {
    /// Progress up the ramp for a point, 0 at the foot and 1 at the lip
    ///
    /// Unclamped: values outside [0, 1] mean the point is before the foot
    /// or past the lip.
    pub fn progress(self, center: Point3D, half_x: f64, half_z: f64, x: f64, z: f64) -> f64 {
        match self {
            RampDirection::PosX => (x - (center.x - half_x)) / (2.0 * half_x),
            RampDirection::NegX => ((center.x + half_x) - x) / (2.0 * half_x),
            RampDirection::PosZ => (z - (center.z - half_z)) / (2.0 * half_z),
            RampDirection::NegZ => ((center.z + half_z) - z) / (2.0 * half_z),
        }
    }
}

/// A boost pad shaped like a 4D cone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HyperCone {
    /// Activation radius in the XZ plane
    pub radius: f64,
    /// Pad height; the player must be below the pad top to trigger it
    pub height: f64,
    /// Impulse applied on contact (x, y, z, w)
    pub boost: Point4D,
    /// Ticks until the pad can fire again
    pub cooldown: u32,
}

impl HyperCone {
    pub fn new(radius: f64, height: f64, boost: Point4D) -> Self {
        Self {
            radius,
            height,
            boost,
            cooldown: 0,
        }
    }

    /// Whether the pad is ready to fire
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}

/// What an entity is, and the per-kind data it carries
#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    /// Flat slab the player can stand on
    Platform,
    /// Inclined slab; height interpolates along `direction`
    Ramp {
        direction: RampDirection,
        height: f64,
    },
    /// Volumetric obstacle; side hits lose most of the car's speed
    Building,
    /// Volumetric obstacle; side hits lose half the car's speed
    Hypercube,
    /// Decorative 4D sphere (visible, never solid)
    Hypersphere { radius: f64 },
    /// Boost pad
    HyperCone(HyperCone),
    /// One-shot collectible
    Ring { radius: f64, collected: bool },
}

impl EntityKind {
    /// Short lowercase name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Platform => "platform",
            EntityKind::Ramp { .. } => "ramp",
            EntityKind::Building => "building",
            EntityKind::Hypercube => "hypercube",
            EntityKind::Hypersphere { .. } => "hypersphere",
            EntityKind::HyperCone(_) => "hypercone",
            EntityKind::Ring { .. } => "ring",
        }
    }
}

/// A world entity: a 3D footprint swept across a W range
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Optional name from the scene file
    pub name: Option<String>,
    /// Footprint at full cross-section
    pub body: Box3,
    /// Centre of the W range
    pub w_center: f64,
    /// Half-width of the W range
    pub w_extent: f64,
    /// Per-kind data
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind, body: Box3, w_center: f64, w_extent: f64) -> Self {
        Self {
            name: None,
            body,
            w_center,
            w_extent,
            kind,
        }
    }

    /// A flat platform of the given size centred at `center`
    pub fn platform(center: Point3D, size: Point3D, w_center: f64, w_extent: f64) -> Self {
        Self::new(EntityKind::Platform, Box3::from_size(center, size), w_center, w_extent)
    }

    /// A ramp whose foot sits at `base` (x, y, z centre of the footprint at ground level)
    pub fn ramp(
        base: Point3D,
        width: f64,
        depth: f64,
        height: f64,
        direction: RampDirection,
        w_center: f64,
        w_extent: f64,
    ) -> Self {
        let center = Point3D::new(base.x, base.y + height * 0.5, base.z);
        Self::new(
            EntityKind::Ramp { direction, height },
            Box3::from_size(center, Point3D::new(width, height, depth)),
            w_center,
            w_extent,
        )
    }

    pub fn building(center: Point3D, size: Point3D, w_center: f64, w_extent: f64) -> Self {
        Self::new(EntityKind::Building, Box3::from_size(center, size), w_center, w_extent)
    }

    pub fn hypercube(center: Point3D, size: f64, w_center: f64, w_extent: f64) -> Self {
        Self::new(
            EntityKind::Hypercube,
            Box3::from_size(center, Point3D::new(size, size, size)),
            w_center,
            w_extent,
        )
    }

    pub fn hypersphere(center: Point3D, radius: f64, w_center: f64, radius_w: f64) -> Self {
        Self::new(
            EntityKind::Hypersphere { radius },
            Box3::new(center, Point3D::new(radius, radius, radius)),
            w_center,
            radius_w,
        )
    }

    /// A boost pad whose base sits at `base`
    pub fn hypercone(
        base: Point3D,
        radius: f64,
        height: f64,
        boost: Point4D,
        w_center: f64,
        radius_w: f64,
    ) -> Self {
        let center = Point3D::new(base.x, base.y + height * 0.5, base.z);
        Self::new(
            EntityKind::HyperCone(HyperCone::new(radius, height, boost)),
            Box3::new(center, Point3D::new(radius, height * 0.5, radius)),
            w_center,
            radius_w,
        )
    }

    pub fn ring(center: Point3D, radius: f64, w_center: f64, w_extent: f64) -> Self {
        Self::new(
            EntityKind::Ring {
                radius,
                collected: false,
            },
            Box3::new(center, Point3D::new(radius, radius, radius)),
            w_center,
            w_extent,
        )
    }

    /// Attach a name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 4D centre of the entity
    pub fn center4(&self) -> Point4D {
        let c = self.body.center;
        Point4D::new(c.x, c.y, c.z, self.w_center)
    }

    /// Cross-section at the given player W
    #[inline]
    pub fn slice_at(&self, player_w: f64, profile: CrossSectionProfile) -> SliceResult {
        slice_with_profile(self.w_center, self.w_extent, player_w, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_top_bottom() {
        let b = Box3::from_size(Point3D::new(0.0, 2.0, 0.0), Point3D::new(4.0, 1.0, 6.0));
        assert_eq!(b.half_extents, Point3D::new(2.0, 0.5, 3.0));
        assert_eq!(b.top(), 2.5);
        assert_eq!(b.bottom(), 1.5);
    }

    #[test]
    fn test_ramp_progress_per_direction() {
        let c = Point3D::new(0.0, 0.0, 0.0);
        assert_eq!(RampDirection::PosX.progress(c, 5.0, 2.0, -5.0, 0.0), 0.0);
        assert_eq!(RampDirection::PosX.progress(c, 5.0, 2.0, 5.0, 0.0), 1.0);
        assert_eq!(RampDirection::NegX.progress(c, 5.0, 2.0, -5.0, 0.0), 1.0);
        assert_eq!(RampDirection::PosZ.progress(c, 5.0, 2.0, 0.0, 0.0), 0.5);
        assert_eq!(RampDirection::NegZ.progress(c, 5.0, 2.0, 0.0, 2.0), 0.0);
        assert!(RampDirection::PosX.progress(c, 5.0, 2.0, 7.0, 0.0) > 1.0);
    }

    #[test]
    fn test_ramp_constructor_places_foot_on_base() {
        let ramp = Entity::ramp(
            Point3D::new(0.0, 1.0, 0.0),
            10.0,
            4.0,
            3.0,
            RampDirection::PosZ,
            0.0,
            5.0,
        );
        assert_eq!(ramp.body.bottom(), 1.0);
        assert_eq!(ramp.body.top(), 4.0);
        assert!(matches!(ramp.kind, EntityKind::Ramp { height, .. } if height == 3.0));
    }

    #[test]
    fn test_hypercone_starts_ready() {
        let cone = Entity::hypercone(
            Point3D::ZERO,
            2.0,
            1.0,
            Point4D::new(0.0, 0.5, 0.0, 1.0),
            0.0,
            3.0,
        );
        match cone.kind {
            EntityKind::HyperCone(c) => {
                assert!(c.is_ready());
                assert_eq!(c.radius, 2.0);
            }
            _ => panic!("expected hypercone"),
        }
        assert_eq!(cone.body.top(), 1.0);
    }

    #[test]
    fn test_slice_at_uses_w_range() {
        let cube = Entity::hypercube(Point3D::ZERO, 2.0, 10.0, 4.0).with_name("cube");
        assert_eq!(cube.name.as_deref(), Some("cube"));
        assert!(cube.slice_at(10.0, CrossSectionProfile::Spherical).visible);
        assert!(!cube.slice_at(0.0, CrossSectionProfile::Spherical).visible);
        assert_eq!(cube.center4(), Point4D::new(0.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn test_labels() {
        assert_eq!(EntityKind::Platform.label(), "platform");
        assert_eq!(EntityKind::Hypercube.label(), "hypercube");
        assert_eq!(
            EntityKind::Ring {
                radius: 1.0,
                collected: false
            }
            .label(),
            "ring"
        );
    }
}

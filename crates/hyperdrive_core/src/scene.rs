//! Scene serialization
//!
//! A scene is the static world descriptor: entity templates, the player
//! spawn point and an optional world fence. Scenes are loaded from RON files
//! once at startup and turned into a [`WorldModel`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use hyperdrive_math::{Point3D, Point4D};
use hyperdrive_physics::{BoundsLimits, Entity, RampDirection, WorldBoundsPolicy, WorldModel};

/// Spawn used when a scene does not name one
pub const DEFAULT_SPAWN: [f64; 4] = [0.0, 2.0, 0.0, 0.0];

/// Shape and per-kind parameters of an entity template
///
/// `position` on the owning [`EntityTemplate`] is the box centre, except for
/// ramps and hypercones where it is the centre of the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeTemplate {
    /// Flat slab, full size `[x, y, z]`
    Platform { size: [f64; 3] },
    /// Ramp rising `height` toward `direction`
    Ramp {
        width: f64,
        depth: f64,
        height: f64,
        direction: RampDirection,
    },
    /// Box obstacle, full size `[x, y, z]`
    Building { size: [f64; 3] },
    /// Cube obstacle with edge `size`
    Hypercube { size: f64 },
    /// Decorative sphere
    Hypersphere { radius: f64 },
    /// Boost pad; `boost` is `[x, y, z, w]`
    HyperCone {
        radius: f64,
        height: f64,
        boost: [f64; 4],
    },
    /// Collectible ring
    Ring { radius: f64 },
}

impl ShapeTemplate {
    /// Short lowercase name used in logs and validation messages
    pub fn label(&self) -> &'static str {
        match self {
            ShapeTemplate::Platform { .. } => "platform",
            ShapeTemplate::Ramp { .. } => "ramp",
            ShapeTemplate::Building { .. } => "building",
            ShapeTemplate::Hypercube { .. } => "hypercube",
            ShapeTemplate::Hypersphere { .. } => "hypersphere",
            ShapeTemplate::HyperCone { .. } => "hypercone",
            ShapeTemplate::Ring { .. } => "ring",
        }
    }

    /// Every length that must be strictly positive, with its field name
    pub fn extents(&self) -> Vec<(&'static str, f64)> {
        match self {
            ShapeTemplate::Platform { size } | ShapeTemplate::Building { size } => {
                vec![("size.x", size[0]), ("size.y", size[1]), ("size.z", size[2])]
            }
            ShapeTemplate::Ramp {
                width,
                depth,
                height,
                ..
            } => vec![("width", *width), ("depth", *depth), ("height", *height)],
            ShapeTemplate::Hypercube { size } => vec![("size", *size)],
            ShapeTemplate::Hypersphere { radius } | ShapeTemplate::Ring { radius } => {
                vec![("radius", *radius)]
            }
            ShapeTemplate::HyperCone { radius, height, .. } => {
                vec![("radius", *radius), ("height", *height)]
            }
        }
    }
}

/// A serializable entity description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTemplate {
    /// Optional name for lookups and logs
    #[serde(default)]
    pub name: Option<String>,
    /// Shape and per-kind data
    pub shape: ShapeTemplate,
    /// Position `[x, y, z]`
    pub position: [f64; 3],
    /// Centre of the W range
    #[serde(default)]
    pub w_center: f64,
    /// Half-width of the W range
    pub w_extent: f64,
}

impl EntityTemplate {
    pub fn new(shape: ShapeTemplate, position: [f64; 3], w_center: f64, w_extent: f64) -> Self {
        Self {
            name: None,
            shape,
            position,
            w_center,
            w_extent,
        }
    }

    /// Attach a name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the runtime entity
    pub fn to_entity(&self) -> Entity {
        let p = Point3D::from_array(self.position);
        let (wc, we) = (self.w_center, self.w_extent);
        let entity = match &self.shape {
            ShapeTemplate::Platform { size } => Entity::platform(p, Point3D::from_array(*size), wc, we),
            ShapeTemplate::Ramp {
                width,
                depth,
                height,
                direction,
            } => Entity::ramp(p, *width, *depth, *height, *direction, wc, we),
            ShapeTemplate::Building { size } => Entity::building(p, Point3D::from_array(*size), wc, we),
            ShapeTemplate::Hypercube { size } => Entity::hypercube(p, *size, wc, we),
            ShapeTemplate::Hypersphere { radius } => Entity::hypersphere(p, *radius, wc, we),
            ShapeTemplate::HyperCone {
                radius,
                height,
                boost,
            } => Entity::hypercone(p, *radius, *height, Point4D::from_array(*boost), wc, we),
            ShapeTemplate::Ring { radius } => Entity::ring(p, *radius, wc, we),
        };
        match &self.name {
            Some(name) => entity.with_name(name.clone()),
            None => entity,
        }
    }
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Entity templates in this scene
    pub entities: Vec<EntityTemplate>,
    /// Player spawn position [x, y, z, w]
    #[serde(default)]
    pub player_spawn: Option<[f64; 4]>,
    /// World fence; absent means the configured policy applies
    #[serde(default)]
    pub bounds: Option<BoundsLimits>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            player_spawn: None,
            bounds: None,
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron(contents: &str) -> Result<Self, SceneLoadError> {
        let scene = ron::from_str(contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an entity template to this scene
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.push(entity);
    }

    /// Set the player spawn position
    pub fn with_player_spawn(mut self, x: f64, y: f64, z: f64, w: f64) -> Self {
        self.player_spawn = Some([x, y, z, w]);
        self
    }

    /// Fence the world
    pub fn with_bounds(mut self, x: f64, z: f64, w: f64) -> Self {
        self.bounds = Some(BoundsLimits { x, z, w });
        self
    }

    /// The spawn point, falling back to [`DEFAULT_SPAWN`]
    pub fn spawn(&self) -> Point4D {
        Point4D::from_array(self.player_spawn.unwrap_or(DEFAULT_SPAWN))
    }

    /// The scene's own bounds policy, if it declares a fence
    pub fn bounds_policy(&self) -> Option<WorldBoundsPolicy> {
        self.bounds.map(|limits| WorldBoundsPolicy::Bounded { limits })
    }

    /// Build the world model from the templates
    pub fn instantiate(&self) -> WorldModel {
        let mut world = WorldModel::with_capacity(self.entities.len());
        for template in &self.entities {
            world.add(template.to_entity());
        }
        log::info!("Instantiated scene '{}' with {} entities", self.name, world.len());
        world
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneLoadError::Io(e) => Some(e),
            SceneLoadError::Parse(e) => Some(e),
        }
    }
}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

//! Scene validation
//!
//! Validates scenes for common errors before a run. The [`SceneValidator`]
//! checks for empty scenes, duplicate entity names, degenerate sizes,
//! non-finite numbers and extreme spawn positions.

use std::collections::HashSet;
use std::path::Path;

use hyperdrive_physics::BoundsLimits;

use crate::scene::{EntityTemplate, Scene, SceneLoadError};

/// Spawn components beyond this magnitude are reported
const EXTREME_COORDINATE: f64 = 10000.0;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene has no entities
    EmptyScene,
    /// Duplicate entity name found
    DuplicateName(String),
    /// A size, radius or height is zero or negative
    NonPositiveExtent {
        entity: String,
        field: &'static str,
        value: f64,
    },
    /// W extent is zero or negative; the entity can never be seen or touched
    DegenerateWExtent { entity: String, value: f64 },
    /// A number in the scene is NaN or infinite
    NonFinite { entity: String, field: &'static str },
    /// Player spawn is at extreme coordinates (any component absolute value > 10000)
    ExtremeSpawnPosition([f64; 4]),
    /// Player spawn lies outside the scene's own fence
    SpawnOutsideBounds([f64; 4]),
    /// The scene's fence has a non-positive or non-finite limit
    InvalidBounds(BoundsLimits),
}

impl ValidationError {
    /// Whether the scene cannot be run at all
    ///
    /// Non-fatal errors describe scenes that run but are probably not what
    /// the author meant.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ValidationError::NonPositiveExtent { .. }
                | ValidationError::NonFinite { .. }
                | ValidationError::InvalidBounds(_)
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScene => write!(f, "Scene has no entities"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate entity name: '{}'", name)
            }
            ValidationError::NonPositiveExtent {
                entity,
                field,
                value,
            } => write!(f, "Entity {} has non-positive {}: {}", entity, field, value),
            ValidationError::DegenerateWExtent { entity, value } => write!(
                f,
                "Entity {} has w_extent {} and will never be visible",
                entity, value
            ),
            ValidationError::NonFinite { entity, field } => {
                write!(f, "Entity {} has a non-finite {}", entity, field)
            }
            ValidationError::ExtremeSpawnPosition(pos) => write!(
                f,
                "Extreme spawn position: [{}, {}, {}, {}] (component abs > {})",
                pos[0], pos[1], pos[2], pos[3], EXTREME_COORDINATE
            ),
            ValidationError::SpawnOutsideBounds(pos) => write!(
                f,
                "Spawn position [{}, {}, {}, {}] lies outside the world bounds",
                pos[0], pos[1], pos[2], pos[3]
            ),
            ValidationError::InvalidBounds(limits) => write!(
                f,
                "World bounds must be positive and finite: x={}, z={}, w={}",
                limits.x, limits.z, limits.w
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error loading a scene that must also pass validation
#[derive(Debug)]
pub enum SceneError {
    /// The file could not be read or parsed
    Load(SceneLoadError),
    /// The scene parsed but has fatal validation errors
    Invalid(Vec<ValidationError>),
}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        SceneError::Load(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Load(e) => write!(f, "{}", e),
            SceneError::Invalid(errors) => {
                write!(f, "{} validation error(s)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Load(e) => Some(e),
            SceneError::Invalid(_) => None,
        }
    }
}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::warn!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.entities.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let mut seen_names = HashSet::new();
        for entity in &scene.entities {
            if let Some(ref name) = entity.name {
                if !seen_names.insert(name.clone()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }
        }

        for (index, entity) in scene.entities.iter().enumerate() {
            Self::check_entity(index, entity, &mut errors);
        }

        let fence = match scene.bounds {
            Some(limits) if !limits.is_valid() => {
                errors.push(ValidationError::InvalidBounds(limits));
                None
            }
            limits => limits,
        };

        if let Some(spawn) = scene.player_spawn {
            if spawn.iter().any(|c| !c.is_finite()) {
                errors.push(ValidationError::NonFinite {
                    entity: "player_spawn".to_string(),
                    field: "position",
                });
            } else if spawn.iter().any(|c| c.abs() > EXTREME_COORDINATE) {
                errors.push(ValidationError::ExtremeSpawnPosition(spawn));
            }

            if let Some(limits) = fence {
                let outside = spawn[0].abs() > limits.x
                    || spawn[2].abs() > limits.z
                    || spawn[3].abs() > limits.w;
                if outside {
                    errors.push(ValidationError::SpawnOutsideBounds(spawn));
                }
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load a scene and reject it if it has fatal errors
    ///
    /// Non-fatal problems are logged as warnings and the scene is returned.
    pub fn load_checked<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let scene = Scene::load(path)?;
        let (fatal, warnings): (Vec<_>, Vec<_>) =
            Self::validate(&scene).into_iter().partition(ValidationError::is_fatal);

        for warning in &warnings {
            log::warn!("Scene '{}': {}", scene.name, warning);
        }
        if !fatal.is_empty() {
            return Err(SceneError::Invalid(fatal));
        }
        Ok(scene)
    }

    fn check_entity(index: usize, entity: &EntityTemplate, errors: &mut Vec<ValidationError>) {
        let label = match &entity.name {
            Some(name) => format!("'{}'", name),
            None => format!("#{} ({})", index, entity.shape.label()),
        };

        if entity.position.iter().any(|c| !c.is_finite()) {
            errors.push(ValidationError::NonFinite {
                entity: label.clone(),
                field: "position",
            });
        }
        if !entity.w_center.is_finite() {
            errors.push(ValidationError::NonFinite {
                entity: label.clone(),
                field: "w_center",
            });
        }

        if !entity.w_extent.is_finite() {
            errors.push(ValidationError::NonFinite {
                entity: label.clone(),
                field: "w_extent",
            });
        } else if entity.w_extent <= 0.0 {
            errors.push(ValidationError::DegenerateWExtent {
                entity: label.clone(),
                value: entity.w_extent,
            });
        }

        for (field, value) in entity.shape.extents() {
            if !value.is_finite() {
                errors.push(ValidationError::NonFinite {
                    entity: label.clone(),
                    field,
                });
            } else if value <= 0.0 {
                errors.push(ValidationError::NonPositiveExtent {
                    entity: label.clone(),
                    field,
                    value,
                });
            }
        }
    }
}

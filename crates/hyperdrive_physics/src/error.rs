//! Physics error types
//!
//! Nothing in the engine is fatal. The only rejected input is a non-finite
//! number crossing into the integrator, which would otherwise spread NaN
//! through every later tick.

use std::fmt;

/// Error returned by the integrator boundary
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A state or input value was NaN or infinite
    NonFinite {
        /// Which value was rejected (e.g. `"position.w"`)
        field: &'static str,
        /// The offending value
        value: f64,
    },
}

impl PhysicsError {
    /// Return `Err(NonFinite)` when `value` is NaN or infinite
    pub fn check_finite(field: &'static str, value: f64) -> Result<(), PhysicsError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(PhysicsError::NonFinite { field, value })
        }
    }
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::NonFinite { field, value } => {
                write!(f, "Non-finite value for {}: {}", field, value)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite_accepts_numbers() {
        assert!(PhysicsError::check_finite("speed", 1.5).is_ok());
        assert!(PhysicsError::check_finite("speed", -0.0).is_ok());
    }

    #[test]
    fn test_check_finite_rejects_nan_and_infinity() {
        let err = PhysicsError::check_finite("position.x", f64::NAN).unwrap_err();
        assert!(matches!(err, PhysicsError::NonFinite { field: "position.x", .. }));

        let err = PhysicsError::check_finite("speed", f64::INFINITY).unwrap_err();
        assert_eq!(
            err,
            PhysicsError::NonFinite {
                field: "speed",
                value: f64::INFINITY
            }
        );
    }

    #[test]
    fn test_display() {
        let err = PhysicsError::NonFinite {
            field: "speed",
            value: f64::INFINITY,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("speed"));
        assert!(msg.contains("inf"));
    }
}

//! 4D Mathematics Library
//!
//! This crate provides the 4D point type and the camera-space transforms used
//! by the Hyperdrive engine.
//!
//! ## Core Types
//!
//! - [`Point4D`] - position or displacement with x, y, z, w components
//! - [`Point3D`] - projected position
//! - [`CameraOrientation`] - the viewer's XW/ZW look angles
//! - [`Pose3D`] - projected position, scale and opacity for rendering
//!
//! ## Transforms
//!
//! - [`rotate`] / [`unrotate`] - XW then ZW planar rotation and its inverse
//! - [`project`] - perspective divide along W

mod point4;
pub mod projection;

pub use point4::{Point3D, Point4D};
pub use projection::{
    project, projection_scale, rotate, rotate_plane, unrotate, CameraOrientation, Pose3D,
    WPlane, W_DIST, W_PERSPECTIVE,
};

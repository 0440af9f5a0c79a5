//! Planar W rotations and 4D → 3D perspective projection
//!
//! The viewer's 4D orientation is two angles, one in the XW plane and one in
//! the ZW plane. They are applied as successive planar rotations (XW first,
//! then ZW using the W produced by the first step), so the two angles are not
//! independent and the order is part of the contract.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Point3D, Point4D};

/// Distance of the projection centre along W
pub const W_DIST: f64 = 5.0;

/// How strongly W depth shrinks or grows the projected point
pub const W_PERSPECTIVE: f64 = 0.05;

/// The rotation planes that involve the W axis and are driven by the camera
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WPlane {
    /// XW plane - mixes the lateral axis into W
    XW,
    /// ZW plane - mixes the depth axis into W
    ZW,
}

/// Rotate a point in a single W plane
#[inline]
pub fn rotate_plane(p: Point4D, plane: WPlane, angle: f64) -> Point4D {
    let (s, c) = angle.sin_cos();
    match plane {
        WPlane::XW => Point4D::new(p.x * c - p.w * s, p.y, p.z, p.x * s + p.w * c),
        WPlane::ZW => Point4D::new(p.x, p.y, p.z * c - p.w * s, p.z * s + p.w * c),
    }
}

/// Apply the camera rotation: XW by `rot_xw`, then ZW by `rot_zw`
#[inline]
pub fn rotate(p: Point4D, rot_xw: f64, rot_zw: f64) -> Point4D {
    let p = rotate_plane(p, WPlane::XW, rot_xw);
    rotate_plane(p, WPlane::ZW, rot_zw)
}

/// Exact inverse of [`rotate`]: undoes ZW first, then XW
#[inline]
pub fn unrotate(p: Point4D, rot_xw: f64, rot_zw: f64) -> Point4D {
    let p = rotate_plane(p, WPlane::ZW, -rot_zw);
    rotate_plane(p, WPlane::XW, -rot_xw)
}

/// Perspective factor for a point at depth `w`
#[inline]
pub fn projection_scale(w: f64) -> f64 {
    W_DIST / (W_DIST + w * W_PERSPECTIVE)
}

/// Perspective-divide a 4D point down to 3D
#[inline]
pub fn project(p: Point4D) -> Point3D {
    let scale = projection_scale(p.w);
    Point3D::new(p.x * scale, p.y * scale, p.z * scale)
}

/// The viewer's 4D look angles
///
/// Separate from the car's own W heading: turning the camera never steers
/// the car and steering the car never turns the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraOrientation {
    /// Rotation in the XW plane (radians)
    pub rot_xw: f64,
    /// Rotation in the ZW plane (radians)
    pub rot_zw: f64,
}

impl CameraOrientation {
    pub fn new(rot_xw: f64, rot_zw: f64) -> Self {
        Self { rot_xw, rot_zw }
    }

    /// Accumulate view-rotation deltas
    pub fn apply_delta(&mut self, d_xw: f64, d_zw: f64) {
        self.rot_xw += d_xw;
        self.rot_zw += d_zw;
    }

    /// Rotate a point into camera space
    #[inline]
    pub fn rotate(&self, p: Point4D) -> Point4D {
        rotate(p, self.rot_xw, self.rot_zw)
    }

    /// Rotate then project a point
    #[inline]
    pub fn project(&self, p: Point4D) -> Point3D {
        project(self.rotate(p))
    }
}

/// A projected pose handed to the rendering collaborator
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pose3D {
    /// Projected 3D position
    pub position: [f64; 3],
    /// Uniform size factor (perspective × cross-section)
    pub scale: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
}

impl Pose3D {
    /// Pose of something fully hidden at the given position
    pub fn hidden(position: Point3D) -> Self {
        Self {
            position: position.to_array(),
            scale: 0.0,
            opacity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f64 = 1e-9;

    fn approx(a: Point4D, b: Point4D) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_zero_angles_identity() {
        let p = Point4D::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rotate(p, 0.0, 0.0), p);
    }

    #[test]
    fn test_xw_quarter_turn() {
        let p = Point4D::new(1.0, 0.0, 0.0, 0.0);
        let r = rotate(p, FRAC_PI_2, 0.0);
        assert!(approx(r, Point4D::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_zw_uses_rotated_w() {
        // XW moves x into w, then ZW moves that w into -z
        let p = Point4D::new(1.0, 0.0, 0.0, 0.0);
        let r = rotate(p, FRAC_PI_2, FRAC_PI_2);
        assert!(approx(r, Point4D::new(0.0, 0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_order_matters() {
        let p = Point4D::new(1.0, 0.0, 0.0, 0.0);
        let xw_then_zw = rotate(p, FRAC_PI_2, FRAC_PI_2);
        let zw_then_xw = rotate_plane(
            rotate_plane(p, WPlane::ZW, FRAC_PI_2),
            WPlane::XW,
            FRAC_PI_2,
        );
        assert!(!approx(xw_then_zw, zw_then_xw));
    }

    #[test]
    fn test_y_is_untouched() {
        let p = Point4D::new(1.0, 7.5, -2.0, 3.0);
        assert_eq!(rotate(p, 0.7, -1.3).y, 7.5);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let p = Point4D::new(1.0, 2.0, 3.0, 4.0);
        let r = rotate(p, 0.3, 1.1);
        assert!((r.length() - p.length()).abs() < EPSILON);
    }

    #[test]
    fn test_single_plane_round_trip_with_negated_angles() {
        let p = Point4D::new(1.0, -2.0, 3.5, 0.25);
        for theta in [0.1, FRAC_PI_4, 2.0, -1.3] {
            assert!(approx(rotate(rotate(p, theta, 0.0), -theta, 0.0), p));
            assert!(approx(rotate(rotate(p, 0.0, theta), 0.0, -theta), p));
        }
    }

    #[test]
    fn test_unrotate_round_trip() {
        let p = Point4D::new(1.0, -2.0, 3.5, 0.25);
        for (a, b) in [(0.3, 0.9), (-1.2, 2.4), (FRAC_PI_4, -FRAC_PI_4)] {
            assert!(approx(unrotate(rotate(p, a, b), a, b), p));
            assert!(approx(rotate(unrotate(p, a, b), a, b), p));
        }
    }

    #[test]
    fn test_project_at_zero_w() {
        let p = Point4D::new(1.0, 2.0, 3.0, 0.0);
        assert_eq!(project(p), Point3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_project_shrinks_positive_w() {
        // scale = 5 / (5 + 20 * 0.05) = 5 / 6
        let p = Point4D::new(6.0, 6.0, 6.0, 20.0);
        let q = project(p);
        assert!((q.x - 5.0).abs() < EPSILON);
        assert!((q.y - 5.0).abs() < EPSILON);
        assert!((q.z - 5.0).abs() < EPSILON);
        assert!(projection_scale(-20.0) > 1.0);
    }

    #[test]
    fn test_camera_orientation_accumulates() {
        let mut cam = CameraOrientation::default();
        cam.apply_delta(0.1, -0.2);
        cam.apply_delta(0.1, -0.2);
        assert!((cam.rot_xw - 0.2).abs() < EPSILON);
        assert!((cam.rot_zw + 0.4).abs() < EPSILON);

        let p = Point4D::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(cam.project(p), project(rotate(p, cam.rot_xw, cam.rot_zw)));
    }

    #[test]
    fn test_hidden_pose() {
        let pose = Pose3D::hidden(Point3D::new(1.0, 2.0, 3.0));
        assert_eq!(pose.position, [1.0, 2.0, 3.0]);
        assert_eq!(pose.scale, 0.0);
        assert_eq!(pose.opacity, 0.0);
    }
}

//! View anchor: the simulation's read/write boundary with the external camera.
//!
//! The renderer owns the real camera; the simulation only needs its
//! horizontal movement basis (forward/side vectors), its orbit target, and
//! the yaw from the avatar to the camera for facing. The anchor follows the
//! collider's upper endpoint in lock-step, with no smoothing of its own.

use nalgebra as na;
use shared::constants::JOYSTICK_SCALE;
use shared::{Quat, Vec3};

const DIR_EPS: f32 = 1.0e-6;

#[derive(Clone, Debug)]
pub struct ViewAnchor {
    /// Camera world position.
    pub position: na::Point3<f32>,
    /// Orbit target; kept equal to the collider's upper endpoint.
    pub target: na::Point3<f32>,
    /// Camera orientation, updated by the external orbit controls.
    pub rotation: Quat,
}

impl Default for ViewAnchor {
    fn default() -> Self {
        Self {
            position: na::Point3::origin(),
            target: na::Point3::origin(),
            rotation: Quat::identity(),
        }
    }
}

impl ViewAnchor {
    /// Camera forward projected to the horizontal plane, normalized.
    ///
    /// Zero when the camera looks straight up or down; movement simply stalls
    /// for that tick instead of producing non-finite velocity.
    pub fn forward_vector(&self) -> Vec3 {
        let mut dir = self.rotation * Vec3::new(0.0, 0.0, -1.0);
        dir.y = 0.0;
        let norm = dir.norm();
        if norm < DIR_EPS {
            return Vec3::zeros();
        }
        dir / norm
    }

    /// Horizontal side vector (forward × up), pointing to the camera's right.
    pub fn side_vector(&self) -> Vec3 {
        self.forward_vector().cross(&Vec3::y())
    }

    /// Camera-relative world vector for the analog joystick.
    ///
    /// The stick's (x, y) maps to (x, 0, -y) in camera space, is rotated into
    /// the world, flattened, and scaled by the fixed [`JOYSTICK_SCALE`]. Not
    /// normalized and not dt-scaled; the analog path feeds velocity directly.
    pub fn joystick_world_vector(&self, joystick: na::Vector2<f32>) -> Vec3 {
        let mut dir = self.rotation * Vec3::new(joystick.x, 0.0, -joystick.y);
        dir.y = 0.0;
        dir * JOYSTICK_SCALE
    }

    /// Shift the camera so it tracks `new_target` rigidly (no smoothing on the
    /// local player's own view).
    pub fn follow(&mut self, new_target: na::Point3<f32>) {
        let delta = new_target - self.target;
        self.position += delta;
        self.target = new_target;
    }

    /// Yaw angle from `point` toward the camera, about +Y.
    pub fn angle_from(&self, point: na::Point3<f32>) -> f32 {
        (self.position.x - point.x).atan2(self.position.z - point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_rotation_faces_negative_z() {
        let anchor = ViewAnchor::default();
        let fwd = anchor.forward_vector();
        assert!((fwd - Vec3::new(0.0, 0.0, -1.0)).norm() < 1.0e-6);

        // forward × up points to the camera's right (+X when facing -Z).
        let side = anchor.side_vector();
        assert!((side - Vec3::new(1.0, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn forward_is_flattened_and_renormalized() {
        let mut anchor = ViewAnchor::default();
        // Pitch the camera 45° down; the horizontal projection must stay unit length.
        anchor.rotation = Quat::from_axis_angle(&Vec3::x_axis(), -0.78);
        let fwd = anchor.forward_vector();
        assert!(fwd.y.abs() < 1.0e-6);
        assert!((fwd.norm() - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn straight_down_camera_yields_zero_forward() {
        let mut anchor = ViewAnchor::default();
        anchor.rotation = Quat::from_axis_angle(&Vec3::x_axis(), -FRAC_PI_2);
        assert_eq!(anchor.forward_vector(), Vec3::zeros());
    }

    #[test]
    fn follow_keeps_camera_offset_rigid() {
        let mut anchor = ViewAnchor::default();
        anchor.position = na::Point3::new(0.0, 2.0, 5.0);
        anchor.follow(na::Point3::new(3.0, 1.0, 0.0));
        assert_eq!(anchor.position, na::Point3::new(3.0, 3.0, 5.0));
        assert_eq!(anchor.target, na::Point3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn joystick_vector_uses_fixed_scale() {
        let anchor = ViewAnchor::default();
        // Full forward deflection maps to camera-forward scaled by 1.5.
        let v = anchor.joystick_world_vector(na::Vector2::new(0.0, 1.0));
        assert!((v - Vec3::new(0.0, 0.0, -JOYSTICK_SCALE)).norm() < 1.0e-6);
    }
}

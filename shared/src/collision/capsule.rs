use nalgebra as na;

use super::types::Vec3;

/// A swept-sphere character collider: two endpoints plus a radius.
///
/// `start` is the lower endpoint and `end` the upper one; both are sphere
/// centers, so the collider's total height is `end.y - start.y + 2 * radius`.
/// Translation moves both endpoints together, which keeps the endpoint
/// spacing (the configured player height) invariant.
#[derive(Clone, Copy, Debug)]
pub struct Capsule {
    pub start: na::Point3<f32>,
    pub end: na::Point3<f32>,
    pub radius: f32,
}

impl Capsule {
    #[inline]
    pub fn new(start: na::Point3<f32>, end: na::Point3<f32>, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Build a vertical capsule whose lower endpoint sits at `feet`.
    #[inline]
    pub fn from_feet(feet: na::Point3<f32>, height: f32, radius: f32) -> Self {
        let mut end = feet;
        end.y += height;
        Self::new(feet, end, radius)
    }

    /// Move both endpoints by `delta`.
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.start += delta;
        self.end += delta;
    }

    /// Place the lower endpoint at `feet`, preserving the endpoint spacing.
    #[inline]
    pub fn set_feet(&mut self, feet: na::Point3<f32>) {
        let height = self.end.y - self.start.y;
        self.start = feet;
        self.end = feet;
        self.end.y += height;
    }

    /// Midpoint of the segment (the capsule's center).
    #[inline]
    pub fn center(&self) -> na::Point3<f32> {
        na::center(&self.start, &self.end)
    }

    /// Distance between the two endpoints.
    #[inline]
    pub fn height(&self) -> f32 {
        (self.end - self.start).norm()
    }
}

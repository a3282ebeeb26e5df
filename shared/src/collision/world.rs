use nalgebra as na;
use parry3d::{query, shape as pshape};

use super::capsule::Capsule;
use super::types::{Contact, Iso, StaticShape, Vec3};

/// The single operation the simulation needs from the level's collision
/// structure: intersect a capsule, get the contacted surface's normal and
/// penetration depth, or `None` when the capsule is free.
///
/// "No contact" is a normal control-flow branch (airborne), not an error.
pub trait CollisionQuery {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;
}

/// A static spatial structure built once from level geometry.
///
/// Shapes never move after construction; the world is shared read-only by
/// the frame tick. The query reports the deepest penetration across all
/// shapes so one push-out resolves the worst overlap first.
#[derive(Clone, Debug, Default)]
pub struct StaticWorld {
    shapes: Vec<StaticShape>,
}

impl StaticWorld {
    #[inline]
    pub fn new(shapes: Vec<StaticShape>) -> Self {
        Self { shapes }
    }

    #[inline]
    pub fn push(&mut self, shape: StaticShape) {
        self.shapes.push(shape);
    }

    #[inline]
    pub fn shapes(&self) -> &[StaticShape] {
        &self.shapes
    }
}

impl CollisionQuery for StaticWorld {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let capsule_shape = pshape::Capsule::new(capsule.start, capsule.end, capsule.radius);
        let capsule_iso = Iso::identity();

        let mut best: Option<Contact> = None;
        for shape in &self.shapes {
            if let Some(contact) = contact_capsule_against_static(&capsule_iso, &capsule_shape, shape)
            {
                if best.as_ref().is_none_or(|b| contact.depth > b.depth) {
                    best = Some(contact);
                }
            }
        }
        best
    }
}

/// Test a world-space capsule against a single static shape and return the
/// penetration contact, if any.
///
/// The returned normal is the one on the static surface (pointing toward the
/// capsule), so `capsule.translate(normal * depth)` depenetrates.
fn contact_capsule_against_static(
    capsule_iso: &Iso,
    capsule: &pshape::Capsule,
    shape: &StaticShape,
) -> Option<Contact> {
    match *shape {
        StaticShape::Plane { normal, dist } => {
            // Plane equation in world space: normal ⋅ x = dist.
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace { normal: unit_n };
            let anchor = normal * dist;
            let plane_iso = Iso::from_parts(
                na::Translation3::new(anchor.x, anchor.y, anchor.z),
                na::UnitQuaternion::identity(),
            );
            penetration_contact(capsule_iso, capsule, &plane_iso, &plane)
        }
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            penetration_contact(capsule_iso, capsule, &transform.iso(), &cuboid)
        }
        StaticShape::Sphere { radius, transform } => {
            let ball = pshape::Ball::new(radius);
            penetration_contact(capsule_iso, capsule, &transform.iso(), &ball)
        }
    }
}

fn penetration_contact(
    capsule_iso: &Iso,
    capsule: &pshape::Capsule,
    shape_iso: &Iso,
    shape: &dyn pshape::Shape,
) -> Option<Contact> {
    // Zero prediction: only actual overlap counts as contact.
    let contact = query::contact(
        capsule_iso,
        capsule as &dyn pshape::Shape,
        shape_iso,
        shape,
        0.0,
    )
    .ok()??;

    if contact.dist >= 0.0 {
        return None;
    }

    // `normal2` is the outward normal on the static shape, which is exactly
    // the push-out direction for the capsule.
    let normal = Vec3::new(
        contact.normal2.into_inner().x,
        contact.normal2.into_inner().y,
        contact.normal2.into_inner().z,
    );

    Some(Contact {
        normal,
        depth: -contact.dist,
    })
}

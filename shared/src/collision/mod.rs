/*!
Capsule-vs-static-world collision queries.

The simulation consumes the level's collision structure through a single
operation: intersect a capsule with the static geometry and report the
nearest-surface normal plus penetration depth, or "no contact". Everything
else (broad-phase layout, shape storage) is an implementation detail of
[`StaticWorld`].
*/

mod capsule;
mod types;
mod world;

pub use capsule::Capsule;
pub use types::{Contact, Iso, Quat, StaticShape, Transform, Vec3};
pub use world::{CollisionQuery, StaticWorld};

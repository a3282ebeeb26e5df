pub mod collision;
pub mod constants;
pub mod wire;

pub use collision::{
    Capsule, CollisionQuery, Contact, Iso, Quat, StaticShape, StaticWorld, Transform, Vec3,
};
pub use wire::{ClientMessage, PlayerRecord, ServerMessage, StateUpdate};

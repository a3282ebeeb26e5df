//! Local player state and per-tick simulation.

use nalgebra as na;
use shared::constants::{AVATAR_Y_OFFSET, PLAYER_HEIGHT, PLAYER_RADIUS};
use shared::{Capsule, Quat, Vec3};

mod animation;
mod controller;

pub use animation::{Animation, direction_offset, resolve, rotate_towards};
pub use controller::LocalMotionController;

/// Where (and how) the player re-enters the world after falling out of it.
#[derive(Clone, Copy, Debug)]
pub struct SpawnPoint {
    pub position: na::Point3<f32>,
    pub rotation: Quat,
    pub velocity: Vec3,
}

impl SpawnPoint {
    pub fn at(position: na::Point3<f32>) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            velocity: Vec3::zeros(),
        }
    }
}

impl Default for SpawnPoint {
    fn default() -> Self {
        let [x, y, z] = shared::constants::RESPAWN_POSITION;
        Self::at(na::Point3::new(x, y, z))
    }
}

/// The one locally simulated character. Created at session start, mutated
/// every tick by [`LocalMotionController`], never destroyed mid-session.
#[derive(Clone, Debug)]
pub struct LocalPlayer {
    pub collider: Capsule,
    pub velocity: Vec3,
    pub on_floor: bool,
    pub animation: Animation,
    /// Facing-angle correction derived from the held movement directions.
    pub direction_offset: f32,
    /// Smoothed facing orientation of the avatar body.
    pub facing: Quat,
    pub avatar_skin: Option<String>,
    pub spawn: SpawnPoint,
    /// Set on the rising edge of the jump action while on the floor; cleared
    /// on the next floor tick. Prevents re-triggering while jump stays held.
    pub jump_latch: bool,
    pub(crate) jump_was_held: bool,
}

impl LocalPlayer {
    pub fn new(spawn: SpawnPoint) -> Self {
        Self {
            collider: Capsule::from_feet(spawn.position, PLAYER_HEIGHT, PLAYER_RADIUS),
            velocity: spawn.velocity,
            on_floor: false,
            animation: Animation::Idle,
            direction_offset: 0.0,
            facing: spawn.rotation,
            avatar_skin: None,
            spawn,
            jump_latch: false,
            jump_was_held: false,
        }
    }

    /// The point the camera anchors to: the collider's upper endpoint.
    #[inline]
    pub fn view_point(&self) -> na::Point3<f32> {
        self.collider.end
    }

    /// Where the avatar model's origin sits, below the collider's upper
    /// endpoint by the fixed visual offset.
    #[inline]
    pub fn avatar_position(&self) -> na::Point3<f32> {
        let mut position = self.collider.end;
        position.y -= AVATAR_Y_OFFSET;
        position
    }

    /// Hard recovery after falling out of the world: teleport to the spawn
    /// point and reset velocity. Not an error path.
    pub fn respawn(&mut self) {
        self.collider.set_feet(self.spawn.position);
        self.velocity = self.spawn.velocity;
    }
}

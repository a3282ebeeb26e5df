//! Per-tick integration of the local player.
//!
//! `advance` mutates the player in place and never fails: damping keeps the
//! velocity bounded, collisions are resolved by push-out, and falling below
//! the world limit teleports the player back to its spawn point.

use log::warn;
use shared::CollisionQuery;
use shared::constants::{
    AIR_DAMPING_FACTOR, AIR_SPEED_FACTOR, DAMPING_RATE, FALL_LIMIT_Y, FLOOR_SPEED_FACTOR, GRAVITY,
    JUMP_GRAVITY_FACTOR, JUMP_SPEED, RUN_MULTIPLIER, SPEED_MULTIPLIER,
};

use super::{Animation, LocalPlayer};
use crate::camera::ViewAnchor;
use crate::input::InputState;

/// Tuning for the local motion integration. The defaults are the live game
/// values; tests occasionally override them.
#[derive(Clone, Copy, Debug)]
pub struct LocalMotionController {
    pub gravity: f32,
    pub speed_multiplier: f32,
    pub jump_speed: f32,
}

impl Default for LocalMotionController {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            speed_multiplier: SPEED_MULTIPLIER,
            jump_speed: JUMP_SPEED,
        }
    }
}

impl LocalMotionController {
    /// Advance the local player by one tick.
    ///
    /// Order per tick: jump-edge latch, velocity accumulation (digital input
    /// dt-scaled, analog joystick at fixed scale), jump launch, gravity and
    /// damping, integration, collision push-out, camera follow, fall-through
    /// recovery.
    pub fn advance(
        &self,
        player: &mut LocalPlayer,
        dt: f32,
        input: &InputState,
        view: &mut ViewAnchor,
        world: &dyn CollisionQuery,
    ) {
        // Jump triggers once per floor-contact edge. The latch arms on the
        // rising edge of the action while supported, and the label flips to
        // jumping immediately (the physics below reads it for reduced
        // gravity on the way up).
        if input.jump && !player.jump_was_held && player.on_floor {
            player.jump_latch = true;
            player.animation = Animation::Jumping;
        }
        player.jump_was_held = input.jump;

        let base_speed = if player.on_floor {
            FLOOR_SPEED_FACTOR
        } else {
            AIR_SPEED_FACTOR
        } * self.gravity
            * self.speed_multiplier;
        let mut speed_delta = dt * base_speed;

        // Analog path: camera-relative, fixed scale, not dt-scaled.
        if input.joystick_active() {
            player.velocity += view.joystick_world_vector(input.joystick());
        }

        if input.run {
            speed_delta *= RUN_MULTIPLIER;
        }

        if input.forward {
            player.velocity += view.forward_vector() * speed_delta;
        }
        if input.backward {
            player.velocity += view.forward_vector() * -speed_delta;
        }
        if input.left {
            player.velocity += view.side_vector() * -speed_delta;
        }
        if input.right {
            player.velocity += view.side_vector() * speed_delta;
        }

        if player.on_floor {
            if input.jump && player.jump_latch {
                player.velocity.y = self.jump_speed;
            }
            player.jump_latch = false;
        }

        let mut damping = (-DAMPING_RATE * dt).exp() - 1.0;

        if !player.on_floor {
            let gravity = if player.animation == Animation::Jumping {
                self.gravity * JUMP_GRAVITY_FACTOR
            } else {
                self.gravity
            };
            player.velocity.y -= gravity * dt;
            damping *= AIR_DAMPING_FACTOR;
        }

        player.velocity += player.velocity * damping;

        player.collider.translate(player.velocity * dt);
        resolve_collisions(player, world);

        // The camera anchor tracks the collider's upper endpoint rigidly.
        view.follow(player.collider.end);

        if player.collider.end.y < FALL_LIMIT_Y {
            warn!(
                "player fell out of the world at y = {:.1}, respawning",
                player.collider.end.y
            );
            player.respawn();
        }
    }
}

/// Query the static world and push the capsule out of any penetration.
/// Floor support requires an upward-facing contact normal.
fn resolve_collisions(player: &mut LocalPlayer, world: &dyn CollisionQuery) {
    player.on_floor = false;

    if let Some(contact) = world.capsule_intersect(&player.collider) {
        player.on_floor = contact.normal.y > 0.0;
        player.collider.translate(contact.normal * contact.depth);
    }
}

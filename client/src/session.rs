//! Per-frame session driver.
//!
//! Owns the full client-side state and fixes the per-tick ordering: motion
//! integration, facing, animation resolution, local avatar pose write, remote
//! store smoothing, outbound emission. Device and network events are applied
//! between ticks through [`Session::input_mut`] and [`Session::handle_message`];
//! nothing here runs in parallel with the tick.

use std::time::Instant;

use nalgebra as na;
use shared::constants::FACING_MAX_STEP;
use shared::{CollisionQuery, Quat, ServerMessage, StateUpdate};

use crate::camera::ViewAnchor;
use crate::input::InputState;
use crate::net::{LocalEvent, NetError, SyncBridge, Transport};
use crate::player::{
    self, Animation, LocalMotionController, LocalPlayer, SpawnPoint, rotate_towards,
};
use crate::remote::RemoteCharacterStore;
use crate::scene::{AvatarVisual, SceneBackend};

/// One connected client: the local player, everything mirrored from the
/// server, and the sync protocol state.
pub struct Session {
    input: InputState,
    view: ViewAnchor,
    player: LocalPlayer,
    controller: LocalMotionController,
    store: RemoteCharacterStore,
    bridge: SyncBridge,
    avatar: Option<AvatarVisual>,
    /// Clip last handed to the backend for the local avatar.
    played: Animation,
}

impl Session {
    pub fn new(local_id: impl Into<String>, spawn: SpawnPoint) -> Self {
        Self {
            input: InputState::new(),
            view: ViewAnchor::default(),
            player: LocalPlayer::new(spawn),
            controller: LocalMotionController::default(),
            store: RemoteCharacterStore::new(),
            bridge: SyncBridge::new(local_id),
            avatar: None,
            played: Animation::Idle,
        }
    }

    #[inline]
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut ViewAnchor {
        &mut self.view
    }

    #[inline]
    pub fn player(&self) -> &LocalPlayer {
        &self.player
    }

    #[inline]
    pub fn remotes(&self) -> &RemoteCharacterStore {
        &self.store
    }

    #[inline]
    pub fn avatar(&self) -> Option<&AvatarVisual> {
        self.avatar.as_ref()
    }

    /// Start (or restart) the sync handshake on a live transport.
    pub fn register(&mut self, transport: &mut dyn Transport) -> Result<(), NetError> {
        self.bridge.register(transport)
    }

    /// The transport dropped; emission pauses until the next `register`.
    pub fn on_disconnect(&mut self) {
        self.bridge.on_disconnect();
    }

    /// Apply one inbound server message. Remote snapshots and removals are
    /// folded into the store; the local skin assignment creates the local
    /// avatar visual (once).
    pub fn handle_message(&mut self, message: ServerMessage, backend: &mut dyn SceneBackend) {
        if let Some(LocalEvent::AvatarSkinAssigned(skin)) =
            self.bridge.handle_message(message, &mut self.store, backend)
        {
            self.assign_avatar_skin(skin, backend);
        }
    }

    fn assign_avatar_skin(&mut self, skin: String, backend: &mut dyn SceneBackend) {
        if self.avatar.is_none() {
            let visual = backend.spawn_avatar(&skin, None);
            backend.play_animation(visual.node, self.player.animation);
            self.played = self.player.animation;
            self.avatar = Some(visual);
        }
        self.player.avatar_skin = Some(skin);
    }

    /// Advance the whole session by one frame.
    ///
    /// `now` drives the outbound pacer; `dt` drives the simulation. The only
    /// fallible step is the final emission, and a transport error leaves the
    /// simulated state fully advanced.
    pub fn update(
        &mut self,
        dt: f32,
        now: Instant,
        world: &dyn CollisionQuery,
        backend: &mut dyn SceneBackend,
        transport: &mut dyn Transport,
    ) -> Result<(), NetError> {
        self.controller
            .advance(&mut self.player, dt, &self.input, &mut self.view, world);

        // Held directions refresh the facing correction; releasing every key
        // keeps the last one so the avatar doesn't snap back.
        if let Some(offset) = player::direction_offset(&self.input) {
            self.player.direction_offset = offset;
        }

        let animation = player::resolve(
            &self.input,
            self.player.on_floor,
            self.player.animation,
            self.player.jump_latch,
        );
        self.player.animation = animation;

        // The body turns toward the camera yaw plus the direction correction,
        // a bounded step per tick, and only while actually moving.
        if animation != Animation::Idle && animation != Animation::Dancing {
            let yaw = self.view.angle_from(self.player.avatar_position())
                + self.player.direction_offset;
            let target = Quat::from_axis_angle(&na::Vector3::y_axis(), yaw);
            self.player.facing = rotate_towards(self.player.facing, target, FACING_MAX_STEP);
        }

        if let Some(avatar) = &self.avatar {
            if animation != self.played {
                backend.play_animation(avatar.node, animation);
                self.played = animation;
            }
            backend.set_node_pose(avatar.node, self.player.avatar_position(), self.player.facing);
            backend.advance_animation(avatar.node, dt);
        }

        self.store.advance(dt, backend);

        // No emission until the server has assigned a skin; the update
        // message carries it.
        if let Some(skin) = &self.player.avatar_skin {
            let player = &self.player;
            self.bridge.poll_emit(now, transport, || {
                StateUpdate::new(
                    player.avatar_position(),
                    player.facing,
                    player.animation.as_str(),
                    skin,
                )
            })?;
        }
        Ok(())
    }
}

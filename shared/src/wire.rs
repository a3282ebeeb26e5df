//! Wire schema for the multiplayer sync channel.
//!
//! Inbound: the server periodically broadcasts one [`PlayerRecord`] per
//! connected player, plus explicit removal notifications. Outbound: the
//! client registers once per connection, then emits [`StateUpdate`]s on a
//! fixed wall-clock period. Field names follow the authoritative server's
//! flat snapshot layout.

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::collision::Quat;

/// One authoritative snapshot record for a player, as broadcast by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "avatarSkin")]
    pub avatar_skin: String,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub quaternion_x: f32,
    pub quaternion_y: f32,
    pub quaternion_z: f32,
    pub quaternion_w: f32,
    pub animation: String,
}

impl PlayerRecord {
    #[inline]
    pub fn position(&self) -> na::Point3<f32> {
        na::Point3::new(self.position_x, self.position_y, self.position_z)
    }

    #[inline]
    pub fn quaternion(&self) -> Quat {
        quat_from_xyzw(
            self.quaternion_x,
            self.quaternion_y,
            self.quaternion_z,
            self.quaternion_w,
        )
    }
}

/// Outbound local-state emission (fixed 20 ms period).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub position: [f32; 3],
    /// Quaternion as (x, y, z, w).
    pub quaternion: [f32; 4],
    pub animation: String,
    #[serde(rename = "avatarSkin")]
    pub avatar_skin: String,
}

impl StateUpdate {
    pub fn new(position: na::Point3<f32>, rotation: Quat, animation: &str, skin: &str) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            quaternion: [rotation.i, rotation.j, rotation.k, rotation.w],
            animation: animation.to_owned(),
            avatar_skin: skin.to_owned(),
        }
    }
}

/// Messages emitted by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// Registration handshake, sent on connect (and re-sent on reconnect)
    /// before any state emission begins.
    Register,
    /// Periodic local-state snapshot.
    UpdatePlayer(StateUpdate),
}

/// Messages received from the authoritative server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    /// Periodic broadcast of every connected player, the local one included.
    PlayerData(Vec<PlayerRecord>),
    /// Avatar-skin assignment completing a player's registration.
    SetAvatarSkin {
        id: String,
        #[serde(rename = "avatarSkin")]
        avatar_skin: String,
    },
    /// A player left; release its visuals and drop it.
    RemovePlayer { id: String },
}

/// Build a unit quaternion from wire-order (x, y, z, w) components.
#[inline]
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    Quat::new_normalize(na::Quaternion::new(w, x, y, z))
}

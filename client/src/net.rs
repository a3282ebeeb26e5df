//! Network sync bridge: registration, outbound pacing, inbound dispatch.
//!
//! The transport itself (socket, reconnect machinery) is external. This
//! module owns the protocol ordering around it: register once per
//! connection before any state emission, emit the local state on a fixed
//! wall-clock period decoupled from the frame rate, and fold inbound
//! snapshots into the remote store with self-filtering.

use std::time::Instant;

use log::{debug, info};
use shared::constants::STATE_EMIT_PERIOD;
use shared::{ClientMessage, ServerMessage, StateUpdate};
use thiserror::Error;

use crate::remote::RemoteCharacterStore;
use crate::scene::SceneBackend;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("transport is not connected")]
    NotConnected,
    #[error("transport closed: {0}")]
    Closed(String),
}

/// Outbound half of the sync channel, provided by the host application.
pub trait Transport {
    fn send(&mut self, message: &ClientMessage) -> Result<(), NetError>;
    fn is_connected(&self) -> bool;
}

/// Inbound events the session itself must act on (everything else is folded
/// straight into the remote store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalEvent {
    /// The server assigned this client its avatar skin.
    AvatarSkinAssigned(String),
}

/// Protocol state for one client connection.
#[derive(Debug)]
pub struct SyncBridge {
    local_id: String,
    registered: bool,
    last_emit: Option<Instant>,
}

impl SyncBridge {
    pub fn new(local_id: impl Into<String>) -> Self {
        Self {
            local_id: local_id.into(),
            registered: false,
            last_emit: None,
        }
    }

    #[inline]
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Send the registration handshake. Idempotent per connection: repeated
    /// calls while registered do nothing.
    pub fn register(&mut self, transport: &mut dyn Transport) -> Result<(), NetError> {
        if self.registered {
            return Ok(());
        }
        if !transport.is_connected() {
            return Err(NetError::NotConnected);
        }
        transport.send(&ClientMessage::Register)?;
        self.registered = true;
        info!("registered local player {:?}", self.local_id);
        Ok(())
    }

    /// The connection dropped. Local simulation continues unaffected; the
    /// handshake will be re-issued by the next `register` call so the server
    /// can resume associating this client's state.
    pub fn on_disconnect(&mut self) {
        self.registered = false;
        self.last_emit = None;
    }

    /// Emit the local state if the fixed wall-clock period has elapsed.
    ///
    /// `update` is only invoked when an emission is actually due. Returns
    /// whether a message was sent. Never emits before registration.
    pub fn poll_emit(
        &mut self,
        now: Instant,
        transport: &mut dyn Transport,
        update: impl FnOnce() -> StateUpdate,
    ) -> Result<bool, NetError> {
        if !self.registered {
            return Ok(false);
        }
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < STATE_EMIT_PERIOD {
                return Ok(false);
            }
        }
        transport.send(&ClientMessage::UpdatePlayer(update()))?;
        self.last_emit = Some(now);
        Ok(true)
    }

    /// Fold one inbound message into the store. The local id never becomes a
    /// remote entry. Returns an event when the session must react itself.
    pub fn handle_message(
        &mut self,
        message: ServerMessage,
        store: &mut RemoteCharacterStore,
        backend: &mut dyn SceneBackend,
    ) -> Option<LocalEvent> {
        match message {
            ServerMessage::PlayerData(records) => {
                for record in &records {
                    if record.id == self.local_id {
                        continue;
                    }
                    store.apply_snapshot(backend, record);
                }
                None
            }
            ServerMessage::SetAvatarSkin { id, avatar_skin } => {
                if id == self.local_id {
                    Some(LocalEvent::AvatarSkinAssigned(avatar_skin))
                } else {
                    debug!("ignoring avatar skin assignment for {id:?}");
                    None
                }
            }
            ServerMessage::RemovePlayer { id } => {
                store.remove(backend, &id);
                None
            }
        }
    }
}

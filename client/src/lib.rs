/*!
Client-side player simulation and multiplayer state reconciliation.

Per-frame control flow:
- device events have already mutated [`input::InputState`];
- the [`player::LocalMotionController`] integrates the local player and
  resolves collisions against the level's [`shared::CollisionQuery`];
- the animation resolver derives the next discrete label from the held input;
- the [`remote::RemoteCharacterStore`] advances every remote entry toward its
  latest authoritative snapshot;
- visual transforms are written out through the [`scene::SceneBackend`].

Network snapshot ingestion and outbound emission run on their own event path
(see [`net`]); they interleave with the frame tick but never run in parallel
with it.
*/

pub mod camera;
pub mod input;
pub mod net;
pub mod player;
pub mod remote;
pub mod resources;
pub mod scene;
pub mod session;

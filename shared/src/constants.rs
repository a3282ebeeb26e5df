use std::time::Duration;

/// Gravity magnitude in world units per second squared (positive value).
/// Applied as a downward acceleration while airborne only.
pub const GRAVITY: f32 = 60.0;

/// Global scale applied to all digital movement speeds.
pub const SPEED_MULTIPLIER: f32 = 0.35;

/// Base-speed factor while supported by the floor.
pub const FLOOR_SPEED_FACTOR: f32 = 1.75;

/// Base-speed factor while airborne. Deliberately small: air control is weak.
pub const AIR_SPEED_FACTOR: f32 = 0.1;

/// Multiplier applied to the dt-scaled speed delta while the run action is held.
pub const RUN_MULTIPLIER: f32 = 2.5;

/// Fixed scale applied to the camera-relative joystick vector.
///
/// The analog path is added to velocity at this scale once per tick without
/// dt scaling, unlike the digital path. Preserved as-is; see the controller
/// tests for the observable consequence.
pub const JOYSTICK_SCALE: f32 = 1.5;

/// Vertical launch speed set on a jump trigger (units per second).
pub const JUMP_SPEED: f32 = 12.0;

/// Exponential damping rate: velocity is scaled by `1 + (e^(-RATE*dt) - 1)`
/// each tick.
pub const DAMPING_RATE: f32 = 15.0;

/// Multiplier on the damping delta while airborne (weaker damping in the air).
pub const AIR_DAMPING_FACTOR: f32 = 0.1;

/// Gravity multiplier applied while the animation label is "jumping".
pub const JUMP_GRAVITY_FACTOR: f32 = 0.7;

/// Distance between the capsule collider's endpoints (meters).
pub const PLAYER_HEIGHT: f32 = 1.2;

/// Radius of the player capsule collider (meters).
pub const PLAYER_RADIUS: f32 = 0.35;

/// World-space Y below which the player is considered fallen out of the level.
pub const FALL_LIMIT_Y: f32 = -20.0;

/// Respawn point for the capsule's lower endpoint after a fall-through.
pub const RESPAWN_POSITION: [f32; 3] = [-22.4437, 13.0, -15.0529];

/// Convergence rate for remote-player smoothing: per-tick interpolation factor
/// is `min(1, dt * REMOTE_LERP_RATE)`.
pub const REMOTE_LERP_RATE: f32 = 10.0;

/// Height of the nametag above a remote player's displayed position (meters).
pub const NAMETAG_HEIGHT: f32 = 2.1;

/// Vertical offset from the capsule's upper endpoint down to the avatar
/// model's origin (meters).
pub const AVATAR_Y_OFFSET: f32 = 1.56;

/// Maximum facing-rotation step per tick (radians). The avatar turns toward
/// its travel direction by at most this much each frame.
pub const FACING_MAX_STEP: f32 = 0.15;

/// Wall-clock period between outbound local-state emissions.
pub const STATE_EMIT_PERIOD: Duration = Duration::from_millis(20);

/// Maximum number of characters kept from a remote player's display name.
pub const NAME_MAX_CHARS: usize = 25;

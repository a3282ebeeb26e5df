//! Discrete animation classification and facing.
//!
//! [`resolve`] is a pure priority table over the held input, the floor flag,
//! the previous label, and the jump latch. The direction-combination rules
//! are intentionally asymmetric (three-key chords resolve differently from
//! their mirror images) and are spelled out exhaustively rather than derived.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use log::warn;
use shared::Quat;

use crate::input::InputState;

/// The closed set of animation labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Animation {
    #[default]
    Idle,
    Walking,
    Running,
    Jumping,
    Dancing,
}

impl Animation {
    pub fn as_str(self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::Walking => "walking",
            Animation::Running => "running",
            Animation::Jumping => "jumping",
            Animation::Dancing => "dancing",
        }
    }

    /// Parse a wire label. Unknown labels fall back to `Idle` with a warning;
    /// a malformed snapshot never fails the pipeline.
    pub fn from_label(label: &str) -> Animation {
        match label {
            "idle" => Animation::Idle,
            "walking" => Animation::Walking,
            "running" => Animation::Running,
            "jumping" => Animation::Jumping,
            "dancing" => Animation::Dancing,
            other => {
                warn!("unknown animation label {other:?}, falling back to idle");
                Animation::Idle
            }
        }
    }
}

/// Classify the next animation label. Pure: no state beyond the arguments.
///
/// Rule order:
/// 1. a latched jump on the floor wins outright;
/// 2. an in-flight jump is held until floor contact is re-established, at
///    which point the held directions resolve exactly as on the ground;
/// 3. dancing is sticky: it persists until movement, run, or jump input;
/// 4. otherwise the ground decision table applies.
pub fn resolve(
    input: &InputState,
    on_floor: bool,
    previous: Animation,
    jump_latch: bool,
) -> Animation {
    if input.jump && on_floor && jump_latch {
        return Animation::Jumping;
    }

    if previous == Animation::Jumping && (jump_latch || !on_floor) {
        return Animation::Jumping;
    }

    if (input.dance || previous == Animation::Dancing)
        && !input.any_direction()
        && !input.run
        && !input.jump
    {
        return Animation::Dancing;
    }

    ground_state(input)
}

/// Decision table over the 16 direction combinations, with run selecting the
/// moving label. Opposing pairs held alone cancel to idle, as does the full
/// chord; every other combination moves — including the asymmetric three-key
/// chords (forward+left+right moves even though left+right alone cancels).
fn ground_state(input: &InputState) -> Animation {
    let moving = if input.run {
        Animation::Running
    } else {
        Animation::Walking
    };

    match (input.forward, input.backward, input.left, input.right) {
        (false, false, false, false) => Animation::Idle,
        (true, false, false, false) => moving,
        (false, true, false, false) => moving,
        (false, false, true, false) => moving,
        (false, false, false, true) => moving,
        (true, false, true, false) => moving,
        (true, false, false, true) => moving,
        (false, true, true, false) => moving,
        (false, true, false, true) => moving,
        (true, true, false, false) => Animation::Idle,
        (false, false, true, true) => Animation::Idle,
        (true, true, true, false) => moving,
        (true, true, false, true) => moving,
        (true, false, true, true) => moving,
        (false, true, true, true) => moving,
        (true, true, true, true) => Animation::Idle,
    }
}

/// Facing-angle correction for the held direction combination, about +Y.
///
/// Fixed 8-way-plus-diagonal table; the three- and four-key entries replay
/// the original cascade order, so e.g. forward+backward+left lands on -π/2.
/// `None` when no direction is held: the previous offset is kept.
pub fn direction_offset(input: &InputState) -> Option<f32> {
    match (input.forward, input.backward, input.left, input.right) {
        (false, false, false, false) => None,
        (true, false, false, false) => Some(PI),
        (false, true, false, false) => Some(0.0),
        (false, false, true, false) => Some(-FRAC_PI_2),
        (false, false, false, true) => Some(FRAC_PI_2),
        (true, false, true, false) => Some(PI + FRAC_PI_4),
        (true, false, false, true) => Some(PI - FRAC_PI_4),
        (false, true, true, false) => Some(-FRAC_PI_4),
        (false, true, false, true) => Some(FRAC_PI_4),
        (true, true, false, false) => Some(0.0),
        (false, false, true, true) => Some(FRAC_PI_2),
        (true, true, true, false) => Some(-FRAC_PI_2),
        (true, true, false, true) => Some(FRAC_PI_2),
        (true, false, true, true) => Some(PI),
        (false, true, true, true) => Some(0.0),
        (true, true, true, true) => Some(-FRAC_PI_2),
    }
}

/// Advance `current` toward `target` by at most `max_step` radians.
///
/// Bounded spherical step, not a snap: the avatar body turns smoothly toward
/// its travel direction over several ticks.
pub fn rotate_towards(current: Quat, target: Quat, max_step: f32) -> Quat {
    let angle = current.angle_to(&target);
    if angle <= max_step {
        return target;
    }
    // Antipodal orientations have no unique path; converge to the target.
    current
        .try_slerp(&target, max_step / angle, 1.0e-6)
        .unwrap_or(target)
}

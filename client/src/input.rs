//! Held-input snapshot fed to the simulation.
//!
//! Device and UI events mutate this state through the `press`/`release` and
//! joystick methods; the simulation only ever reads it. The joystick is an
//! analog vector in [-1, 1]², active while the on-screen stick is engaged.

use nalgebra as na;

/// Logical actions driven by keys or UI buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Run,
    Jump,
    Dance,
}

/// Currently pressed/held logical actions plus the analog joystick vector.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    pub dance: bool,
    joystick: na::Vector2<f32>,
    joystick_active: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Forward => self.forward = held,
            Action::Backward => self.backward = held,
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Run => self.run = held,
            Action::Jump => self.jump = held,
            Action::Dance => self.dance = held,
        }
    }

    /// Update the analog stick. Components are clamped to [-1, 1].
    pub fn set_joystick(&mut self, x: f32, y: f32) {
        self.joystick = na::Vector2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
        self.joystick_active = true;
    }

    /// The stick was released; its last vector no longer contributes.
    pub fn end_joystick(&mut self) {
        self.joystick_active = false;
    }

    #[inline]
    pub fn joystick(&self) -> na::Vector2<f32> {
        self.joystick
    }

    #[inline]
    pub fn joystick_active(&self) -> bool {
        self.joystick_active
    }

    /// Any digital movement direction held.
    #[inline]
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

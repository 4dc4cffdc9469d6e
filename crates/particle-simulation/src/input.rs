//! Pointer and button tracking
//!
//! Turns window-system events into the attractor state read by the frame loop: a
//! world-space attractor position plus independent attract / repel flags.
//!
//! The tracker knows nothing about the windowing library; the application converts its
//! native events into [`InputEvent`] first.

use glam::Vec2;

/// Pointer buttons the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button
    Primary,
    /// Usually the right mouse button
    Secondary,
    Other,
}

/// What holding a button does to the particles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Attract,
    Repel,
}

/// Which control each button drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBindings {
    pub primary: Control,
    pub secondary: Control,
}

impl Default for ControlBindings {
    /// Left button pushes particles away, right button pulls them in.
    fn default() -> Self {
        Self {
            primary: Control::Repel,
            secondary: Control::Attract,
        }
    }
}

/// Raw events delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position in physical pixels, origin top-left
    PointerMoved { x: f64, y: f64 },
    ButtonPressed(PointerButton),
    ButtonReleased(PointerButton),
    /// Re-randomize every particle
    Reset,
    Resized { width: u32, height: u32 },
    Quit,
}

/// What the caller has to do after an event was tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResponse {
    None,
    Reset,
    Quit,
}

/// Snapshot of the attractor read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttractorState {
    /// Attractor in world space
    pub position: Vec2,
    pub attract_engaged: bool,
    pub repel_engaged: bool,
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    state: AttractorState,
    bindings: ControlBindings,
    viewport: (u32, u32),
}

impl InputTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_bindings(width, height, ControlBindings::default())
    }

    pub fn with_bindings(width: u32, height: u32, bindings: ControlBindings) -> Self {
        Self {
            state: AttractorState::default(),
            bindings,
            viewport: (width, height),
        }
    }

    pub fn state(&self) -> AttractorState {
        self.state
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Map a pixel position to world space. Screen-down is world-up.
    pub fn screen_to_world(&self, x: f64, y: f64) -> Vec2 {
        let half_width = self.viewport.0 as f32 / 2.0;
        let half_height = self.viewport.1 as f32 / 2.0;

        Vec2::new(
            (x as f32 - half_width) / half_width,
            -(y as f32 - half_height) / half_height,
        )
    }

    pub fn handle_event(&mut self, event: InputEvent) -> InputResponse {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.state.position = self.screen_to_world(x, y);
            }
            InputEvent::ButtonPressed(button) => self.set_button(button, true),
            InputEvent::ButtonReleased(button) => self.set_button(button, false),
            InputEvent::Resized { width, height } => {
                // Minimized windows report 0x0, keep the last usable size
                if width > 0 && height > 0 {
                    self.viewport = (width, height);
                }
            }
            InputEvent::Reset => return InputResponse::Reset,
            InputEvent::Quit => return InputResponse::Quit,
        }
        InputResponse::None
    }

    fn set_button(&mut self, button: PointerButton, engaged: bool) {
        let control = match button {
            PointerButton::Primary => self.bindings.primary,
            PointerButton::Secondary => self.bindings.secondary,
            PointerButton::Other => return,
        };

        match control {
            Control::Attract => self.state.attract_engaged = engaged,
            Control::Repel => self.state.repel_engaged = engaged,
        }
        log::debug!("{:?} {}", control, if engaged { "engaged" } else { "released" });
    }
}

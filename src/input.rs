//! Keyboard and mouse state collected from window events.
//!
//! [`Input`] tracks which keys and buttons are held down, and queues pointer
//! events received while the frame was being assembled so drags see every
//! intermediate coordinate.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Keys the visualizer reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Key1,
    Key2,
    Key3,
    Key4,
    N,
    S,
    F,
    X,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => KeyCode::Key4,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyF => KeyCode::F,
            WinitKeyCode::KeyX => KeyCode::X,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Pointer and button events in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(MouseButton),
    Released(MouseButton),
    Moved(Vec2),
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    mouse_held: HashSet<MouseButton>,
    pointer_events: Vec<PointerEvent>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Pointer events received since the last [`begin_frame`](Self::begin_frame).
    pub fn pointer_events(&self) -> &[PointerEvent] {
        &self.pointer_events
    }

    /// Clear per-frame state. Held keys and buttons persist.
    pub fn begin_frame(&mut self) {
        self.pointer_events.clear();
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys_held.insert(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.mouse_held.insert(button);
        self.pointer_events.push(PointerEvent::Pressed(button));
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
        self.pointer_events.push(PointerEvent::Released(button));
    }

    /// Release everything held. Buttons get a `Released` event so an
    /// in-progress drag ends.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        for button in std::mem::take(&mut self.mouse_held) {
            self.pointer_events.push(PointerEvent::Released(button));
        }
    }

    pub fn move_pointer(&mut self, position: Vec2) {
        self.pointer_events.push(PointerEvent::Moved(position));
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => self.press_button(btn),
                    ElementState::Released => self.release_button(btn),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(Vec2::new(position.x as f32, position.y as f32));
            }

            // Keys released while unfocused never report a release.
            WindowEvent::Focused(false) => self.release_all(),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = Input::new();

        assert!(!input.key_held(KeyCode::X));

        input.press_key(KeyCode::X);
        assert!(input.key_held(KeyCode::X));

        // Held keys survive the frame boundary
        input.begin_frame();
        assert!(input.key_held(KeyCode::X));

        input.release_key(KeyCode::X);
        assert!(!input.key_held(KeyCode::X));
    }

    #[test]
    fn test_pointer_events_keep_order() {
        let mut input = Input::new();
        input.press_button(MouseButton::Left);
        input.move_pointer(Vec2::new(1.0, 2.0));
        input.move_pointer(Vec2::new(3.0, 4.0));
        input.release_button(MouseButton::Left);

        assert_eq!(
            input.pointer_events(),
            &[
                PointerEvent::Pressed(MouseButton::Left),
                PointerEvent::Moved(Vec2::new(1.0, 2.0)),
                PointerEvent::Moved(Vec2::new(3.0, 4.0)),
                PointerEvent::Released(MouseButton::Left),
            ]
        );
        assert!(!input.mouse_held.contains(&MouseButton::Left));

        input.begin_frame();
        assert!(input.pointer_events().is_empty());
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = Input::new();
        input.press_key(KeyCode::F);
        input.press_button(MouseButton::Left);
        input.begin_frame();

        input.handle_event(&WindowEvent::Focused(false));

        assert!(!input.key_held(KeyCode::F));
        assert!(!input.mouse_held.contains(&MouseButton::Left));
        assert_eq!(
            input.pointer_events(),
            &[PointerEvent::Released(MouseButton::Left)]
        );
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(KeyCode::from(WinitKeyCode::Digit3), KeyCode::Key3);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad1), KeyCode::Key1);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyF), KeyCode::F);
        assert!(matches!(KeyCode::from(WinitKeyCode::KeyQ), KeyCode::Other(_)));
    }
}

//! Display mode and simulation speed selection.

use std::fmt;

use crate::input::{Input, KeyCode};

/// How particles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Single-pixel points.
    Particles,
    /// Flat camera-facing discs.
    Billboards,
    /// Shaded scalar field with linear falloff.
    Linear,
    /// Shaded scalar field with inverse-square falloff.
    #[default]
    Default,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Particles,
        DisplayMode::Billboards,
        DisplayMode::Linear,
        DisplayMode::Default,
    ];

    /// Whether this mode uses the lit scalar-field shader.
    pub fn is_shaded(self) -> bool {
        matches!(self, DisplayMode::Linear | DisplayMode::Default)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayMode::Particles => "particles",
            DisplayMode::Billboards => "billboards",
            DisplayMode::Linear => "linear",
            DisplayMode::Default => "default",
        };
        f.write_str(name)
    }
}

/// Gravity presets bound to the speed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityPreset {
    Normal,
    Slow,
    Fast,
    /// Stops integration entirely.
    Frozen,
}

impl GravityPreset {
    pub fn gravity(self) -> f32 {
        match self {
            GravityPreset::Normal => 2.5,
            GravityPreset::Slow => 1.0,
            GravityPreset::Fast => 5.0,
            GravityPreset::Frozen => 0.0,
        }
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SetMode(DisplayMode),
    SetGravity(GravityPreset),
    Exit,
}

/// Key bindings, in the order they are polled.
pub const KEY_BINDINGS: [(KeyCode, Action); 9] = [
    (KeyCode::Escape, Action::Exit),
    (KeyCode::Key1, Action::SetMode(DisplayMode::Particles)),
    (KeyCode::Key2, Action::SetMode(DisplayMode::Billboards)),
    (KeyCode::Key3, Action::SetMode(DisplayMode::Linear)),
    (KeyCode::Key4, Action::SetMode(DisplayMode::Default)),
    (KeyCode::N, Action::SetGravity(GravityPreset::Normal)),
    (KeyCode::S, Action::SetGravity(GravityPreset::Slow)),
    (KeyCode::F, Action::SetGravity(GravityPreset::Fast)),
    (KeyCode::X, Action::SetGravity(GravityPreset::Frozen)),
];

/// Current display mode and gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeController {
    mode: DisplayMode,
    gravity: f32,
}

impl ModeController {
    pub fn new(mode: DisplayMode, gravity: f32) -> Self {
        Self { mode, gravity }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn set_gravity(&mut self, preset: GravityPreset) {
        self.gravity = preset.gravity();
    }

    /// Apply one action. Returns `true` if the action asks to exit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetMode(mode) => self.set_mode(mode),
            Action::SetGravity(preset) => self.set_gravity(preset),
            Action::Exit => return true,
        }
        false
    }

    /// Apply every binding whose key is currently held.
    ///
    /// Bindings are visited in table order so the last held key wins.
    /// Returns `true` if exit was requested.
    pub fn poll(&mut self, input: &Input) -> bool {
        let mut exit = false;
        for (key, action) in KEY_BINDINGS {
            if input.key_held(key) {
                exit |= self.apply(action);
            }
        }
        exit
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(DisplayMode::default(), GravityPreset::Normal.gravity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = ModeController::default();
        assert_eq!(controls.mode(), DisplayMode::Default);
        assert_eq!(controls.gravity(), 2.5);
    }

    #[test]
    fn test_mode_keys() {
        let expected = [
            (KeyCode::Key1, DisplayMode::Particles),
            (KeyCode::Key2, DisplayMode::Billboards),
            (KeyCode::Key3, DisplayMode::Linear),
            (KeyCode::Key4, DisplayMode::Default),
        ];

        for (key, mode) in expected {
            let mut input = Input::new();
            input.press_key(key);

            let mut controls = ModeController::default();
            assert!(!controls.poll(&input));
            assert_eq!(controls.mode(), mode);
        }
    }

    #[test]
    fn test_gravity_keys() {
        let expected = [
            (KeyCode::N, 2.5),
            (KeyCode::S, 1.0),
            (KeyCode::F, 5.0),
            (KeyCode::X, 0.0),
        ];

        for (key, gravity) in expected {
            let mut input = Input::new();
            input.press_key(key);

            let mut controls = ModeController::new(DisplayMode::Particles, -3.0);
            controls.poll(&input);
            assert_eq!(controls.gravity(), gravity);
            assert_eq!(controls.mode(), DisplayMode::Particles);
        }
    }

    #[test]
    fn test_last_binding_wins() {
        let mut input = Input::new();
        input.press_key(KeyCode::F);
        input.press_key(KeyCode::X);
        input.press_key(KeyCode::Key1);
        input.press_key(KeyCode::Key4);

        let mut controls = ModeController::default();
        controls.poll(&input);
        assert_eq!(controls.gravity(), 0.0);
        assert_eq!(controls.mode(), DisplayMode::Default);
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut input = Input::new();
        input.press_key(KeyCode::Escape);

        let mut controls = ModeController::default();
        assert!(controls.poll(&input));
        assert_eq!(controls, ModeController::default());
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let mut input = Input::new();
        input.press_key(KeyCode::Other(42));
        let mut controls = ModeController::default();
        assert!(!controls.poll(&input));
        assert_eq!(controls, ModeController::default());
    }

    #[test]
    fn test_apply_and_shading() {
        let mut controls = ModeController::default();
        assert!(!controls.apply(Action::SetGravity(GravityPreset::Frozen)));
        assert_eq!(controls.gravity(), 0.0);
        assert!(controls.apply(Action::Exit));
        assert!(DisplayMode::Linear.is_shaded());
        assert!(!DisplayMode::Billboards.is_shaded());
    }
}

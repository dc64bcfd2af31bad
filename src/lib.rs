//! # Portal Fluid
//!
//! A small real-time fluid visualizer. Ten particles fall out of a square
//! emitter under adjustable gravity and are drawn either as points, as flat
//! billboards, or as a lit metaball surface computed from a scalar field.
//!
//! ## Quick Start
//!
//! ```ignore
//! use portal_fluid::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     Visualizer::new()
//!         .with_mode(DisplayMode::Default)
//!         .with_gravity(2.5)
//!         .run()
//! }
//! ```
//!
//! ## Controls
//!
//! | Key | Effect |
//! |-----|--------|
//! | `1` | points |
//! | `2` | flat billboards |
//! | `3` | shaded field, linear falloff |
//! | `4` | shaded field, inverse-square falloff |
//! | `N` / `S` / `F` | normal / slow / fast gravity |
//! | `X` | freeze (gravity 0) |
//! | `Esc` | exit |
//!
//! Dragging with the left mouse button orbits the camera around the world
//! up axis and a fixed horizontal axis.
//!
//! ## Headless use
//!
//! The simulation does not need a window. [`SimulationState`] owns the
//! particles, camera and mode controls and can be driven directly:
//!
//! ```
//! use portal_fluid::prelude::*;
//!
//! let mut config = AppConfig::default();
//! config.simulation.seed = Some(7);
//! let mut state: SimulationState = SimulationState::new(&config);
//!
//! let input = Input::new();
//! state.update(&input, 0.016);
//! assert_eq!(state.particles.len(), MAX_PARTICLES);
//! ```

pub mod camera;
pub mod config;
pub mod error;
mod gpu;
pub mod input;
pub mod integrator;
pub mod mode;
pub mod particle;
pub mod state;
pub mod time;
mod visualizer;

pub use camera::{CameraController, Projection};
pub use config::{AppConfig, CameraConfig, Lighting, SimulationConfig};
pub use error::{AppError, GpuError, ShaderError};
pub use glam::{Vec2, Vec3};
pub use integrator::Integrator;
pub use mode::{Action, DisplayMode, GravityPreset, ModeController};
pub use particle::{Particle, ParticleState, SpawnRegion, MAX_PARTICLES};
pub use state::{FrameData, SimulationState};
pub use visualizer::Visualizer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use portal_fluid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::CameraController;
    pub use crate::config::AppConfig;
    pub use crate::error::AppError;
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::mode::{DisplayMode, GravityPreset};
    pub use crate::particle::MAX_PARTICLES;
    pub use crate::state::SimulationState;
    pub use crate::time::Time;
    pub use crate::visualizer::Visualizer;
    pub use crate::{Vec2, Vec3};
}

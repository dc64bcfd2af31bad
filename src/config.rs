//! Startup configuration.
//!
//! Everything here has a default matching the stock visualizer. Values are
//! set through the `with_*` methods on [`Visualizer`](crate::Visualizer) or
//! directly on [`AppConfig`].

use std::path::PathBuf;

use glam::Vec3;

use crate::camera::Projection;
use crate::integrator::DEADLINE;
use crate::mode::{DisplayMode, GravityPreset};
use crate::particle::SpawnRegion;

/// Phong lighting parameters for the shaded display modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub object_color: Vec3,
    pub light_color: Vec3,
    pub shininess: f32,
    pub specular_strength: f32,
    pub ambient_strength: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            object_color: Vec3::new(1.0, 0.7, 0.2),
            light_color: Vec3::ONE,
            shininess: 16.0,
            specular_strength: 0.6,
            ambient_strength: 0.5,
        }
    }
}

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Initial gravity scalar. Zero freezes the simulation.
    pub gravity: f32,
    /// Height below which particles respawn.
    pub deadline: f32,
    pub spawn_region: SpawnRegion,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GravityPreset::Normal.gravity(),
            deadline: DEADLINE,
            spawn_region: SpawnRegion::default(),
            seed: None,
        }
    }
}

/// Camera placement and projection.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub sensitivity: f32,
    pub projection: Projection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 3.0, 1.0),
            target: Vec3::new(0.0, 3.0, 0.0),
            sensitivity: crate::camera::DRAG_SENSITIVITY,
            projection: Projection::default(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub initial_mode: DisplayMode,
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
    pub lighting: Lighting,
    pub clear_color: [f64; 4],
    /// Directory the WGSL assets are read from.
    pub shader_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Portal Fluid".to_string(),
            width: 800,
            height: 600,
            initial_mode: DisplayMode::Default,
            simulation: SimulationConfig::default(),
            camera: CameraConfig::default(),
            lighting: Lighting::default(),
            clear_color: [0.2, 0.3, 0.4, 0.0],
            shader_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
        }
    }
}

impl AppConfig {
    /// Width over height of the configured viewport.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.simulation.gravity, 2.5);
        assert_eq!(config.simulation.deadline, 0.0);
        assert_eq!(config.initial_mode, DisplayMode::Default);
        assert_eq!(config.lighting.shininess, 16.0);
        assert!(config.shader_dir.ends_with("shaders"));
    }

    #[test]
    fn test_aspect_ratio() {
        let mut config = AppConfig::default();
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);

        config.height = 0;
        assert_eq!(config.aspect_ratio(), 800.0);
    }
}

//! Visualizer builder and runner

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::{AppConfig, Lighting};
use crate::error::AppError;
use crate::gpu::shaders::ShaderLibrary;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::mode::DisplayMode;
use crate::state::SimulationState;
use crate::time::Time;

/// A fluid visualizer builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// use portal_fluid::prelude::*;
///
/// Visualizer::new()
///     .with_mode(DisplayMode::Linear)
///     .with_gravity(1.0)
///     .run()?;
/// ```
pub struct Visualizer {
    config: AppConfig,
}

impl Visualizer {
    /// Create a visualizer with default settings.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the starting gravity.
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.config.simulation.gravity = gravity;
        self
    }

    /// Set the starting display mode.
    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Seed the particle RNG for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    /// Directory the WGSL assets are read from.
    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.shader_dir = dir.into();
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.config.lighting = lighting;
        self
    }

    pub fn with_clear_color(mut self, color: [f64; 4]) -> Self {
        self.config.clear_color = color;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the visualizer. This blocks until the window is closed.
    pub fn run(self) -> Result<(), AppError> {
        let (library, errors) = ShaderLibrary::load(&self.config.shader_dir);
        for error in &errors {
            log::warn!("{}; using embedded copy", error);
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, library);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    config: AppConfig,
    library: ShaderLibrary,
    state: SimulationState,
    input: Input,
    time: Time,
    error: Option<AppError>,
}

impl App {
    fn new(config: AppConfig, library: ShaderLibrary) -> Self {
        let state = SimulationState::new(&config);
        Self {
            window: None,
            gpu_state: None,
            config,
            library,
            state,
            input: Input::new(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let gpu_state = pollster::block_on(GpuState::new(window, &self.library))?;
        for mode in DisplayMode::ALL {
            if !gpu_state.supports(mode) {
                log::warn!("Display mode {} has no pipeline; particles will not draw", mode);
            }
        }
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let fps_refreshed = self.time.update();

        if self.state.update(&self.input, self.time.elapsed()) {
            event_loop.exit();
            return;
        }
        self.input.begin_frame();

        if let Some(gpu_state) = &mut self.gpu_state {
            let frame = self.state.frame_data(gpu_state.aspect_ratio());
            match gpu_state.render(&frame, self.config.clear_color) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.resize(winit::dpi::PhysicalSize {
                        width: gpu_state.config.width,
                        height: gpu_state.config.height,
                    })
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if fps_refreshed {
                window.set_title(&format!(
                    "{} | {:.0} FPS | {} | gravity {:.1}",
                    self.config.title,
                    self.time.fps(),
                    self.state.controls.mode(),
                    self.state.controls.gravity(),
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chaining() {
        let visualizer = Visualizer::new()
            .with_gravity(1.0)
            .with_mode(DisplayMode::Billboards)
            .with_window_size(1024, 768)
            .with_seed(3)
            .with_shader_dir("/tmp/shaders")
            .with_clear_color([0.0, 0.0, 0.0, 1.0]);

        let config = visualizer.config();
        assert_eq!(config.simulation.gravity, 1.0);
        assert_eq!(config.initial_mode, DisplayMode::Billboards);
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.simulation.seed, Some(3));
        assert_eq!(config.shader_dir, PathBuf::from("/tmp/shaders"));
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_default_matches_config_default() {
        let visualizer = Visualizer::default();
        assert_eq!(visualizer.config().title, "Portal Fluid");
        assert_eq!(visualizer.config().simulation.gravity, 2.5);
    }

    #[test]
    fn test_app_starts_without_window() {
        let config = AppConfig {
            simulation: crate::config::SimulationConfig {
                seed: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };
        let app = App::new(config, ShaderLibrary::embedded());

        assert!(app.window.is_none());
        assert!(app.gpu_state.is_none());
        assert!(app.error.is_none());
        assert_eq!(app.state.controls.mode(), DisplayMode::Default);
    }
}

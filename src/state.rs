//! The simulation state shared by input handling, integration and rendering.

use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::CameraController;
use crate::config::{AppConfig, Lighting};
use crate::input::{Input, MouseButton, PointerEvent};
use crate::integrator::Integrator;
use crate::mode::{DisplayMode, ModeController};
use crate::particle::{ParticleState, MAX_PARTICLES};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData<const N: usize = MAX_PARTICLES> {
    pub mode: DisplayMode,
    pub view: Mat4,
    pub projection: Mat4,
    /// `projection * view`; the emitter and point passes use no model transform.
    pub mvp: Mat4,
    pub positions: [[f32; 3]; N],
    /// Particle positions in view space.
    pub view_positions: [Vec3; N],
    pub camera_position: Vec3,
    pub lighting: Lighting,
    /// Linear scalar-field falloff instead of inverse-square.
    pub linear_falloff: bool,
}

/// Particles, camera, controls and clock baseline for one window.
pub struct SimulationState<const N: usize = MAX_PARTICLES> {
    pub particles: ParticleState<N>,
    pub camera: CameraController,
    pub controls: ModeController,
    pub integrator: Integrator,
    pub lighting: Lighting,
    rng: SmallRng,
}

impl<const N: usize> SimulationState<N> {
    pub fn new(config: &AppConfig) -> Self {
        let mut rng = match config.simulation.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let sim = &config.simulation;
        let particles = ParticleState::spawn(&sim.spawn_region, &mut rng);
        let integrator = Integrator::new()
            .with_deadline(sim.deadline)
            .with_spawn_region(sim.spawn_region.clone());

        let camera = CameraController::new(config.camera.position, config.camera.target)
            .with_sensitivity(config.camera.sensitivity)
            .with_projection(config.camera.projection);

        Self {
            particles,
            camera,
            controls: ModeController::new(config.initial_mode, sim.gravity),
            integrator,
            lighting: config.lighting,
            rng,
        }
    }

    /// Apply this frame's input. Returns `true` if exit was requested.
    pub fn handle_input(&mut self, input: &Input) -> bool {
        for event in input.pointer_events() {
            match *event {
                PointerEvent::Pressed(MouseButton::Left) => self.camera.begin_drag(),
                PointerEvent::Released(MouseButton::Left) => self.camera.end_drag(),
                PointerEvent::Moved(position) => self.camera.drag_to(position.x, position.y),
                _ => {}
            }
        }

        self.controls.poll(input)
    }

    /// Integrate particles up to `now` seconds since startup.
    pub fn advance(&mut self, now: f32) -> f32 {
        let gravity = self.controls.gravity();
        self.integrator
            .advance(&mut self.particles, now, gravity, &mut self.rng)
    }

    /// Run input then integration for one frame.
    pub fn update(&mut self, input: &Input, now: f32) -> bool {
        let exit = self.handle_input(input);
        self.advance(now);
        exit
    }

    /// Snapshot the state for rendering.
    pub fn frame_data(&self, aspect: f32) -> FrameData<N> {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(aspect);
        let mode = self.controls.mode();

        let view_positions = std::array::from_fn(|i| {
            view.transform_point3(self.particles.particles()[i].position)
        });

        FrameData {
            mode,
            view,
            projection,
            mvp: projection * view,
            positions: *self.particles.positions(),
            view_positions,
            camera_position: self.camera.position(),
            lighting: self.lighting,
            linear_falloff: mode == DisplayMode::Linear,
        }
    }
}

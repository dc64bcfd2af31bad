//! Drag-to-rotate camera.
//!
//! The camera looks at a fixed target. Mouse drags rotate the camera position
//! about the world origin, not about the target, with quaternions built from
//! the pointer offset.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

/// Degrees of rotation per pixel of pointer movement.
pub const DRAG_SENSITIVITY: f32 = 0.2;

/// Perspective parameters for the projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 90.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Camera position, orientation and drag tracking.
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    orientation: Quat,
    /// Axis for vertical drags, perpendicular to `up`.
    pitch_axis: Vec3,
    sensitivity: f32,
    dragging: bool,
    /// Last pointer position seen during the current drag.
    anchor: Option<Vec2>,
    projection: Projection,
}

impl CameraController {
    /// Camera at `position` looking at `target` with +Y up.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let up = Vec3::Y;
        Self {
            position,
            target,
            up,
            orientation: Quat::IDENTITY,
            pitch_axis: Vec3::new(1.0, 0.0, 1.0).cross(up).normalize(),
            sensitivity: DRAG_SENSITIVITY,
            dragging: false,
            anchor: None,
            projection: Projection::default(),
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a drag. The next pointer event becomes the reference point.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.anchor = None;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Feed an absolute pointer position in screen pixels.
    ///
    /// Any real movement discards the accumulated orientation before the new
    /// rotation is composed, so rotation does not carry momentum between
    /// moves. Events at the reference point leave everything untouched.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }

        let current = Vec2::new(x, y);
        let anchor = *self.anchor.get_or_insert(current);
        if current == anchor {
            return;
        }
        self.orientation = Quat::IDENTITY;

        let offset = (current - anchor) * self.sensitivity;
        self.anchor = Some(current);

        let yaw = Quat::from_axis_angle(self.up, offset.x.to_radians());
        let pitch = Quat::from_axis_angle(self.pitch_axis, (-offset.y).to_radians());
        self.orientation = (self.orientation * yaw * pitch).normalize();

        self.position = Mat3::from_quat(self.orientation) * self.position;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(aspect)
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(Vec3::new(4.0, 3.0, 1.0), Vec3::new(0.0, 3.0, 0.0))
    }
}

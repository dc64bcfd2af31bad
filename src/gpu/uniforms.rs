//! CPU mirror of the `FrameUniforms` block in `shaders/common.wgsl`.

use bytemuck::{Pod, Zeroable};

use crate::mode::DisplayMode;
use crate::particle::MAX_PARTICLES;
use crate::state::FrameData;

/// Billboard half-size for the flat disc mode.
const FLAT_BILLBOARD_SIZE: f32 = 0.05;
/// Billboard half-size for the shaded modes; doubles as the field radius.
const FIELD_BILLBOARD_SIZE: f32 = 0.35;

/// Uniform block layout. Field order and padding match WGSL std140 rules.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub mvp: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub neighbors: [[f32; 4]; MAX_PARTICLES],
    pub object_color: [f32; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub shininess: f32,
    pub specular_strength: f32,
    pub ambient_strength: f32,
    pub linear_mode: u32,
    pub billboard_size: f32,
    pub _padding: [f32; 3],
}

impl FrameUniforms {
    pub fn from_frame(frame: &FrameData) -> Self {
        let lighting = &frame.lighting;
        let light_pos = frame.view.transform_point3(frame.camera_position);

        Self {
            mvp: frame.mvp.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            neighbors: frame.view_positions.map(|p| p.extend(1.0).to_array()),
            object_color: lighting.object_color.extend(1.0).to_array(),
            light_pos: light_pos.extend(1.0).to_array(),
            light_color: lighting.light_color.extend(1.0).to_array(),
            shininess: lighting.shininess,
            specular_strength: lighting.specular_strength,
            ambient_strength: lighting.ambient_strength,
            linear_mode: frame.linear_falloff as u32,
            billboard_size: billboard_size(frame.mode),
            _padding: [0.0; 3],
        }
    }
}

fn billboard_size(mode: DisplayMode) -> f32 {
    if mode.is_shaded() {
        FIELD_BILLBOARD_SIZE
    } else {
        FLAT_BILLBOARD_SIZE
    }
}

//! Wireframe of the particle emitter.
//!
//! A square frame in the x = 0 plane spanning the spawn height, plus a spout
//! line pointing along +x towards where particles appear.

use wgpu::util::DeviceExt;

/// Frame corners followed by the two spout endpoints.
pub const EMITTER_VERTICES: [[f32; 3]; 6] = [
    [0.0, 2.0, 1.0],
    [0.0, 2.0, -1.0],
    [0.0, 4.0, -1.0],
    [0.0, 4.0, 1.0],
    [0.0, 3.0, 0.0],
    [2.0, 3.0, 0.0],
];

/// Line list: four frame edges and the spout.
pub const EMITTER_INDICES: [u32; 10] = [0, 1, 1, 2, 2, 3, 3, 0, 4, 5];

/// Static GPU buffers for the emitter lines.
pub struct EmitterMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl EmitterMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Emitter Vertex Buffer"),
            contents: bytemuck::cast_slice(&EMITTER_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Emitter Index Buffer"),
            contents: bytemuck::cast_slice(&EMITTER_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: EMITTER_INDICES.len() as u32,
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

//! Render pipelines for the emitter and each display mode.

use crate::error::ShaderError;
use crate::mode::DisplayMode;

use super::shaders::{self, ShaderLibrary};
use super::DEPTH_FORMAT;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// How a pipeline consumes the position buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Geometry {
    /// One vertex per position, indexed line list.
    Lines,
    /// One vertex per position, point list.
    Points,
    /// Six vertices per position-instance, triangle list.
    Quads,
}

impl Geometry {
    fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Geometry::Lines => wgpu::PrimitiveTopology::LineList,
            Geometry::Points => wgpu::PrimitiveTopology::PointList,
            Geometry::Quads => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn step_mode(self) -> wgpu::VertexStepMode {
        match self {
            Geometry::Quads => wgpu::VertexStepMode::Instance,
            _ => wgpu::VertexStepMode::Vertex,
        }
    }
}

/// All pipelines. A pipeline that failed to compile or link is `None`.
pub struct Pipelines {
    pub emitter: Option<wgpu::RenderPipeline>,
    pub points: Option<wgpu::RenderPipeline>,
    pub billboards: Option<wgpu::RenderPipeline>,
    pub fluid: Option<wgpu::RenderPipeline>,
}

impl Pipelines {
    /// Build every pipeline. Failures are returned, never fatal.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        library: &ShaderLibrary,
    ) -> (Self, Vec<ShaderError>) {
        let mut errors = Vec::new();
        let make = |module: &wgpu::ShaderModule, name: &str, geometry: Geometry| {
            build(device, layout, format, module, name, geometry)
        };

        let (emitter, points) =
            match shaders::compile(device, "Emitter Shader", &library.emitter_source()) {
                Ok(module) => (
                    keep(&mut errors, make(&module, "Emitter Pipeline", Geometry::Lines)),
                    keep(&mut errors, make(&module, "Points Pipeline", Geometry::Points)),
                ),
                Err(e) => {
                    errors.push(e);
                    (None, None)
                }
            };

        let billboards = shaders::compile(device, "Billboard Shader", &library.billboard_source())
            .and_then(|module| make(&module, "Billboard Pipeline", Geometry::Quads));
        let billboards = keep(&mut errors, billboards);

        let fluid = shaders::compile(device, "Fluid Shader", &library.fluid_source())
            .and_then(|module| make(&module, "Fluid Pipeline", Geometry::Quads));
        let fluid = keep(&mut errors, fluid);

        (
            Self {
                emitter,
                points,
                billboards,
                fluid,
            },
            errors,
        )
    }

    /// Pipeline used for particles in `mode`.
    pub fn for_mode(&self, mode: DisplayMode) -> Option<&wgpu::RenderPipeline> {
        match mode {
            DisplayMode::Particles => self.points.as_ref(),
            DisplayMode::Billboards => self.billboards.as_ref(),
            DisplayMode::Linear | DisplayMode::Default => self.fluid.as_ref(),
        }
    }
}

fn keep(
    errors: &mut Vec<ShaderError>,
    result: Result<wgpu::RenderPipeline, ShaderError>,
) -> Option<wgpu::RenderPipeline> {
    result.map_err(|e| errors.push(e)).ok()
}

fn build(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    module: &wgpu::ShaderModule,
    name: &str,
    geometry: Geometry,
) -> Result<wgpu::RenderPipeline, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: geometry.step_mode(),
                attributes: &POSITION_ATTRIBUTES,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: geometry.topology(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(pipeline),
        Some(error) => Err(ShaderError::Link {
            name: name.to_string(),
            message: error.to_string(),
        }),
    }
}

//! The point draw pass and the wgpu-backed [`PointSink`].
//!
//! One instance-stepped vertex buffer (start/end attributes per point), one
//! 32-byte uniform block, one pipeline, and a `draw(0..6, 0..N)` call. The
//! vertex shader does all interpolation, so a frame costs one small uniform
//! write regardless of the point count.

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use super::dynamic_buffer::TypedBuffer;
use super::render_context::RenderContext;
use super::sink::PointSink;
use crate::animation::{FrameUniforms, PointVertex};
use crate::error::GridmorphError;

/// Vertices per point quad.
const QUAD_VERTICES: u32 = 6;

/// Pipeline, buffers and bind group for drawing points.
pub struct PointPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: TypedBuffer<PointVertex>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_count: u32,
}

impl PointPass {
    /// Create the pass with room for `capacity` points.
    pub fn new(context: &RenderContext, capacity: usize) -> Self {
        let device = &context.device;
        let vertex_buffer = TypedBuffer::with_capacity(
            device,
            "Point Vertex Buffer",
            capacity,
            wgpu::BufferUsages::VERTEX,
        );
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Point Frame Uniforms"),
                contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Point Frame Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Point Frame Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline = Self::create_pipeline(context, &bind_group_layout);

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_group,
            instance_count: 0,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let device = &context.device;
        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Point Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../../assets/shaders/points.wgsl").into(),
                ),
            });
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Point Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            });
        let attributes = wgpu::vertex_attr_array![
            0 => Float32x2,
            1 => Float32x2,
            2 => Float32x3,
            3 => Float32,
            4 => Float32x3,
        ];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<PointVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &attributes,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Replace the point attributes.
    pub fn write_points(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[PointVertex],
    ) {
        let _ = self.vertex_buffer.write(device, queue, vertices);
        self.instance_count = vertices.len() as u32;
    }

    /// Update the per-frame uniform block.
    pub fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        uniforms: &FrameUniforms,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(uniforms),
        );
    }

    /// Record the draw into `pass`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(
            0,
            self.vertex_buffer
                .buffer()
                .slice(0..self.vertex_buffer.used_bytes()),
        );
        pass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }

    /// Points drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}

/// [`PointSink`] drawing into a wgpu surface.
pub struct GpuPointRenderer {
    /// Device, queue and surface.
    pub context: RenderContext,
    pass: PointPass,
}

impl GpuPointRenderer {
    /// Renderer with room for `capacity` points.
    pub fn new(context: RenderContext, capacity: usize) -> Self {
        let pass = PointPass::new(&context, capacity);
        Self { context, pass }
    }

    /// Points drawn per frame.
    pub fn instance_count(&self) -> u32 {
        self.pass.instance_count()
    }
}

impl PointSink for GpuPointRenderer {
    fn upload(&mut self, vertices: &[PointVertex]) {
        self.pass
            .write_points(&self.context.device, &self.context.queue, vertices);
    }

    fn draw(
        &mut self,
        uniforms: &FrameUniforms,
        clear: [f32; 4],
    ) -> Result<(), GridmorphError> {
        if self.context.is_lost() {
            return Err(GridmorphError::ContextLost);
        }
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // Skip this frame; the next one draws on the fresh surface.
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface timeout, dropping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.pass.write_uniforms(&self.context.queue, uniforms);
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Point Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(clear[0]),
                                    g: f64::from(clear[1]),
                                    b: f64::from(clear[2]),
                                    a: f64::from(clear[3]),
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    ..Default::default()
                });
            self.pass.draw(&mut pass);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    fn is_lost(&self) -> bool {
        self.context.is_lost()
    }
}

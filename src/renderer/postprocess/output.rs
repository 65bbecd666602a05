//! Final output pass: composite over the page background, apply gamma.
//!
//! The scene is rendered with a transparent clear, so this pass alpha-blends
//! the (noise-distorted) scene image over the configured background color,
//! reproducing the transparent canvas sitting on the page. Gamma is applied
//! in-shader only when the surface format is not sRGB.

use wgpu::util::DeviceExt;

use crate::error::ShowcaseError;
use crate::gpu::pipeline_helpers;
use crate::gpu::{RenderContext, ShaderComposer};

/// Output pass parameters.
/// NOTE: Must match the WGSL struct layout exactly (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OutputUniform {
    /// Page background color (linear RGB, alpha unused).
    background: [f32; 4],
    /// Gamma exponent (1.0 when the surface is sRGB).
    gamma: f32,
    _pad: [f32; 3],
}

/// Composites the processed scene over the page background.
pub struct OutputPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    uniform: OutputUniform,
    uniform_buffer: wgpu::Buffer,
}

impl OutputPass {
    /// Build the pass reading from `input_view` (the noise pass output).
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ShaderCompose`] if the output shader fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        input_view: &wgpu::TextureView,
        background: [f32; 3],
    ) -> Result<Self, ShowcaseError> {
        let sampler = pipeline_helpers::linear_sampler(
            &context.device,
            "Output Sampler",
        );

        // If sRGB, hardware does gamma correction -> gamma = 1.0
        // If linear, apply gamma = 1/2.2 in shader
        let gamma = if context.config.format.is_srgb() {
            1.0
        } else {
            1.0 / 2.2
        };
        let uniform = OutputUniform {
            background: [background[0], background[1], background[2], 1.0],
            gamma,
            _pad: [0.0; 3],
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Output Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Output Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                    pipeline_helpers::uniform_buffer(2),
                ],
            },
        );

        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            input_view,
            &sampler,
            &uniform_buffer,
        );

        let shader = shader_composer.compose(
            &context.device,
            "Output Shader",
            include_str!("../../../assets/shaders/screen/output.wgsl"),
            "output.wgsl",
        )?;

        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            &context.device,
            "Output",
            &shader,
            context.config.format,
            None,
            &[&bind_group_layout],
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            uniform,
            uniform_buffer,
        })
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        input_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Output Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            input_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                ],
            })
    }

    /// Update the page background color.
    pub fn set_background(
        &mut self,
        queue: &wgpu::Queue,
        background: [f32; 3],
    ) {
        self.uniform.background =
            [background[0], background[1], background[2], 1.0];
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Rebind after the noise output texture was recreated on resize.
    pub fn rebind_input(
        &mut self,
        context: &RenderContext,
        input_view: &wgpu::TextureView,
    ) {
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            input_view,
            &self.sampler,
            &self.uniform_buffer,
        );
    }

    /// Encode the composite pass to the swapchain view.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Output Pass"),
                color_attachments: &[Some(
                    wgpu::RenderPassColorAttachment {
                        view: surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    },
                )],
                depth_stencil_attachment: None,
                ..Default::default()
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

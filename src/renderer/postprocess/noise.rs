//! Scroll-reactive noise distortion pass.
//!
//! Reads the scene image and writes a distorted copy: hash-noise UV
//! displacement plus film grain, both scaled by the smoothed scroll
//! intensity. Aspect correction keeps the noise pattern square on wide
//! viewports.

use wgpu::util::DeviceExt;

use crate::error::ShowcaseError;
use crate::gpu::pipeline_helpers;
use crate::gpu::{RenderContext, ShaderComposer};
use crate::options::PostProcessingOptions;
use crate::renderer::SCENE_FORMAT;

/// Noise pass parameters.
/// NOTE: Must match the WGSL struct layout exactly (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct NoiseUniform {
    /// Seconds since engine start.
    time: f32,
    /// Smoothed scroll intensity in [0, 1].
    effect: f32,
    /// Viewport aspect ratio (width / height).
    aspect: f32,
    /// UV displacement scale at full intensity.
    noise_strength: f32,
    /// Film grain contribution at full intensity.
    grain_strength: f32,
    _pad: [f32; 3],
}

/// The noise distortion pass and its intermediate output texture.
pub struct NoisePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    uniform: NoiseUniform,
    uniform_buffer: wgpu::Buffer,
    output_texture: wgpu::Texture,
    /// View of the distorted image, read by the output pass.
    pub output_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl NoisePass {
    /// Build the pass reading from `scene_view`.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ShaderCompose`] if the noise shader fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        scene_view: &wgpu::TextureView,
        options: &PostProcessingOptions,
    ) -> Result<Self, ShowcaseError> {
        let width = context.width();
        let height = context.height();

        let (output_texture, output_view) =
            Self::create_output_texture(context, width, height);

        let sampler =
            pipeline_helpers::linear_sampler(&context.device, "Noise Sampler");

        let uniform = NoiseUniform {
            time: 0.0,
            effect: 0.0,
            aspect: width as f32 / height as f32,
            noise_strength: options.noise_strength,
            grain_strength: options.grain_strength,
            _pad: [0.0; 3],
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Noise Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Noise Bind Group Layout"),
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
            scene_view,
            &sampler,
            &uniform_buffer,
        );

        let shader = shader_composer.compose(
            &context.device,
            "Noise Shader",
            include_str!("../../../assets/shaders/screen/noise.wgsl"),
            "noise.wgsl",
        )?;

        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            &context.device,
            "Noise",
            &shader,
            SCENE_FORMAT,
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
            output_texture,
            output_view,
            width,
            height,
        })
    }

    fn create_output_texture(
        context: &RenderContext,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture =
            context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Noise Output Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: SCENE_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });
        let view = texture.create_view(&Default::default());
        (texture, view)
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        scene_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        uniform_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Noise Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            scene_view,
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

    /// Rewrite the per-frame uniforms: elapsed time and smoothed intensity.
    pub fn update(&mut self, queue: &wgpu::Queue, time: f32, effect: f32) {
        self.uniform.time = time;
        self.uniform.effect = effect;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Push strength option values into the uniform.
    pub fn apply_options(
        &mut self,
        queue: &wgpu::Queue,
        options: &PostProcessingOptions,
    ) {
        self.uniform.noise_strength = options.noise_strength;
        self.uniform.grain_strength = options.grain_strength;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Encode the distortion pass: scene image in, distorted image out.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Noise Pass"),
                color_attachments: &[Some(
                    wgpu::RenderPassColorAttachment {
                        view: &self.output_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(
                                wgpu::Color::TRANSPARENT,
                            ),
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

    /// Resize the output texture, rewrite the aspect uniform, and rebind
    /// the scene input. The rebind happens even at an unchanged size: the
    /// caller recreates the scene texture on every resize, including the
    /// surface-loss recovery path.
    pub fn resize(
        &mut self,
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
    ) {
        let width = context.width();
        let height = context.height();
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;

            let (output_texture, output_view) =
                Self::create_output_texture(context, width, height);
            self.output_texture = output_texture;
            self.output_view = output_view;

            self.uniform.aspect = width as f32 / height as f32;
            context.queue.write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::cast_slice(&[self.uniform]),
            );
        }

        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            scene_view,
            &self.sampler,
            &self.uniform_buffer,
        );
    }

    /// Current aspect ratio uniform value.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.uniform.aspect
    }
}

//! Scene rasterization pass for the product mesh.
//!
//! Draws the merged sneaker mesh into the offscreen scene target with a
//! fully transparent clear; pixels the mesh does not cover stay alpha 0 so
//! the output pass can composite the page background behind it.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::error::ShowcaseError;
use crate::gpu::{RenderContext, ShaderComposer};
use crate::model::{MeshData, MeshVertex};
use crate::renderer::{DEPTH_FORMAT, SCENE_FORMAT};
use crate::scene::ModelUniform;

/// Pipeline + model transform + mesh buffers for the scene pass.
pub struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    model_uniform: ModelUniform,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    center: Vec3,
}

impl MeshPass {
    /// Build the pass. The mesh itself arrives later via
    /// [`upload_mesh`](Self::upload_mesh).
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ShaderCompose`] if the mesh shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ShowcaseError> {
        let model_uniform = ModelUniform::new();
        let model_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Model Buffer"),
                contents: bytemuck::cast_slice(&[model_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let model_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
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
            },
        );

        let model_bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                    label: Some("Model Bind Group"),
                });

        let shader = shader_composer.compose(
            &context.device,
            "Mesh Shader",
            include_str!("../../assets/shaders/raster/mesh.wgsl"),
            "mesh.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    &model_layout,
                ],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: SCENE_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
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
            },
        );

        Ok(Self {
            pipeline,
            model_uniform,
            model_buffer,
            model_bind_group,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
            center: Vec3::ZERO,
        })
    }

    /// Upload the decoded mesh. One model per process; a second upload
    /// replaces the buffers.
    pub fn upload_mesh(&mut self, context: &RenderContext, mesh: &MeshData) {
        self.vertex_buffer = Some(context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        self.index_count = mesh.indices.len() as u32;
        self.center = mesh.center();
    }

    /// Whether a mesh has been uploaded.
    #[must_use]
    pub fn has_mesh(&self) -> bool {
        self.index_count > 0
    }

    /// Compose and upload the model matrix: scroll yaw, entrance rise, and
    /// the re-centering translation from the uploaded mesh.
    pub fn update_transform(
        &mut self,
        queue: &wgpu::Queue,
        yaw: f32,
        rise: f32,
    ) {
        self.model_uniform.set_transform(yaw, rise, self.center);
        queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&[self.model_uniform]),
        );
    }

    /// Encode the scene pass. Clears to transparent; draws only once a mesh
    /// is present.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        camera_bind_group: &wgpu::BindGroup,
        lighting_bind_group: &wgpu::BindGroup,
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(
                    wgpu::RenderPassColorAttachment {
                        view: color_view,
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
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        let (Some(vertex_buffer), Some(index_buffer)) =
            (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.index_count == 0 {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, lighting_bind_group, &[]);
        pass.set_bind_group(2, &self.model_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(
            index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

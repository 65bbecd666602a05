//! Page overlay pass.
//!
//! Draws the page chrome (header bar, cards, copy bars, preloader) as
//! alpha-blended rectangles directly onto the swapchain, after the
//! post-processing chain. The overlay is deliberately outside the noise
//! pass, matching the DOM sitting above the canvas.

use crate::error::ShowcaseError;
use crate::gpu::{RenderContext, ShaderComposer, TypedBuffer};

/// Overlay vertex: NDC position and straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
    /// RGBA color, straight alpha.
    pub color: [f32; 4],
}

impl OverlayVertex {
    /// Vertex buffer layout for pipeline creation.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Immediate-mode rectangle list, rebuilt each frame in pixel space and
/// converted to NDC at push time.
#[derive(Debug)]
pub struct OverlayBatch {
    vertices: Vec<OverlayVertex>,
    viewport_width: f32,
    viewport_height: f32,
}

impl OverlayBatch {
    /// Empty batch for the given viewport size in pixels.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            vertices: Vec::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Append a solid rectangle. `x`/`y` are the top-left corner in screen
    /// pixels; fully transparent or degenerate rects are skipped.
    pub fn push_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [f32; 3],
        alpha: f32,
    ) {
        if alpha <= 0.0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let to_ndc_x = |px: f32| px / self.viewport_width * 2.0 - 1.0;
        let to_ndc_y = |py: f32| 1.0 - py / self.viewport_height * 2.0;

        let (x0, x1) = (to_ndc_x(x), to_ndc_x(x + width));
        let (y0, y1) = (to_ndc_y(y), to_ndc_y(y + height));
        let c = [color[0], color[1], color[2], alpha];

        let v = |px, py| OverlayVertex {
            position: [px, py],
            color: c,
        };
        // Two CCW triangles
        self.vertices.extend_from_slice(&[
            v(x0, y0),
            v(x0, y1),
            v(x1, y1),
            v(x0, y0),
            v(x1, y1),
            v(x1, y0),
        ]);
    }

    /// The accumulated vertices.
    #[must_use]
    pub fn vertices(&self) -> &[OverlayVertex] {
        &self.vertices
    }

    /// Whether nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Pipeline + growable vertex buffer for the overlay.
pub struct OverlayPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: TypedBuffer<OverlayVertex>,
}

impl OverlayPass {
    /// Build the overlay pipeline targeting the surface format.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ShaderCompose`] if the overlay shader fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, ShowcaseError> {
        let shader = shader_composer.compose(
            &context.device,
            "Overlay Shader",
            include_str!("../../assets/shaders/raster/overlay.wgsl"),
            "overlay.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Overlay Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Overlay Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[OverlayVertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        let vertex_buffer = TypedBuffer::with_capacity(
            &context.device,
            "Overlay Vertex Buffer",
            512,
            wgpu::BufferUsages::VERTEX,
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
        })
    }

    /// Upload this frame's batch and encode the overlay pass over the
    /// already-composited surface.
    pub fn render(
        &mut self,
        context: &RenderContext,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        batch: &OverlayBatch,
    ) {
        let _ = self.vertex_buffer.write(
            &context.device,
            &context.queue,
            batch.vertices(),
        );

        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(
                    wgpu::RenderPassColorAttachment {
                        view: surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    },
                )],
                depth_stencil_attachment: None,
                ..Default::default()
            });

        if self.vertex_buffer.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
        pass.draw(0..self.vertex_buffer.count() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_24_bytes() {
        assert_eq!(size_of::<OverlayVertex>(), 24);
    }

    #[test]
    fn test_rect_converts_to_ndc() {
        let mut batch = OverlayBatch::new(800.0, 600.0);
        batch.push_rect(0.0, 0.0, 800.0, 600.0, [1.0, 0.0, 0.0], 1.0);
        assert_eq!(batch.vertices().len(), 6);
        // Top-left corner of a full-screen rect is NDC (-1, 1)
        assert_eq!(batch.vertices()[0].position, [-1.0, 1.0]);
        // Bottom-right is (1, -1)
        assert_eq!(batch.vertices()[2].position, [1.0, -1.0]);
    }

    #[test]
    fn test_invisible_rects_are_skipped() {
        let mut batch = OverlayBatch::new(800.0, 600.0);
        batch.push_rect(0.0, 0.0, 100.0, 100.0, [1.0; 3], 0.0);
        batch.push_rect(0.0, 0.0, 0.0, 100.0, [1.0; 3], 1.0);
        assert!(batch.is_empty());
    }
}

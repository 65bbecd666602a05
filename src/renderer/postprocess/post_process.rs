//! Owns the offscreen scene targets and the noise → output pass chain.

use crate::error::ShowcaseError;
use crate::gpu::{RenderContext, ShaderComposer};
use crate::options::Options;
use crate::renderer::postprocess::noise::NoisePass;
use crate::renderer::postprocess::output::OutputPass;
use crate::renderer::{DEPTH_FORMAT, SCENE_FORMAT};

/// Scene color + depth targets and the post-processing passes that read
/// them.
pub struct PostProcessStack {
    scene_texture: wgpu::Texture,
    scene_view: wgpu::TextureView,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    /// Noise distortion pass.
    pub noise_pass: NoisePass,
    /// Background composite pass.
    pub output_pass: OutputPass,
}

impl PostProcessStack {
    /// Build the scene targets and both passes.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ShaderCompose`] if a pass shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        options: &Options,
    ) -> Result<Self, ShowcaseError> {
        let (scene_texture, scene_view) = Self::create_scene_texture(context);
        let (depth_texture, depth_view) = Self::create_depth_texture(context);

        let noise_pass = NoisePass::new(
            context,
            shader_composer,
            &scene_view,
            &options.post_processing,
        )?;
        let output_pass = OutputPass::new(
            context,
            shader_composer,
            &noise_pass.output_view,
            options.display.background,
        )?;

        Ok(Self {
            scene_texture,
            scene_view,
            depth_texture,
            depth_view,
            noise_pass,
            output_pass,
        })
    }

    /// The color target the scene pass renders into.
    #[must_use]
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene_view
    }

    /// The depth target the scene pass renders into.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Recreate all resolution-dependent resources.
    pub fn resize(&mut self, context: &RenderContext) {
        let (scene_texture, scene_view) = Self::create_scene_texture(context);
        self.scene_texture = scene_texture;
        self.scene_view = scene_view;
        let (depth_texture, depth_view) = Self::create_depth_texture(context);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        self.noise_pass.resize(context, &self.scene_view);
        self.output_pass
            .rebind_input(context, &self.noise_pass.output_view);
    }

    /// Rewrite the per-frame noise uniforms.
    pub fn update(&mut self, queue: &wgpu::Queue, time: f32, effect: f32) {
        self.noise_pass.update(queue, time, effect);
    }

    /// Push option values to both passes.
    pub fn apply_options(&mut self, options: &Options, queue: &wgpu::Queue) {
        self.noise_pass
            .apply_options(queue, &options.post_processing);
        self.output_pass
            .set_background(queue, options.display.background);
    }

    /// Run the noise → output sequence.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
    ) {
        self.noise_pass.render(encoder);
        self.output_pass.render(encoder, surface_view);
    }

    fn create_scene_texture(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture =
            context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Scene Color Texture"),
                size: wgpu::Extent3d {
                    width: context.width(),
                    height: context.height(),
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
        let view =
            texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_depth_texture(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture =
            context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: context.width(),
                    height: context.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
        let view =
            texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}

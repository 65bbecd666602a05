//! The showcase engine: owns all GPU state and drives the page each frame.
//!
//! One engine per window. The engine builds the GPU context, camera, light
//! rig, render passes, and page state, spawns the background model loader,
//! and exposes the per-frame `update`/`render` pair the viewer shell calls.

use std::path::PathBuf;

use glam::{Vec2, Vec3};
use web_time::Instant;

use crate::animation::{EntranceTimeline, NoisePulse};
use crate::camera::OrbitController;
use crate::error::ShowcaseError;
use crate::gpu::{RenderContext, ShaderComposer};
use crate::input::{InputEvent, MouseButton};
use crate::model::{LoaderEvent, ModelLoader};
use crate::options::Options;
use crate::page::{content, PageLayout, PageState, HEADER_HEIGHT};
use crate::renderer::{
    LightRig, MeshPass, OverlayBatch, OverlayPass, PostProcessStack,
};
use crate::scene::ScrollState;
use crate::util::frame_timing::FrameTiming;

/// Pixels of scroll per wheel line (matches typical browser behavior).
pub const SCROLL_PIXELS_PER_LINE: f32 = 60.0;

/// Overlay ink color for the header and copy bars.
const INK: [f32; 3] = [0.08, 0.08, 0.09];
/// Accent color for the new-drop card and the progress fill.
const ACCENT: [f32; 3] = [0.92, 0.28, 0.12];

/// The main rendering engine for the sneaker showcase.
pub struct ShowcaseEngine {
    context: RenderContext,
    orbit: OrbitController,
    lights: LightRig,
    mesh_pass: MeshPass,
    post_process: PostProcessStack,
    overlay_pass: OverlayPass,
    loader: ModelLoader,

    scroll: ScrollState,
    pulse: NoisePulse,
    timeline: EntranceTimeline,
    layout: PageLayout,
    page: PageState,

    frame_timing: FrameTiming,
    start: Instant,
    last_update: Instant,
    cursor: Vec2,
    options: Options,
}

impl ShowcaseEngine {
    /// Build the engine for the given surface target and start loading the
    /// model in the background.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError`] if GPU initialization, shader composition,
    /// or spawning the loader thread fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        model_path: PathBuf,
        options: Options,
    ) -> Result<Self, ShowcaseError> {
        let context = RenderContext::new(window, initial_size).await?;
        log::info!(
            "render context ready: {:?}, {}x{}",
            context.format(),
            context.width(),
            context.height()
        );

        let mut shader_composer = ShaderComposer::new()?;

        let orbit = OrbitController::new(&context, &options.camera);
        let lights = LightRig::new(&context, &options.lighting);
        let mesh_pass = MeshPass::new(
            &context,
            &mut shader_composer,
            &orbit.layout,
            &lights.layout,
        )?;
        let post_process =
            PostProcessStack::new(&context, &mut shader_composer, &options)?;
        let overlay_pass = OverlayPass::new(&context, &mut shader_composer)?;

        let loader = ModelLoader::spawn(model_path)?;

        let viewport_height = initial_size.1 as f32;
        let layout =
            PageLayout::new(initial_size.0 as f32, viewport_height);
        let scroll =
            ScrollState::new(layout.page_height(), viewport_height);
        let pulse = NoisePulse::new(
            web_time::Duration::from_millis(
                options.post_processing.scroll_settle_ms,
            ),
            options.post_processing.effect_smoothing,
        );

        let frame_timing = FrameTiming::new(options.display.target_fps);
        let now = Instant::now();

        Ok(Self {
            context,
            orbit,
            lights,
            mesh_pass,
            post_process,
            overlay_pass,
            loader,
            scroll,
            pulse,
            timeline: EntranceTimeline::new(),
            layout,
            page: PageState::new(),
            frame_timing,
            start: now,
            last_update: now,
            cursor: Vec2::ZERO,
            options,
        })
    }

    /// Feed a platform-agnostic input event.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                if self.orbit.mouse_pressed {
                    self.orbit.rotate(position - self.cursor);
                }
                self.cursor = position;
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.orbit.mouse_pressed = pressed;
                }
            }
            InputEvent::Scroll { delta } => {
                self.scroll.scroll_by(delta);
                self.pulse.on_scroll(Instant::now());
            }
        }
    }

    /// Advance all per-frame state to `now` and upload the uniforms.
    pub fn update(&mut self, now: Instant) {
        self.drain_loader(now);

        let dt = now
            .saturating_duration_since(self.last_update)
            .as_secs_f32();
        self.last_update = now;

        self.orbit.auto_rotate(dt);
        self.orbit.update_gpu(&self.context.queue);

        let camera = &self.orbit.camera;
        let forward = (camera.target - camera.eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        self.lights.update_from_camera(right, up, forward);
        self.lights.update_gpu(&self.context.queue);

        self.mesh_pass.update_transform(
            &self.context.queue,
            self.scroll.yaw(),
            self.timeline.model_rise(now),
        );

        self.pulse.update(now);
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        self.post_process.update(
            &self.context.queue,
            elapsed,
            self.pulse.current(),
        );

        self.page.update_reveals(&self.layout, self.scroll.offset(), now);
    }

    fn drain_loader(&mut self, now: Instant) {
        for event in self.loader.try_iter() {
            match event {
                LoaderEvent::Progress(progress) => {
                    log::trace!(
                        "model progress: {} / {:?}",
                        progress.loaded,
                        progress.total
                    );
                    self.page.on_progress(progress);
                }
                LoaderEvent::Ready(mesh) => {
                    log::debug!(
                        "model ready: {} vertices",
                        mesh.vertices.len()
                    );
                    self.mesh_pass.upload_mesh(&self.context, &mesh);
                    self.timeline.schedule(now);
                }
                LoaderEvent::Failed(message) => {
                    log::error!("model load failed: {message}");
                    self.page.on_failed();
                }
            }
        }
    }

    /// Render one frame: scene pass, noise pass, output composite, page
    /// overlay. Skipped entirely when the FPS cap says to wait.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain needs recovery.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();

        self.mesh_pass.render(
            &mut encoder,
            self.post_process.scene_view(),
            self.post_process.depth_view(),
            &self.orbit.bind_group,
            &self.lights.bind_group,
        );
        self.post_process.render(&mut encoder, &surface_view);

        let batch = self.build_overlay(Instant::now());
        self.overlay_pass.render(
            &self.context,
            &mut encoder,
            &surface_view,
            &batch,
        );

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();

        Ok(())
    }

    /// Resize the surface, offscreen targets, camera aspect, and page
    /// layout. Idempotent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.orbit.resize(width, height);
        self.post_process.resize(&self.context);
        self.layout.resize(width as f32, height as f32);
        self.scroll
            .set_extent(self.layout.page_height(), height as f32);
    }

    /// Apply a new options tree to all subsystems.
    pub fn set_options(&mut self, options: Options) {
        self.orbit.set_options(&options.camera);
        self.lights.apply_options(&options.lighting);
        self.post_process
            .apply_options(&options, &self.context.queue);
        self.pulse = NoisePulse::new(
            web_time::Duration::from_millis(
                options.post_processing.scroll_settle_ms,
            ),
            options.post_processing.effect_smoothing,
        );
        self.frame_timing = FrameTiming::new(options.display.target_fps);
        self.options = options;
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Current options tree.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Build this frame's overlay rectangles: header, new-drop card, copy
    /// bars, and the preloader.
    fn build_overlay(&self, now: Instant) -> OverlayBatch {
        let vw = self.layout.viewport_width();
        let vh = self.layout.viewport_height();
        let mut batch = OverlayBatch::new(vw, vh);
        let scroll = self.scroll.offset();

        // Fixed header bar, sliding in from above on entrance
        let header_y = self.timeline.header_offset(now);
        let header_alpha = self.timeline.header_alpha(now);
        batch.push_rect(
            0.0,
            header_y,
            vw,
            HEADER_HEIGHT,
            INK,
            0.92 * header_alpha,
        );
        // Brand wordmark placeholder
        let brand_w = content::line_width_fraction(content::BRAND) * 220.0;
        batch.push_rect(
            32.0,
            header_y + HEADER_HEIGHT * 0.5 - 9.0,
            brand_w,
            18.0,
            self.options.display.background,
            header_alpha,
        );

        // Hero headline near the bottom of the first section, scrolling
        // with the page and sharing the header's entrance fade
        let headline_w =
            content::line_width_fraction(content::HEADLINE) * vw * 0.55;
        batch.push_rect(
            vw * 0.1,
            vh * 0.72 - scroll,
            headline_w,
            48.0,
            INK,
            header_alpha,
        );

        // New-drop card inside its section, entrance slide + fade
        let card_w = vw * 0.38;
        let card_h = vh * 0.42;
        let card_page_y = self.layout.new_drop_top() + vh * 0.24;
        let card_y =
            card_page_y - scroll + self.timeline.new_drop_offset(now);
        let card_alpha = self.timeline.new_drop_alpha(now);
        batch.push_rect(
            vw * 0.1,
            card_y,
            card_w,
            card_h,
            ACCENT,
            0.95 * card_alpha,
        );
        let label_w = content::line_width_fraction(content::NEW_DROP)
            * card_w
            * 0.8;
        batch.push_rect(
            vw * 0.1 + 28.0,
            card_y + 32.0,
            label_w,
            22.0,
            self.options.display.background,
            card_alpha,
        );

        // Content sections: skeleton copy bars fading in on first view
        for (index, lines) in content::SECTIONS.iter().enumerate() {
            let alpha = self.page.reveal_alpha(index, now);
            let section_y = self.layout.content_top(index) - scroll;
            let column_x = vw * 0.12;
            let column_w = vw * 0.5;
            let mut line_y = section_y + vh * 0.3;
            for line in *lines {
                let w = content::line_width_fraction(line) * column_w;
                batch.push_rect(column_x, line_y, w, 16.0, INK, alpha);
                line_y += 34.0;
            }
        }

        self.push_preloader(&mut batch, now, vw, vh);

        batch
    }

    /// Full-screen preloader backdrop plus centered progress bar. Slides up
    /// out of view on entrance; stalls in place if the load failed.
    fn push_preloader(
        &self,
        batch: &mut OverlayBatch,
        now: Instant,
        vw: f32,
        vh: f32,
    ) {
        let offset = self.timeline.preloader_offset(now);
        if offset <= -1.0 {
            return;
        }
        let top = offset * vh;
        batch.push_rect(0.0, top, vw, vh, INK, 1.0);

        let track_w = vw * 0.3;
        let track_x = (vw - track_w) * 0.5;
        let track_y = top + vh * 0.5 - 3.0;
        batch.push_rect(
            track_x,
            track_y,
            track_w,
            6.0,
            self.options.display.background,
            0.25,
        );
        match self.page.percent() {
            Some(percent) => {
                batch.push_rect(
                    track_x,
                    track_y,
                    track_w * (percent / 100.0),
                    6.0,
                    ACCENT,
                    1.0,
                );
            }
            None => {
                // Indeterminate: a dim full-width fill instead of a NaN bar
                batch.push_rect(track_x, track_y, track_w, 6.0, ACCENT, 0.4);
            }
        }
    }
}

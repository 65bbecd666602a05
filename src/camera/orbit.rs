use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::gpu::RenderContext;
use crate::options::CameraOptions;

/// Maximum pitch magnitude in radians (just shy of the poles).
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera controller with drag rotation and idle auto-rotation.
///
/// The camera orbits the origin at a fixed distance. When the user is not
/// dragging, yaw advances continuously at one revolution per
/// `auto_rotate_period` seconds.
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    rotate_speed: f32,
    auto_rotate_period: f32,

    /// The camera this controller drives.
    pub camera: Camera,
    /// CPU-side uniform mirror.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform (group binding 0).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the camera uniform.
    pub bind_group: wgpu::BindGroup,

    /// Whether the rotate mouse button is currently held.
    pub mouse_pressed: bool,
}

impl OrbitController {
    /// Create the controller and its GPU resources.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: context.config.width as f32
                / context.config.height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: options.distance,
            rotate_speed: options.rotate_speed,
            auto_rotate_period: options.auto_rotate_period,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            mouse_pressed: false,
        }
    }

    fn update_camera_pos(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let dir = Vec3::new(
            sin_yaw * cos_pitch,
            sin_pitch,
            cos_yaw * cos_pitch,
        );

        self.camera.eye = self.camera.target + dir * self.distance;
        self.camera.up = Vec3::Y;
    }

    /// Apply a mouse drag delta (pixels) as a yaw/pitch rotation.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.rotate_speed;
        self.pitch = (self.pitch + delta.y * self.rotate_speed)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_camera_pos();
    }

    /// Advance auto-rotation. Runs every frame, drag or not.
    pub fn auto_rotate(&mut self, dt: f32) {
        if self.auto_rotate_period <= 0.0 {
            return;
        }
        self.yaw += TAU / self.auto_rotate_period * dt;
        if self.yaw > TAU {
            self.yaw -= TAU;
        }
        self.update_camera_pos();
    }

    /// Update the viewport aspect ratio after a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Apply new camera options without resetting the current orbit angles.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.distance = options.distance;
        self.rotate_speed = options.rotate_speed;
        self.auto_rotate_period = options.auto_rotate_period;
        self.update_camera_pos();
    }

    /// Refresh the uniform from camera state and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Current yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

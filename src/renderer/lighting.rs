//! Camera-relative light rig.
//!
//! One ambient term plus three white directional lights (key, fill, back).
//! Offsets are fixed in camera space and rotated into world space by the
//! camera basis every frame, so the sneaker stays lit the same way from any
//! orbit angle.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::RenderContext;
use crate::options::LightingOptions;

/// Key light camera-space offset.
const KEY_OFFSET: Vec3 = Vec3::new(-1.0, 1.0, 3.0);
/// Fill light camera-space offset.
const FILL_OFFSET: Vec3 = Vec3::new(1.0, 1.0, 3.0);
/// Back light camera-space offset.
const BACK_OFFSET: Vec3 = Vec3::new(-1.0, 3.0, -1.0);

/// Lighting data shared with the mesh shader.
/// NOTE: Must match the WGSL struct layout exactly (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Key light direction, surface toward light (normalized).
    pub key_dir: [f32; 3],
    /// Key light intensity.
    pub key_intensity: f32,
    /// Fill light direction (normalized).
    pub fill_dir: [f32; 3],
    /// Fill light intensity.
    pub fill_intensity: f32,
    /// Back light direction (normalized).
    pub back_dir: [f32; 3],
    /// Back light intensity.
    pub back_intensity: f32,
    /// Ambient light color (linear RGB).
    pub ambient_color: [f32; 3],
    /// Ambient intensity multiplier.
    pub ambient_intensity: f32,
}

impl LightingUniform {
    fn from_options(options: &LightingOptions) -> Self {
        Self {
            key_dir: KEY_OFFSET.normalize().to_array(),
            key_intensity: options.key_intensity,
            fill_dir: FILL_OFFSET.normalize().to_array(),
            fill_intensity: options.fill_intensity,
            back_dir: BACK_OFFSET.normalize().to_array(),
            back_intensity: options.back_intensity,
            ambient_color: options.ambient_color,
            ambient_intensity: options.ambient_intensity,
        }
    }
}

/// Owns the lighting uniform and its GPU binding.
pub struct LightRig {
    /// CPU-side uniform mirror.
    pub uniform: LightingUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the lighting uniform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for the lighting uniform.
    pub bind_group: wgpu::BindGroup,
}

impl LightRig {
    /// Create the rig and its GPU resources.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Lighting Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Rotate the camera-space light offsets into world space.
    ///
    /// `forward` points from the eye toward the target; camera space has +z
    /// toward the viewer, so the basis uses `-forward` for z.
    pub fn update_from_camera(
        &mut self,
        camera_right: Vec3,
        camera_up: Vec3,
        camera_forward: Vec3,
    ) {
        self.uniform.key_dir =
            world_dir(KEY_OFFSET, camera_right, camera_up, camera_forward)
                .to_array();
        self.uniform.fill_dir =
            world_dir(FILL_OFFSET, camera_right, camera_up, camera_forward)
                .to_array();
        self.uniform.back_dir =
            world_dir(BACK_OFFSET, camera_right, camera_up, camera_forward)
                .to_array();
    }

    /// Push intensity/color option values into the uniform.
    pub fn apply_options(&mut self, options: &LightingOptions) {
        self.uniform.key_intensity = options.key_intensity;
        self.uniform.fill_intensity = options.fill_intensity;
        self.uniform.back_intensity = options.back_intensity;
        self.uniform.ambient_color = options.ambient_color;
        self.uniform.ambient_intensity = options.ambient_intensity;
    }

    /// Upload the uniform to the GPU.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

fn world_dir(
    offset: Vec3,
    camera_right: Vec3,
    camera_up: Vec3,
    camera_forward: Vec3,
) -> Vec3 {
    let o = offset.normalize();
    (camera_right * o.x + camera_up * o.y - camera_forward * o.z).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_64_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 64);
    }

    #[test]
    fn test_identity_basis_keeps_camera_space_offsets() {
        // Camera at +Z looking at origin: forward = -Z, so camera space
        // matches world space and the key light stays upper-left-front.
        let key = world_dir(KEY_OFFSET, Vec3::X, Vec3::Y, -Vec3::Z);
        assert!((key - KEY_OFFSET.normalize()).length() < 1e-6);
    }

    #[test]
    fn test_rig_rotates_with_camera() {
        // Camera on +X looking at origin: forward = -X, right = -Z (RH
        // with up = +Y). A light straight behind the camera (+z in camera
        // space) lands on +X in world space.
        let dir = world_dir(
            Vec3::new(0.0, 0.0, 1.0),
            -Vec3::Z,
            Vec3::Y,
            -Vec3::X,
        );
        assert!((dir - Vec3::X).length() < 1e-6);
    }
}

use glam::Vec3;

/// CPU-side mesh vertex: position, normal, and per-vertex base color.
///
/// Must match the WGSL vertex layout in `raster/mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Linear RGB base color baked from the source material.
    pub color: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout for pipeline creation.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// All primitives of the imported model merged into one indexed mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Merged vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Merged triangle list (indices rebased across primitives).
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned bounding box center of all vertex positions.
    pub fn center(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_36_bytes() {
        assert_eq!(size_of::<MeshVertex>(), 36);
    }

    #[test]
    fn test_center_of_unit_span() {
        let mk = |p: [f32; 3]| MeshVertex {
            position: p,
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 3],
        };
        let mesh = MeshData {
            vertices: vec![mk([0.0, 0.0, 0.0]), mk([2.0, 4.0, 6.0])],
            indices: vec![],
        };
        assert_eq!(mesh.center(), Vec3::new(1.0, 2.0, 3.0));
    }
}

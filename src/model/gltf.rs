//! Binary glTF (GLB) decoding into a single merged mesh.

use gltf::mesh::util::ReadIndices;

use crate::error::ShowcaseError;
use crate::model::mesh::{MeshData, MeshVertex};

/// Decode a binary glTF blob and merge all primitives into a single mesh.
///
/// Material base colors are baked into per-vertex colors; primitives without
/// normals get a constant up normal.
///
/// # Errors
///
/// Returns [`ShowcaseError::ModelLoad`] if the blob is not valid glTF or
/// contains no geometry.
pub fn decode_glb(bytes: &[u8]) -> Result<MeshData, ShowcaseError> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)
        .map_err(|e| ShowcaseError::ModelLoad(format!("glTF import: {e}")))?;

    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for mesh in doc.meshes() {
        for prim in mesh.primitives() {
            let reader = prim
                .reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
            let pos = match reader.read_positions() {
                Some(it) => it.collect::<Vec<[f32; 3]>>(),
                None => continue,
            };
            let nrm: Vec<[f32; 3]> = match reader.read_normals() {
                Some(it) => it.collect(),
                None => vec![[0.0, 1.0, 0.0]; pos.len()],
            };

            let base_color = prim
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            let color = [base_color[0], base_color[1], base_color[2]];

            let start = vertices.len() as u32;
            for i in 0..pos.len() {
                vertices.push(MeshVertex {
                    position: pos[i],
                    normal: nrm[i],
                    color,
                });
            }

            match reader.read_indices() {
                Some(ReadIndices::U8(it)) => {
                    indices.extend(it.map(|v| start + u32::from(v)));
                }
                Some(ReadIndices::U16(it)) => {
                    indices.extend(it.map(|v| start + u32::from(v)));
                }
                Some(ReadIndices::U32(it)) => {
                    indices.extend(it.map(|v| start + v));
                }
                None => {
                    indices.extend((0..pos.len() as u32).map(|i| start + i));
                }
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        return Err(ShowcaseError::ModelLoad(
            "no geometry found in model".to_string(),
        ));
    }

    Ok(MeshData { vertices, indices })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a minimal valid GLB containing one indexed triangle with a
    /// red-ish base color material.
    pub(crate) fn triangle_glb() -> Vec<u8> {
        // BIN chunk: 3 positions (36 bytes) + 3 u16 indices (6 bytes),
        // padded to a multiple of 4.
        let positions: [[f32; 3]; 3] =
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let mut bin: Vec<u8> = Vec::new();
        for p in &positions {
            for c in p {
                bin.extend_from_slice(&c.to_le_bytes());
            }
        }
        for i in [0u16, 1, 2] {
            bin.extend_from_slice(&i.to_le_bytes());
        }
        while bin.len() % 4 != 0 {
            bin.push(0);
        }

        let json = serde_json::json!({
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": bin.len()}],
            "bufferViews": [
                {"buffer": 0, "byteOffset": 0, "byteLength": 36},
                {"buffer": 0, "byteOffset": 36, "byteLength": 6}
            ],
            "accessors": [
                {
                    "bufferView": 0,
                    "componentType": 5126,
                    "count": 3,
                    "type": "VEC3",
                    "min": [0.0, 0.0, 0.0],
                    "max": [1.0, 1.0, 0.0]
                },
                {
                    "bufferView": 1,
                    "componentType": 5123,
                    "count": 3,
                    "type": "SCALAR"
                }
            ],
            "materials": [{
                "pbrMetallicRoughness": {
                    "baseColorFactor": [1.0, 0.5, 0.25, 1.0]
                }
            }],
            "meshes": [{
                "primitives": [{
                    "attributes": {"POSITION": 0},
                    "indices": 1,
                    "material": 0
                }]
            }],
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0}],
            "scene": 0
        });
        let mut json_bytes = serde_json::to_vec(&json).unwrap();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }

        let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
        let mut glb: Vec<u8> = Vec::with_capacity(total);
        glb.extend_from_slice(&0x4654_6C67u32.to_le_bytes()); // "glTF"
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F_534Au32.to_le_bytes()); // "JSON"
        glb.extend_from_slice(&json_bytes);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E_4942u32.to_le_bytes()); // "BIN\0"
        glb.extend_from_slice(&bin);
        glb
    }

    #[test]
    fn test_decodes_indexed_triangle() {
        let glb = triangle_glb();
        let mesh = decode_glb(&glb).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        // Missing normals fall back to up
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
        // Material base color baked into vertices
        assert_eq!(mesh.vertices[0].color, [1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = decode_glb(b"not a model").unwrap_err();
        assert!(matches!(err, ShowcaseError::ModelLoad(_)));
    }
}

//! Binary STL export.
//!
//! Meshes are generated in millimetres; STL carries no units, so consumers
//! conventionally read them as mm as well.

use shedwright_mesh::TriMesh;

use crate::Model;

/// Serialize triangle meshes into one binary STL document.
pub fn stl_bytes<'a>(meshes: impl IntoIterator<Item = &'a TriMesh>) -> Vec<u8> {
    let meshes: Vec<&TriMesh> = meshes.into_iter().collect();
    let num_triangles: usize = meshes.iter().map(|m| m.indices.len() / 3).sum();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    let mut header = [b' '; 80];
    header[..20].copy_from_slice(b"shedwright STLExport");
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for mesh in meshes {
        for tri in mesh.indices.chunks(3) {
            let v = |i: u32| {
                let o = i as usize * 3;
                [
                    mesh.vertices[o] as f32,
                    mesh.vertices[o + 1] as f32,
                    mesh.vertices[o + 2] as f32,
                ]
            };
            let (v0, v1, v2) = (v(tri[0]), v(tri[1]), v(tri[2]));

            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let nx = e1[1] * e2[2] - e1[2] * e2[1];
            let ny = e1[2] * e2[0] - e1[0] * e2[2];
            let nz = e1[0] * e2[1] - e1[1] * e2[0];
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let n = if len > 1e-10 {
                [nx / len, ny / len, nz / len]
            } else {
                [0.0, 0.0, 1.0]
            };

            for c in n {
                data.extend_from_slice(&c.to_le_bytes());
            }
            for vert in [v0, v1, v2] {
                for c in vert {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            // attribute byte count
            data.extend_from_slice(&0u16.to_le_bytes());
        }
    }
    data
}

/// Serialize a whole model into one binary STL document.
pub fn model_stl_bytes(model: &Model) -> Vec<u8> {
    stl_bytes(model.pieces.iter().map(|p| &p.mesh))
}

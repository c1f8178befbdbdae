//! STL encoding of plate meshes, binary and ASCII.

use plate_kernel::RenderMesh;

use crate::errors::ExportError;

type Triangle = ([f32; 3], [[f32; 3]; 3]);

/// Flat normal and corners of every triangle, after checking the indices.
fn triangles(mesh: &RenderMesh) -> Result<Vec<Triangle>, ExportError> {
    let tri_count = mesh.triangle_count();
    if tri_count == 0 {
        return Err(ExportError::InvalidMesh {
            reason: "mesh has no triangles".to_string(),
        });
    }

    let vertex_count = mesh.vertices.len() / 3;
    if let Some(&idx) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(ExportError::InvalidMesh {
            reason: format!("index {idx} out of range (vertex count = {vertex_count})"),
        });
    }

    let corner = |i: u32| {
        let b = i as usize * 3;
        [mesh.vertices[b], mesh.vertices[b + 1], mesh.vertices[b + 2]]
    };

    Ok(mesh
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let v = [corner(tri[0]), corner(tri[1]), corner(tri[2])];
            (face_normal(&v), v)
        })
        .collect())
}

fn face_normal(v: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = [v[1][0] - v[0][0], v[1][1] - v[0][1], v[1][2] - v[0][2]];
    let b = [v[2][0] - v[0][0], v[2][1] - v[0][1], v[2][2] - v[0][2]];
    let n = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}

/// Encode a mesh as binary STL.
///
/// Layout: 80-byte header, u32 LE triangle count, then per triangle a normal,
/// three vertices (all f32 LE) and a zero u16 attribute, 50 bytes each.
pub fn export_binary_stl(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, ExportError> {
    let tris = triangles(mesh)?;
    let mut buf = Vec::with_capacity(84 + tris.len() * 50);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tris.len() as u32).to_le_bytes());
    for (normal, corners) in &tris {
        for c in normal.iter().chain(corners.iter().flatten()) {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(buf)
}

/// Encode a mesh as ASCII STL.
pub fn export_ascii_stl(mesh: &RenderMesh, name: &str) -> Result<String, ExportError> {
    let tris = triangles(mesh)?;
    let mut out = String::with_capacity(tris.len() * 300);
    out.push_str(&format!("solid {name}\n"));

    for ([nx, ny, nz], corners) in &tris {
        out.push_str(&format!("  facet normal {nx} {ny} {nz}\n"));
        out.push_str("    outer loop\n");
        for [x, y, z] in corners {
            out.push_str(&format!("      vertex {x} {y} {z}\n"));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    Ok(out)
}

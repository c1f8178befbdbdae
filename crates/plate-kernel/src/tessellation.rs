//! Tessellation of truck solids into RenderMesh.
//!
//! Wraps truck-meshalgo. Faces are meshed one at a time so that reversed
//! faces can be re-oriented before their triangles are appended.

use crate::types::*;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a single RenderMesh.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<RenderMesh, KernelError> {
    if tolerance <= 0.0 {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {tolerance}"),
        });
    }
    let meshed_solid = solid.triangulation(tolerance);
    let mut mesh = RenderMesh::default();

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                continue;
            };

            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };
            append_polygon(&mut mesh, &face_mesh);
        }
    }

    if mesh.vertices.is_empty() {
        return tessellate_solid_merged(solid, tolerance);
    }
    Ok(mesh)
}

/// Fallback tessellation: merge everything into a single PolygonMesh.
fn tessellate_solid_merged(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<RenderMesh, KernelError> {
    use truck_meshalgo::tessellation::MeshedShape;

    let polygon = solid.triangulation(tolerance).to_polygon();
    let mut mesh = RenderMesh::default();
    append_polygon(&mut mesh, &polygon);

    if mesh.indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "truck produced no triangles".to_string(),
        });
    }
    Ok(mesh)
}

fn append_polygon(mesh: &mut RenderMesh, polygon: &PolygonMesh) {
    let base_vertex = (mesh.vertices.len() / 3) as u32;
    let positions = polygon.positions();
    let normals = polygon.normals();

    for pos in positions {
        mesh.vertices.push(pos[0] as f32);
        mesh.vertices.push(pos[1] as f32);
        mesh.vertices.push(pos[2] as f32);
    }

    // Normals are indexed separately in truck; only take them when they line
    // up one-to-one with positions.
    if normals.len() == positions.len() {
        for norm in normals {
            mesh.normals.push(norm[0] as f32);
            mesh.normals.push(norm[1] as f32);
            mesh.normals.push(norm[2] as f32);
        }
    } else {
        for _ in 0..positions.len() {
            mesh.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
        }
    }

    for tri in polygon.tri_faces() {
        for v in tri.iter() {
            mesh.indices.push(v.pos as u32 + base_vertex);
        }
    }
    // Quads appear on planar faces; split them along a diagonal.
    for quad in polygon.quad_faces() {
        let q: Vec<u32> = quad.iter().map(|v| v.pos as u32 + base_vertex).collect();
        mesh.indices.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
    }
}

//! Boundary extraction for box-set solids.
//!
//! All box coordinates are gathered into one global grid per axis. Each grid
//! cell is either filled or empty, and a quad is emitted wherever a filled
//! cell faces an empty one. Faces shared between touching boxes never reach
//! the surface, and the common grid keeps it free of T-junctions.

use std::collections::HashMap;

use crate::types::{Aabb, RenderMesh, PLANE_EPS};

/// Outer surface of a box-set solid as shared-vertex quads.
#[derive(Debug, Clone, Default)]
pub struct BoundarySurface {
    pub points: Vec<[f64; 3]>,
    /// Corner indices, counter-clockwise seen from outside.
    pub quads: Vec<[u32; 4]>,
    /// Outward unit normal per quad.
    pub normals: Vec<[f32; 3]>,
}

impl BoundarySurface {
    /// Triangulate into a RenderMesh with flat per-face normals.
    pub fn to_mesh(&self) -> RenderMesh {
        let mut mesh = RenderMesh::default();
        for (quad, normal) in self.quads.iter().zip(&self.normals) {
            let base = (mesh.vertices.len() / 3) as u32;
            for &corner in quad {
                let p = self.points[corner as usize];
                mesh.vertices.extend(p.iter().map(|&c| c as f32));
                mesh.normals.extend_from_slice(normal);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

/// Build the outer surface mesh of a union of disjoint boxes.
pub fn boundary_mesh(boxes: &[Aabb]) -> RenderMesh {
    boundary_surface(boxes).to_mesh()
}

/// Extract the outer surface of a union of disjoint boxes.
pub fn boundary_surface(boxes: &[Aabb]) -> BoundarySurface {
    if boxes.is_empty() {
        return BoundarySurface::default();
    }

    let axes: [Vec<f64>; 3] = [0, 1, 2].map(|a| grid_lines(boxes, a));
    let dims = [axes[0].len() - 1, axes[1].len() - 1, axes[2].len() - 1];
    let cell = |i: usize, j: usize, k: usize| (k * dims[1] + j) * dims[0] + i;

    let mut filled = vec![false; dims[0] * dims[1] * dims[2]];
    for b in boxes {
        let [x, y, z] = [0, 1, 2].map(|a| span(&axes[a], b.min[a], b.max[a]));
        for k in z.clone() {
            for j in y.clone() {
                for i in x.clone() {
                    filled[cell(i, j, k)] = true;
                }
            }
        }
    }

    let mut builder = SurfaceBuilder {
        axes: &axes,
        lookup: HashMap::new(),
        surface: BoundarySurface::default(),
    };
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                if !filled[cell(i, j, k)] {
                    continue;
                }
                let idx = [i, j, k];
                for axis in 0..3 {
                    for positive in [false, true] {
                        let mut n = idx;
                        let open = if positive {
                            n[axis] += 1;
                            n[axis] == dims[axis] || !filled[cell(n[0], n[1], n[2])]
                        } else if idx[axis] == 0 {
                            true
                        } else {
                            n[axis] -= 1;
                            !filled[cell(n[0], n[1], n[2])]
                        };
                        if open {
                            builder.push_quad(idx, axis, positive);
                        }
                    }
                }
            }
        }
    }
    builder.surface
}

/// Sorted, deduplicated box planes along one axis.
fn grid_lines(boxes: &[Aabb], axis: usize) -> Vec<f64> {
    let mut lines: Vec<f64> = boxes
        .iter()
        .flat_map(|b| [b.min[axis], b.max[axis]])
        .collect();
    lines.sort_by(|a, b| a.total_cmp(b));
    lines.dedup_by(|a, b| (*a - *b).abs() < PLANE_EPS);
    lines
}

/// Cell index range covered by `[lo, hi]` on a grid axis.
fn span(lines: &[f64], lo: f64, hi: f64) -> std::ops::Range<usize> {
    let find = |v: f64| {
        lines
            .iter()
            .position(|&l| (l - v).abs() < PLANE_EPS)
            .unwrap_or_else(|| lines.partition_point(|&l| l < v))
    };
    find(lo)..find(hi)
}

struct SurfaceBuilder<'a> {
    axes: &'a [Vec<f64>; 3],
    lookup: HashMap<[usize; 3], u32>,
    surface: BoundarySurface,
}

impl SurfaceBuilder<'_> {
    fn point(&mut self, grid: [usize; 3]) -> u32 {
        if let Some(&i) = self.lookup.get(&grid) {
            return i;
        }
        let i = self.surface.points.len() as u32;
        self.surface.points.push([
            self.axes[0][grid[0]],
            self.axes[1][grid[1]],
            self.axes[2][grid[2]],
        ]);
        self.lookup.insert(grid, i);
        i
    }

    /// Append the face of cell `idx` on the `positive`/negative side of `axis`.
    fn push_quad(&mut self, idx: [usize; 3], axis: usize, positive: bool) {
        let u = (axis + 1) % 3;
        let v = (axis + 2) % 3;

        // Counter-clockwise in (u, v) faces +axis, since u x v = axis for cyclic axes.
        let mut steps = [(0, 0), (1, 0), (1, 1), (0, 1)];
        if !positive {
            steps.reverse();
        }

        let mut quad = [0u32; 4];
        for (slot, (du, dv)) in quad.iter_mut().zip(steps) {
            let mut g = idx;
            g[axis] += usize::from(positive);
            g[u] += du;
            g[v] += dv;
            *slot = self.point(g);
        }

        let mut normal = [0.0f32; 3];
        normal[axis] = if positive { 1.0 } else { -1.0 };
        self.surface.quads.push(quad);
        self.surface.normals.push(normal);
    }
}

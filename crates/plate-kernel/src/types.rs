use serde::{Deserialize, Serialize};

/// Coordinates closer than this are treated as the same plane.
pub const PLANE_EPS: f64 = 1e-9;

/// Opaque handle to a solid owned by a geometry provider.
/// Valid only for the provider that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from geometry provider operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("invalid box: {reason}")]
    InvalidBox { reason: String },

    #[error("solid not found: {handle:?}")]
    SolidNotFound { handle: SolidHandle },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },
}

/// Axis-aligned box `[min, max]` in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    /// Box from an origin corner and a size vector.
    pub fn from_origin_size(origin: [f64; 3], size: [f64; 3]) -> Self {
        Self {
            min: origin,
            max: [
                origin[0] + size[0],
                origin[1] + size[1],
                origin[2] + size[2],
            ],
        }
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn volume(&self) -> f64 {
        let s = self.size();
        if s.iter().any(|&d| d <= 0.0) {
            return 0.0;
        }
        s[0] * s[1] * s[2]
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0.0
    }

    /// Interior intersection. Boxes that only touch on a face do not intersect.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            min[i] = self.min[i].max(other.min[i]);
            max[i] = self.max[i].min(other.max[i]);
            if max[i] <= min[i] {
                return None;
            }
        }
        Some(Aabb { min, max })
    }

    /// Closed containment test with tolerance.
    pub fn contains_point(&self, p: [f64; 3], tol: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - tol && p[i] <= self.max[i] + tol)
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            min[i] = min[i].min(other.min[i]);
            max[i] = max[i].max(other.max[i]);
        }
        Aabb { min, max }
    }

    /// `self - other`, as at most six pairwise disjoint boxes.
    ///
    /// Slabs are peeled off along x, then y, then z, so the pieces never overlap.
    /// Overlaps and slabs thinner than [`PLANE_EPS`] are treated as planes that
    /// coincide: the overlap leaves `self` whole and the slab is dropped.
    pub fn subtract(&self, other: &Aabb) -> Vec<Aabb> {
        let Some(hole) = self.intersection(other) else {
            return vec![*self];
        };
        if (0..3).any(|i| hole.max[i] - hole.min[i] <= PLANE_EPS) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(6);
        let mut rest = *self;
        for axis in 0..3 {
            if hole.min[axis] - rest.min[axis] > PLANE_EPS {
                let mut low = rest;
                low.max[axis] = hole.min[axis];
                pieces.push(low);
            }
            if rest.max[axis] - hole.max[axis] > PLANE_EPS {
                let mut high = rest;
                high.min[axis] = hole.max[axis];
                pieces.push(high);
            }
            rest.min[axis] = hole.min[axis];
            rest.max[axis] = hole.max[axis];
        }
        pieces
    }
}

/// Triangle mesh produced by tessellation, ready for STL export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of vertex normals, parallel to `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Enclosed volume via the divergence theorem.
    /// Only meaningful for closed, outward-oriented meshes.
    pub fn signed_volume(&self) -> f64 {
        let v = |i: u32| {
            let b = i as usize * 3;
            [
                self.vertices[b] as f64,
                self.vertices[b + 1] as f64,
                self.vertices[b + 2] as f64,
            ]
        };
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let (a, b, c) = (v(tri[0]), v(tri[1]), v(tri[2]));
                (a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
                    + a[2] * (b[0] * c[1] - b[1] * c[0]))
                    / 6.0
            })
            .sum()
    }

    /// Bounding box of all vertices, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let mut points = self.vertices.chunks_exact(3);
        let first = points.next()?;
        let mut bb = Aabb {
            min: [first[0] as f64, first[1] as f64, first[2] as f64],
            max: [first[0] as f64, first[1] as f64, first[2] as f64],
        };
        for p in points {
            let q = [p[0] as f64, p[1] as f64, p[2] as f64];
            bb = bb.union(&Aabb { min: q, max: q });
        }
        Some(bb)
    }
}

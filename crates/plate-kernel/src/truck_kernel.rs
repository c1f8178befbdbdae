//! TruckKernel: B-rep geometry provider wrapping truck's API.

use crate::boundary;
use crate::primitives;
use crate::tessellation;
use crate::traits::{SolidGeometryProvider, SolidIntrospect};
use crate::types::*;
use std::collections::HashMap;

use truck_modeling::geometry::{Curve, Line, Plane, Surface};
use truck_modeling::topology::{Edge, Face, Shell, Solid, Vertex, Wire};
use truck_modeling::Point3;

/// Tolerance handed to truck's boolean operations.
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Tessellation tolerance used for volume measurement.
const VOLUME_TOLERANCE: f64 = 0.01;

/// Real geometry kernel backed by the truck BREP library.
///
/// truck's shape operations do not handle coplanar faces reliably, so this
/// kernel is best used to re-express finished plates for STEP export.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub fn get_solid(&self, handle: &SolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::SolidNotFound {
                handle: handle.clone(),
            })
    }

    /// Build a planar B-rep from a box-set solid's outer surface.
    ///
    /// Coincident grid vertices and edges are shared between faces, so the
    /// resulting shell is closed. Shells with non-manifold edges (cells that
    /// touch only along an edge) are kept unchecked rather than rejected.
    pub fn import_boxes(&mut self, boxes: &[Aabb]) -> Result<SolidHandle, KernelError> {
        let surface = boundary::boundary_surface(boxes);
        if surface.quads.is_empty() {
            return Err(KernelError::InvalidBox {
                reason: "cannot import an empty solid".to_string(),
            });
        }

        let points: Vec<Point3> = surface
            .points
            .iter()
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        let vertices: Vec<Vertex> = points.iter().map(|&p| Vertex::new(p)).collect();
        let mut edges: HashMap<(u32, u32), Edge> = HashMap::new();

        let mut faces = Vec::with_capacity(surface.quads.len());
        for quad in &surface.quads {
            let mut wire_edges = Vec::with_capacity(4);
            for i in 0..4 {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                let key = (a.min(b), a.max(b));
                let edge = edges.entry(key).or_insert_with(|| {
                    let (s, e) = (key.0 as usize, key.1 as usize);
                    Edge::new(
                        &vertices[s],
                        &vertices[e],
                        Curve::Line(Line(points[s], points[e])),
                    )
                });
                wire_edges.push(if a < b { edge.clone() } else { edge.inverse() });
            }
            let wire = Wire::from_iter(wire_edges);
            let [p0, p1, _, p3] = quad.map(|c| points[c as usize]);
            let face = Face::try_new(vec![wire], Surface::Plane(Plane::new(p0, p1, p3)))
                .map_err(|e| KernelError::InvalidBox {
                    reason: format!("failed to build planar face: {e}"),
                })?;
            faces.push(face);
        }

        let shell: Shell = faces.into();
        let solid = match Solid::try_new(vec![shell.clone()]) {
            Ok(solid) => solid,
            Err(e) => {
                tracing::debug!(error = %e, "imported shell is not manifold, keeping it unchecked");
                Solid::new_unchecked(vec![shell])
            }
        };
        Ok(self.store_solid(solid))
    }

    /// Serialize a solid as an AP203 STEP document.
    pub fn export_step(&self, handle: &SolidHandle, file_name: &str) -> Result<String, KernelError> {
        use truck_stepio::out::{CompleteStepDisplay, StepHeaderDescriptor, StepModel};

        let compressed = self.get_solid(handle)?.compress();
        let display = CompleteStepDisplay::new(
            StepModel::from(&compressed),
            StepHeaderDescriptor {
                file_name: file_name.to_string(),
                organization_system: "marker-plates".to_string(),
                ..Default::default()
            },
        );
        Ok(display.to_string())
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl SolidGeometryProvider for TruckKernel {
    fn make_box(
        &mut self,
        size: [f64; 3],
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        if size.iter().any(|&d| !d.is_finite() || d <= 0.0)
            || origin.iter().any(|v| !v.is_finite())
        {
            return Err(KernelError::InvalidBox {
                reason: format!("truck boxes need finite positive extents, got {size:?}"),
            });
        }
        Ok(self.store_solid(primitives::make_box(size, origin)))
    }

    fn cut(
        &mut self,
        target: &SolidHandle,
        tool: &SolidHandle,
    ) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get_solid(target)?.clone();
        let mut solid_b = self.get_solid(tool)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result = truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
            KernelError::BooleanFailed {
                reason: "truck and() returned None for subtraction".to_string(),
            }
        })?;
        Ok(self.store_solid(result))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        tessellation::tessellate_solid(self.get_solid(solid)?, tolerance)
    }

    fn release(&mut self, solid: &SolidHandle) {
        self.solids.remove(&solid.id());
    }
}

impl SolidIntrospect for TruckKernel {
    fn volume(&self, solid: &SolidHandle) -> Result<f64, KernelError> {
        let mesh = tessellation::tessellate_solid(self.get_solid(solid)?, VOLUME_TOLERANCE)?;
        Ok(mesh.signed_volume())
    }

    fn bounding_box(&self, solid: &SolidHandle) -> Result<Option<Aabb>, KernelError> {
        Ok(primitives::vertex_bounds(self.get_solid(solid)?).map(|(min, max)| Aabb { min, max }))
    }
}

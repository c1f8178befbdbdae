use crate::types::*;

/// Solid construction capability the plate pipeline is written against.
/// Implemented by BoxKernel (exact box-set CSG) and TruckKernel (truck B-rep).
pub trait SolidGeometryProvider {
    /// Create an axis-aligned box with its minimum corner at `origin`.
    fn make_box(&mut self, size: [f64; 3], origin: [f64; 3])
        -> Result<SolidHandle, KernelError>;

    /// Boolean subtraction: `target` minus `tool`, as a new solid.
    /// Both inputs stay valid and unchanged.
    fn cut(
        &mut self,
        target: &SolidHandle,
        tool: &SolidHandle,
    ) -> Result<SolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Drop a solid the caller no longer needs. Unknown handles are ignored.
    fn release(&mut self, solid: &SolidHandle);
}

/// Read-only measurements on provider solids.
pub trait SolidIntrospect {
    /// Enclosed volume.
    fn volume(&self, solid: &SolidHandle) -> Result<f64, KernelError>;

    /// Axis-aligned bounds, `None` for an empty solid.
    fn bounding_box(&self, solid: &SolidHandle) -> Result<Option<Aabb>, KernelError>;

    fn is_empty(&self, solid: &SolidHandle) -> Result<bool, KernelError> {
        Ok(self.bounding_box(solid)?.is_none())
    }
}

/// Combined trait for callers that build solids and then measure them.
pub trait GeometryBundle: SolidGeometryProvider + SolidIntrospect {
    fn as_introspect(&self) -> &dyn SolidIntrospect;
}

impl<T: SolidGeometryProvider + SolidIntrospect> GeometryBundle for T {
    fn as_introspect(&self) -> &dyn SolidIntrospect {
        self
    }
}

//! BoxKernel: exact CSG over unions of axis-aligned boxes.
//!
//! Every solid is stored as a list of interior-disjoint boxes. Subtraction
//! splits each box around the tool, so results are exact for the rectilinear
//! geometry marker plates are made of, including coplanar faces.

use std::collections::HashMap;

use tracing::trace;

use crate::boundary;
use crate::traits::{SolidGeometryProvider, SolidIntrospect};
use crate::types::*;

/// Geometry provider backed by box decomposition.
pub struct BoxKernel {
    next_handle: u64,
    solids: HashMap<u64, Vec<Aabb>>,
}

impl BoxKernel {
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

    fn store(&mut self, boxes: Vec<Aabb>) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), boxes);
        handle
    }

    /// Number of solids currently held.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// The disjoint boxes making up a solid.
    pub fn boxes(&self, solid: &SolidHandle) -> Result<&[Aabb], KernelError> {
        self.solids
            .get(&solid.id())
            .map(Vec::as_slice)
            .ok_or_else(|| KernelError::SolidNotFound {
                handle: solid.clone(),
            })
    }

    /// Whether `p` lies inside or on the boundary of the solid.
    pub fn contains_point(&self, solid: &SolidHandle, p: [f64; 3]) -> Result<bool, KernelError> {
        Ok(self
            .boxes(solid)?
            .iter()
            .any(|b| b.contains_point(p, PLANE_EPS)))
    }

    /// Material column at `(x, y)`: total filled length along z.
    pub fn thickness_at(&self, solid: &SolidHandle, x: f64, y: f64) -> Result<f64, KernelError> {
        Ok(self
            .boxes(solid)?
            .iter()
            .filter(|b| x > b.min[0] && x < b.max[0] && y > b.min[1] && y < b.max[1])
            .map(|b| b.max[2] - b.min[2])
            .sum())
    }

    /// Highest material point above `(x, y)`, if any.
    pub fn top_at(&self, solid: &SolidHandle, x: f64, y: f64) -> Result<Option<f64>, KernelError> {
        Ok(self
            .boxes(solid)?
            .iter()
            .filter(|b| x > b.min[0] && x < b.max[0] && y > b.min[1] && y < b.max[1])
            .map(|b| b.max[2])
            .fold(None, |acc: Option<f64>, z| Some(acc.map_or(z, |a| a.max(z)))))
    }
}

impl Default for BoxKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl SolidGeometryProvider for BoxKernel {
    fn make_box(
        &mut self,
        size: [f64; 3],
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        if size.iter().chain(origin.iter()).any(|v| !v.is_finite()) {
            return Err(KernelError::InvalidBox {
                reason: format!("non-finite box size {size:?} at {origin:?}"),
            });
        }
        // Zero or negative extents give an empty solid, which cuts as a no-op.
        let bb = Aabb::from_origin_size(origin, size);
        let boxes = if bb.is_empty() { Vec::new() } else { vec![bb] };
        Ok(self.store(boxes))
    }

    fn cut(
        &mut self,
        target: &SolidHandle,
        tool: &SolidHandle,
    ) -> Result<SolidHandle, KernelError> {
        let mut pieces = self.boxes(target)?.to_vec();
        let tool_boxes = self.boxes(tool)?.to_vec();

        for t in &tool_boxes {
            pieces = pieces.iter().flat_map(|p| p.subtract(t)).collect();
        }
        let result = coalesce(pieces);
        trace!(
            target_id = target.id(),
            tool_id = tool.id(),
            boxes = result.len(),
            "box cut"
        );
        Ok(self.store(result))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        Ok(boundary::boundary_mesh(self.boxes(solid)?))
    }

    fn release(&mut self, solid: &SolidHandle) {
        self.solids.remove(&solid.id());
    }
}

impl SolidIntrospect for BoxKernel {
    fn volume(&self, solid: &SolidHandle) -> Result<f64, KernelError> {
        Ok(self.boxes(solid)?.iter().map(Aabb::volume).sum())
    }

    fn bounding_box(&self, solid: &SolidHandle) -> Result<Option<Aabb>, KernelError> {
        Ok(self
            .boxes(solid)?
            .iter()
            .copied()
            .reduce(|a, b| a.union(&b)))
    }
}

/// Merge boxes that share a full face, until no pair qualifies.
fn coalesce(mut boxes: Vec<Aabb>) -> Vec<Aabb> {
    loop {
        let before = boxes.len();
        let mut i = 0;
        while i < boxes.len() {
            let mut j = i + 1;
            while j < boxes.len() {
                if let Some(merged) = try_merge(&boxes[i], &boxes[j]) {
                    boxes[i] = merged;
                    boxes.swap_remove(j);
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
        if boxes.len() == before {
            return boxes;
        }
    }
}

fn try_merge(a: &Aabb, b: &Aabb) -> Option<Aabb> {
    let same = |x: f64, y: f64| (x - y).abs() < PLANE_EPS;
    for axis in 0..3 {
        let others_match = (0..3)
            .filter(|&k| k != axis)
            .all(|k| same(a.min[k], b.min[k]) && same(a.max[k], b.max[k]));
        if !others_match {
            continue;
        }
        if same(a.max[axis], b.min[axis]) || same(b.max[axis], a.min[axis]) {
            return Some(a.union(b));
        }
    }
    None
}

//! Box builder on top of truck's sweep API.
//!
//! truck has no built-in box; a box is three successive sweeps of a vertex.

use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Point3, Vector3};

/// Create a box solid via successive translational sweeps.
/// Minimum corner at `origin`, extends by `size` along +x, +y, +z.
pub fn make_box(size: [f64; 3], origin: [f64; 3]) -> Solid {
    let v = builder::vertex(Point3::new(origin[0], origin[1], origin[2]));
    let edge = builder::tsweep(&v, Vector3::new(size[0], 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, size[1], 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, size[2]))
}

/// Axis-aligned bounds of a truck solid's vertices.
pub fn vertex_bounds(solid: &Solid) -> Option<([f64; 3], [f64; 3])> {
    let mut bounds: Option<([f64; 3], [f64; 3])> = None;
    for shell in solid.boundaries().iter() {
        for v in shell.vertex_iter() {
            let p = v.point();
            let (min, max) = bounds.get_or_insert(([p[0], p[1], p[2]], [p[0], p[1], p[2]]));
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
    }
    bounds
}

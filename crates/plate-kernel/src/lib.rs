pub mod box_kernel;
pub mod boundary;
pub mod primitives;
pub mod tessellation;
pub mod traits;
pub mod truck_kernel;
pub mod types;

pub use boundary::{boundary_mesh, boundary_surface, BoundarySurface};
pub use box_kernel::BoxKernel;
pub use traits::*;
pub use truck_kernel::TruckKernel;
pub use types::*;

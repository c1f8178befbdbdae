pub mod checkerboard;
pub mod config;
pub mod pipeline;
pub mod plates;
pub mod types;

pub use checkerboard::{apply_checkerboard, checker_cells, CheckerCell};
pub use config::{load_config, validate_config};
pub use pipeline::{generate_plates, generate_plates_from_path};
pub use plates::{build_plates, PlateLayout};
pub use types::*;

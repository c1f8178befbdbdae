//! Marker SVG reading and image-to-physical coordinate mapping.
//!
//! The parser accepts the flat rectangle SVGs produced by marker generators
//! (one `<svg>` with a `viewBox`, unit-suffixed `width`/`height`, and a list of
//! filled `<rect>` cells). The mapper turns image units into physical units.

pub mod errors;
pub mod mapper;
pub mod parse;
pub mod units;

pub use errors::{DegenerateInputError, FormatError};
pub use mapper::{footprint, map_rectangles, scale_factor};
pub use parse::{load_marker_svg, parse_marker_svg};
pub use units::parse_length;

pub mod config;
pub mod marker;
pub mod scale;

pub use config::*;
pub use marker::*;
pub use scale::*;

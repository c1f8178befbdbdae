pub mod errors;
pub mod report;
pub mod sink;
pub mod step_export;
pub mod stl;

pub use errors::ExportError;
pub use report::{write_report, PlateReport};
pub use sink::{MemorySink, PlateNames, PresentationSink, StepSink, StlEncoding, StlSink};
pub use step_export::{export_step_plates, StepPlates};
pub use stl::{export_ascii_stl, export_binary_stl};

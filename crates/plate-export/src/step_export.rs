use plate_kernel::{BoxKernel, TruckKernel};
use plate_ops::{PlateKind, PlatePair};
use tracing::debug;

use crate::errors::ExportError;
use crate::sink::PlateNames;

/// AP203 STEP text for both plates.
#[derive(Debug, Clone)]
pub struct StepPlates {
    pub base: String,
    pub cut: String,
}

/// Export both plates to STEP.
///
/// The plates are rebuilt as planar B-reps in a fresh TruckKernel from the
/// box kernel's decomposition, then serialized one file per plate.
pub fn export_step_plates(
    kernel: &BoxKernel,
    plates: &PlatePair,
    names: &PlateNames,
) -> Result<StepPlates, ExportError> {
    let mut truck = TruckKernel::new();
    let mut export = |kind: PlateKind| -> Result<String, ExportError> {
        let boxes = kernel.boxes(plates.get(kind))?;
        if boxes.is_empty() {
            return Err(ExportError::EmptyMesh { plate: kind });
        }
        let handle = truck.import_boxes(boxes)?;
        let file_name = names.file_name(kind, "step");
        debug!(plate = %kind, boxes = boxes.len(), "exporting STEP");
        truck
            .export_step(&handle, &file_name)
            .map_err(|e| ExportError::StepExportFailed {
                reason: format!("{file_name}: {e}"),
            })
    };

    Ok(StepPlates {
        base: export(PlateKind::Base)?,
        cut: export(PlateKind::Cut)?,
    })
}

use plate_kernel::KernelError;
use plate_ops::PlateKind;

/// Errors while handing finished plates to a sink.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("{plate} plate tessellated to an empty mesh")]
    EmptyMesh { plate: PlateKind },

    #[error("invalid mesh: {reason}")]
    InvalidMesh { reason: String },

    #[error("STEP export failed: {reason}")]
    StepExportFailed { reason: String },

    #[error("failed to write {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to serialize report: {reason}")]
    Report { reason: String },
}

use marker_svg::{DegenerateInputError, FormatError};
use plate_kernel::{KernelError, SolidHandle};
use plate_types::ScaleFactor;

/// Which of the two plates a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PlateKind {
    /// White regions.
    Base,
    /// Black regions.
    Cut,
}

impl std::fmt::Display for PlateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlateKind::Base => f.write_str("base"),
            PlateKind::Cut => f.write_str("cut"),
        }
    }
}

/// The two plate solids. Handles are only meaningful to the provider that built them.
#[derive(Debug, Clone)]
pub struct PlatePair {
    pub base: SolidHandle,
    pub cut: SolidHandle,
}

impl PlatePair {
    pub fn get(&self, kind: PlateKind) -> &SolidHandle {
        match kind {
            PlateKind::Base => &self.base,
            PlateKind::Cut => &self.cut,
        }
    }
}

/// Complete result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PlateOutput {
    pub plates: PlatePair,
    /// Physical footprint `(width, height)` of both plates.
    pub footprint: (f64, f64),
    pub diagnostics: Diagnostics,
}

/// Non-fatal bookkeeping from a pipeline run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Diagnostics {
    /// Image-to-physical scale that was applied.
    pub scale: Option<ScaleFactor>,
    /// Non-black rectangles subtracted from the cut plate.
    pub rects_subtracted: usize,
    /// Black rectangles, left as material.
    pub rects_black: usize,
    /// Non-black rectangles with no area on the plate.
    pub rects_skipped: usize,
    /// Non-black rectangles that had to be clipped to the plate footprint.
    pub rects_clipped: usize,
    /// Checkerboard cells subtracted (each from both plates).
    pub checker_cells: usize,
    /// Final plate volumes, when the provider can measure them.
    pub base_volume: Option<f64>,
    pub cut_volume: Option<f64>,
    pub warnings: Vec<String>,
}

/// Boolean construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("{plate} plate is empty after construction")]
    EmptyPlate { plate: PlateKind },
}

/// Errors from plate generation. Any of them aborts the current image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] DegenerateInputError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl From<KernelError> for PipelineError {
    fn from(e: KernelError) -> Self {
        PipelineError::Geometry(GeometryError::Kernel(e))
    }
}

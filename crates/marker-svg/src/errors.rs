use plate_types::{Extent, PhysicalSize};

/// Malformed or incomplete marker image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FormatError {
    #[error("failed to read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("failed to parse svg xml: {reason}")]
    Xml { reason: String },

    #[error("no <svg> element found")]
    MissingRoot,

    #[error("<svg> has no `{attribute}` attribute")]
    MissingRootAttribute { attribute: &'static str },

    #[error("malformed viewBox `{value}`: {reason}")]
    MalformedViewBox { value: String, reason: String },

    #[error("malformed {attribute} `{value}`: {reason}")]
    MalformedLength {
        attribute: &'static str,
        value: String,
        reason: String,
    },

    #[error("width is in `{width_unit}` but height is in `{height_unit}`")]
    UnitMismatch {
        width_unit: String,
        height_unit: String,
    },

    #[error("rect #{index}: missing attribute `{attribute}`")]
    MissingRectAttribute { index: usize, attribute: &'static str },

    #[error("rect #{index}: attribute `{attribute}` = `{value}` is not a number")]
    MalformedRectAttribute {
        index: usize,
        attribute: &'static str,
        value: String,
    },
}

/// Coordinate extent that cannot be mapped to a finite, positive scale.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "degenerate coordinate extent {}x{} for physical size {}{unit}x{}{unit}",
    .extent.width,
    .extent.height,
    .physical.width,
    .physical.height,
    unit = .physical.unit
)]
pub struct DegenerateInputError {
    pub extent: Extent,
    pub physical: PhysicalSize,
}

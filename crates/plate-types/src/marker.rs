use serde::{Deserialize, Serialize};

/// Fill color of a marker rectangle.
/// Only black vs. non-black carries meaning for plate construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FillColor {
    Black,
    White,
    Other(String),
}

impl FillColor {
    /// Classify a raw `fill` attribute value. Only the literal `black` is dark.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "black" => FillColor::Black,
            "white" => FillColor::White,
            other => FillColor::Other(other.to_string()),
        }
    }

    pub fn is_black(&self) -> bool {
        matches!(self, FillColor::Black)
    }
}

/// Physical length unit declared by the image's `width`/`height` attributes.
///
/// Every supported token is exactly two characters long. Values are carried
/// through in the declared unit; no conversion happens anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalUnit {
    Millimeter,
    Centimeter,
    Inch,
    Point,
    Pica,
    Pixel,
}

impl PhysicalUnit {
    pub const ALL: [PhysicalUnit; 6] = [
        PhysicalUnit::Millimeter,
        PhysicalUnit::Centimeter,
        PhysicalUnit::Inch,
        PhysicalUnit::Point,
        PhysicalUnit::Pica,
        PhysicalUnit::Pixel,
    ];

    pub fn token(self) -> &'static str {
        match self {
            PhysicalUnit::Millimeter => "mm",
            PhysicalUnit::Centimeter => "cm",
            PhysicalUnit::Inch => "in",
            PhysicalUnit::Point => "pt",
            PhysicalUnit::Pica => "pc",
            PhysicalUnit::Pixel => "px",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.token() == token)
    }
}

impl std::fmt::Display for PhysicalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Width and height in the image's internal coordinate unit (the viewBox extent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// Declared physical output size of the marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
    pub unit: PhysicalUnit,
}

/// One axis-aligned rectangle in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoredRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: FillColor,
}

/// Parsed marker image. Immutable once produced by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerImage {
    /// viewBox width/height, in internal units.
    pub coordinate_extent: Extent,
    /// Declared `width`/`height`, in physical units.
    pub physical_size: PhysicalSize,
    /// Rectangles in document order.
    pub rectangles: Vec<ColoredRect>,
}

use std::path::Path;

use plate_types::{ColoredRect, Extent, FillColor, MarkerImage, PhysicalSize};
use tracing::{debug, instrument};

use crate::errors::FormatError;
use crate::units::parse_length;

const RECT_ATTRIBUTES: [&str; 4] = ["x", "y", "width", "height"];

/// Read and parse a marker SVG from disk.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_marker_svg(path: &Path) -> Result<MarkerImage, FormatError> {
    let text = std::fs::read_to_string(path).map_err(|e| FormatError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_marker_svg(&text)
}

/// Parse marker SVG text into a [`MarkerImage`].
///
/// Uses the first `<svg>` element in the document and every `<rect>` beneath
/// it, in document order. Tiling, colors and extents are not validated here.
pub fn parse_marker_svg(svg: &str) -> Result<MarkerImage, FormatError> {
    let doc = roxmltree::Document::parse(svg).map_err(|e| FormatError::Xml {
        reason: e.to_string(),
    })?;

    let root = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "svg")
        .ok_or(FormatError::MissingRoot)?;

    let coordinate_extent = parse_view_box(
        root.attribute("viewBox")
            .ok_or(FormatError::MissingRootAttribute {
                attribute: "viewBox",
            })?,
    )?;
    let physical_size = parse_physical_size(
        root.attribute("width")
            .ok_or(FormatError::MissingRootAttribute { attribute: "width" })?,
        root.attribute("height")
            .ok_or(FormatError::MissingRootAttribute {
                attribute: "height",
            })?,
    )?;

    let rectangles = root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "rect")
        .enumerate()
        .map(|(index, node)| parse_rect(index, node))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        extent_w = coordinate_extent.width,
        extent_h = coordinate_extent.height,
        physical_w = physical_size.width,
        physical_h = physical_size.height,
        unit = %physical_size.unit,
        rects = rectangles.len(),
        "parsed marker svg"
    );

    Ok(MarkerImage {
        coordinate_extent,
        physical_size,
        rectangles,
    })
}

/// The extent is the last two of the four viewBox numbers.
fn parse_view_box(value: &str) -> Result<Extent, FormatError> {
    let malformed = |reason: String| FormatError::MalformedViewBox {
        value: value.to_string(),
        reason,
    };

    let parts: Vec<&str> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 4 {
        return Err(malformed(format!("expected 4 numbers, found {}", parts.len())));
    }

    let mut numbers = [0.0f64; 4];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| malformed(format!("`{part}` is not a number")))?;
    }
    Ok(Extent {
        width: numbers[2],
        height: numbers[3],
    })
}

fn parse_physical_size(width: &str, height: &str) -> Result<PhysicalSize, FormatError> {
    let (w, width_unit) = parse_length("width", width)?;
    let (h, height_unit) = parse_length("height", height)?;
    if width_unit != height_unit {
        return Err(FormatError::UnitMismatch {
            width_unit: width_unit.to_string(),
            height_unit: height_unit.to_string(),
        });
    }
    Ok(PhysicalSize {
        width: w,
        height: h,
        unit: width_unit,
    })
}

fn parse_rect(index: usize, node: roxmltree::Node<'_, '_>) -> Result<ColoredRect, FormatError> {
    let mut values = [0.0f64; 4];
    for (slot, attribute) in values.iter_mut().zip(RECT_ATTRIBUTES) {
        let raw = node
            .attribute(attribute)
            .ok_or(FormatError::MissingRectAttribute { index, attribute })?;
        *slot = raw
            .trim()
            .parse()
            .map_err(|_| FormatError::MalformedRectAttribute {
                index,
                attribute,
                value: raw.to_string(),
            })?;
    }
    let fill = node.attribute("fill").ok_or(FormatError::MissingRectAttribute {
        index,
        attribute: "fill",
    })?;

    let [x, y, width, height] = values;
    Ok(ColoredRect {
        x,
        y,
        width,
        height,
        color: FillColor::from_attr(fill),
    })
}

use std::io::Write;

use marker_svg::{
    footprint, load_marker_svg, map_rectangles, parse_marker_svg, scale_factor, FormatError,
};
use plate_types::{FillColor, PhysicalUnit};
use proptest::prelude::*;

/// 4x4 ArUco-style marker as emitted by online generators: a full black
/// background followed by white cells drawn on top.
const ARUCO_4X4: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="60mm" height="60mm" viewBox="0 0 6 6">
  <rect x="0" y="0" width="6" height="6" fill="black"></rect>
  <rect width="1" height="1" x="1" y="1" fill="white"></rect>
  <rect width="1" height="1" x="3" y="2" fill="white"></rect>
  <rect width="2" height="1" x="2" y="4" fill="white"></rect>
</svg>"#;

fn svg_with_rects(rects: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="20mm" height="20mm" viewBox="0 0 2 2">{rects}</svg>"#
    )
}

// ── Happy path ──────────────────────────────────────────────────────────────

#[test]
fn parses_generator_output() {
    let img = parse_marker_svg(ARUCO_4X4).unwrap();
    assert_eq!(img.coordinate_extent.width, 6.0);
    assert_eq!(img.coordinate_extent.height, 6.0);
    assert_eq!(img.physical_size.width, 60.0);
    assert_eq!(img.physical_size.unit, PhysicalUnit::Millimeter);
    assert_eq!(img.rectangles.len(), 4);
    let black = img.rectangles.iter().filter(|r| r.color.is_black()).count();
    assert_eq!(black, 1);

    // Document order is preserved, attribute order is irrelevant.
    let last = &img.rectangles[3];
    assert_eq!((last.x, last.y, last.width, last.height), (2.0, 4.0, 2.0, 1.0));
    assert_eq!(last.color, FillColor::White);
}

#[test]
fn rects_inside_groups_are_found() {
    let svg = svg_with_rects(
        r#"<g><rect x="0" y="0" width="1" height="1" fill="black"/></g>
           <rect x="1" y="0" width="1" height="1" fill="white"/>"#,
    );
    let img = parse_marker_svg(&svg).unwrap();
    assert_eq!(img.rectangles.len(), 2);
    assert!(img.rectangles[0].color.is_black());
}

#[test]
fn no_rects_is_valid() {
    let img = parse_marker_svg(&svg_with_rects("")).unwrap();
    assert!(img.rectangles.is_empty());
}

#[test]
fn scenario_two_by_two_scale() {
    let svg = svg_with_rects(r#"<rect x="0" y="0" width="1" height="1" fill="black"/>"#);
    let img = parse_marker_svg(&svg).unwrap();
    let scale = scale_factor(&img).unwrap();
    assert_eq!((scale.x, scale.y), (10.0, 10.0));
    assert_eq!(footprint(&img), (20.0, 20.0));

    let rects = map_rectangles(&img, scale);
    assert_eq!(
        (rects[0].x, rects[0].y, rects[0].width, rects[0].height),
        (0.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ARUCO_4X4.as_bytes()).unwrap();
    let img = load_marker_svg(file.path()).unwrap();
    assert_eq!(img.rectangles.len(), 4);
}

// ── Format errors ───────────────────────────────────────────────────────────

#[test]
fn missing_file_is_unreadable() {
    let err = load_marker_svg(std::path::Path::new("/nonexistent/marker.svg")).unwrap_err();
    assert!(matches!(err, FormatError::Unreadable { .. }));
    assert!(err.to_string().contains("/nonexistent/marker.svg"));
}

#[test]
fn not_xml() {
    let err = parse_marker_svg("<svg width=").unwrap_err();
    assert!(matches!(err, FormatError::Xml { .. }));
}

#[test]
fn no_svg_element() {
    let err = parse_marker_svg("<html><body/></html>").unwrap_err();
    assert!(matches!(err, FormatError::MissingRoot));
}

#[test]
fn missing_view_box() {
    let err = parse_marker_svg(r#"<svg width="20mm" height="20mm"/>"#).unwrap_err();
    assert!(matches!(
        err,
        FormatError::MissingRootAttribute {
            attribute: "viewBox"
        }
    ));
}

#[test]
fn malformed_view_box() {
    let err =
        parse_marker_svg(r#"<svg width="20mm" height="20mm" viewBox="0 0 2"/>"#).unwrap_err();
    assert!(matches!(err, FormatError::MalformedViewBox { .. }));
}

#[test]
fn unitless_width() {
    let err =
        parse_marker_svg(r#"<svg width="20" height="20mm" viewBox="0 0 2 2"/>"#).unwrap_err();
    assert!(matches!(
        err,
        FormatError::MalformedLength {
            attribute: "width",
            ..
        }
    ));
}

#[test]
fn rect_missing_fill() {
    let svg = svg_with_rects(
        r#"<rect x="0" y="0" width="1" height="1" fill="white"/>
           <rect x="1" y="0" width="1" height="1"/>"#,
    );
    let err = parse_marker_svg(&svg).unwrap_err();
    assert!(matches!(
        err,
        FormatError::MissingRectAttribute {
            index: 1,
            attribute: "fill"
        }
    ));
}

#[test]
fn rect_missing_x() {
    let svg = svg_with_rects(r#"<rect y="0" width="1" height="1" fill="white"/>"#);
    let err = parse_marker_svg(&svg).unwrap_err();
    assert!(matches!(
        err,
        FormatError::MissingRectAttribute {
            index: 0,
            attribute: "x"
        }
    ));
}

#[test]
fn rect_non_numeric() {
    let svg = svg_with_rects(r#"<rect x="0" y="0" width="1px" height="1" fill="white"/>"#);
    let err = parse_marker_svg(&svg).unwrap_err();
    assert!(matches!(
        err,
        FormatError::MalformedRectAttribute {
            attribute: "width",
            ..
        }
    ));
}

// ── Mapper properties ───────────────────────────────────────────────────────

#[test]
fn zero_view_box_is_degenerate() {
    let img =
        parse_marker_svg(r#"<svg width="20mm" height="20mm" viewBox="0 0 0 0"/>"#).unwrap();
    let err = scale_factor(&img).unwrap_err();
    assert!(err.to_string().contains("degenerate"));
}

proptest! {
    #[test]
    fn scale_maps_extent_onto_physical_size(
        ew in 0.5f64..100.0, eh in 0.5f64..100.0,
        pw in 1.0f64..500.0, ph in 1.0f64..500.0,
    ) {
        let svg = format!(
            r#"<svg width="{pw}mm" height="{ph}mm" viewBox="0 0 {ew} {eh}"><rect x="0" y="0" width="{ew}" height="{eh}" fill="black"/></svg>"#
        );
        let img = parse_marker_svg(&svg).unwrap();
        let scale = scale_factor(&img).unwrap();
        prop_assert!(scale.x > 0.0 && scale.y > 0.0);

        let full = &map_rectangles(&img, scale)[0];
        prop_assert!((full.width - pw).abs() < 1e-9 * pw);
        prop_assert!((full.height - ph).abs() < 1e-9 * ph);
    }
}

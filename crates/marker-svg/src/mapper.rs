use plate_types::{MarkerImage, PhysicalRect, ScaleFactor};

use crate::errors::DegenerateInputError;

/// Scale from image units to physical units, per axis.
///
/// Fails instead of producing an infinite, NaN, zero or negative component.
pub fn scale_factor(image: &MarkerImage) -> Result<ScaleFactor, DegenerateInputError> {
    let extent = image.coordinate_extent;
    let physical = image.physical_size;
    let degenerate = || DegenerateInputError { extent, physical };

    if extent.width == 0.0 || extent.height == 0.0 {
        return Err(degenerate());
    }
    let scale = ScaleFactor {
        x: physical.width / extent.width,
        y: physical.height / extent.height,
    };
    let valid = |s: f64| s.is_finite() && s > 0.0;
    if !valid(scale.x) || !valid(scale.y) {
        return Err(degenerate());
    }
    Ok(scale)
}

/// Physical plate footprint `(width, height)`.
pub fn footprint(image: &MarkerImage) -> (f64, f64) {
    (image.physical_size.width, image.physical_size.height)
}

/// Every rectangle of the image in physical units, in document order.
pub fn map_rectangles(image: &MarkerImage, scale: ScaleFactor) -> Vec<PhysicalRect> {
    image.rectangles.iter().map(|r| scale.apply(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_types::{ColoredRect, Extent, FillColor, PhysicalSize, PhysicalUnit};

    fn image(extent: (f64, f64), size: (f64, f64)) -> MarkerImage {
        MarkerImage {
            coordinate_extent: Extent {
                width: extent.0,
                height: extent.1,
            },
            physical_size: PhysicalSize {
                width: size.0,
                height: size.1,
                unit: PhysicalUnit::Millimeter,
            },
            rectangles: vec![ColoredRect {
                x: 1.0,
                y: 0.5,
                width: 1.0,
                height: 1.0,
                color: FillColor::Black,
            }],
        }
    }

    #[test]
    fn scale_is_ratio_per_axis() {
        let s = scale_factor(&image((2.0, 4.0), (20.0, 20.0))).unwrap();
        assert_eq!((s.x, s.y), (10.0, 5.0));
    }

    #[test]
    fn zero_extent_is_degenerate() {
        assert!(scale_factor(&image((0.0, 0.0), (20.0, 20.0))).is_err());
        assert!(scale_factor(&image((2.0, 0.0), (20.0, 20.0))).is_err());
    }

    #[test]
    fn zero_physical_size_is_degenerate() {
        assert!(scale_factor(&image((2.0, 2.0), (0.0, 20.0))).is_err());
    }

    #[test]
    fn map_rectangles_applies_scale() {
        let img = image((2.0, 2.0), (20.0, 20.0));
        let s = scale_factor(&img).unwrap();
        let rects = map_rectangles(&img, s);
        assert_eq!(rects.len(), 1);
        assert_eq!((rects[0].x, rects[0].y), (10.0, 5.0));
        assert_eq!((rects[0].width, rects[0].height), (10.0, 10.0));
    }
}

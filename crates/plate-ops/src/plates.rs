use plate_kernel::SolidGeometryProvider;
use plate_types::PhysicalRect;
use tracing::{debug, instrument};

use crate::types::{Diagnostics, GeometryError, PlatePair};

/// Physical layout shared by both plates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateLayout {
    pub width: f64,
    pub height: f64,
    pub base_thickness: f64,
    pub cut_thickness: f64,
    pub black_inside: bool,
}

impl PlateLayout {
    /// z of the cut plate's bottom face.
    pub fn cut_z(&self) -> f64 {
        if self.black_inside {
            self.cut_thickness
        } else {
            0.0
        }
    }

    /// z of the base plate's bottom face. Independent of `black_inside`.
    pub fn base_z(&self) -> f64 {
        self.cut_thickness
    }

    pub fn total_thickness(&self) -> f64 {
        self.base_thickness + self.cut_thickness
    }
}

/// Build the base and cut plates from the scaled marker rectangles.
///
/// The cut plate starts as a full box and loses every non-black rectangle,
/// leaving the black regions as material. With `black_inside` the finished cut
/// plate is also carved out of the base plate. Intermediate solids are
/// released, so only the returned pair stays in the kernel.
#[instrument(skip_all, fields(rects = rects.len(), black_inside = layout.black_inside))]
pub fn build_plates<K: SolidGeometryProvider + ?Sized>(
    kernel: &mut K,
    layout: &PlateLayout,
    rects: &[PhysicalRect],
    diagnostics: &mut Diagnostics,
) -> Result<PlatePair, GeometryError> {
    let (w, h) = (layout.width, layout.height);
    let cut_z = layout.cut_z();

    let mut cut = kernel.make_box([w, h, layout.cut_thickness], [0.0, 0.0, cut_z])?;
    let mut base = kernel.make_box([w, h, layout.base_thickness], [0.0, 0.0, layout.base_z()])?;

    for (index, rect) in rects.iter().enumerate() {
        if rect.color.is_black() {
            diagnostics.rects_black += 1;
            continue;
        }
        let Some(clipped) = rect.clip_to(w, h) else {
            debug!(index, x = rect.x, y = rect.y, "rectangle has no area on the plate");
            diagnostics.rects_skipped += 1;
            continue;
        };
        if clipped.area() < rect.area() {
            debug!(index, "rectangle clipped to plate footprint");
            diagnostics.rects_clipped += 1;
        }

        let tool = kernel.make_box(
            [clipped.width, clipped.height, layout.cut_thickness],
            [clipped.x, clipped.y, cut_z],
        )?;
        let next = kernel.cut(&cut, &tool)?;
        kernel.release(&tool);
        kernel.release(&cut);
        cut = next;
        diagnostics.rects_subtracted += 1;
    }

    if layout.black_inside {
        let pocketed = kernel.cut(&base, &cut)?;
        kernel.release(&base);
        base = pocketed;
    }

    debug!(
        subtracted = diagnostics.rects_subtracted,
        black = diagnostics.rects_black,
        skipped = diagnostics.rects_skipped,
        "plates built"
    );
    Ok(PlatePair { base, cut })
}

use std::path::Path;

use marker_svg::{footprint, load_marker_svg, map_rectangles, scale_factor};
use plate_kernel::GeometryBundle;
use plate_types::{MarkerImage, PlateConfig};
use tracing::{info, instrument, warn};

use crate::checkerboard::apply_checkerboard;
use crate::config::validate_config;
use crate::plates::{build_plates, PlateLayout};
use crate::types::{Diagnostics, GeometryError, PipelineError, PlateKind, PlateOutput};

/// Turn a parsed marker image into base and cut plates.
///
/// Runs the mapper, the plate builder and (when enabled) the checkerboard
/// texturer against `kernel`. Either both plates are returned or an error is;
/// intermediate solids left in the kernel are never handed out.
#[instrument(skip_all, fields(rects = image.rectangles.len()))]
pub fn generate_plates(
    kernel: &mut dyn GeometryBundle,
    image: &MarkerImage,
    config: &PlateConfig,
) -> Result<PlateOutput, PipelineError> {
    validate_config(config)?;

    let scale = scale_factor(image)?;
    let (width, height) = footprint(image);
    let rects = map_rectangles(image, scale);

    let mut diagnostics = Diagnostics {
        scale: Some(scale),
        ..Diagnostics::default()
    };

    let layout = PlateLayout {
        width,
        height,
        base_thickness: config.base_thickness,
        cut_thickness: config.cut_thickness,
        black_inside: config.black_inside,
    };
    let mut plates = build_plates(kernel, &layout, &rects, &mut diagnostics)?;

    let checker = &config.checkerboard;
    if checker.enabled {
        let total = layout.total_thickness();
        if checker.thickness >= total {
            let message = format!(
                "checkerboard depth {} reaches through the full plate stack ({total})",
                checker.thickness
            );
            warn!("{message}");
            diagnostics.warnings.push(message);
        }
        let (textured, cells) = apply_checkerboard(kernel, plates, (width, height), checker, total)?;
        plates = textured;
        diagnostics.checker_cells = cells;
    }

    for kind in [PlateKind::Base, PlateKind::Cut] {
        if kernel.as_introspect().is_empty(plates.get(kind))? {
            kernel.release(&plates.base);
            kernel.release(&plates.cut);
            return Err(GeometryError::EmptyPlate { plate: kind }.into());
        }
    }
    let introspect = kernel.as_introspect();
    diagnostics.base_volume = Some(introspect.volume(&plates.base)?);
    diagnostics.cut_volume = Some(introspect.volume(&plates.cut)?);

    info!(
        width,
        height,
        base_volume = ?diagnostics.base_volume,
        cut_volume = ?diagnostics.cut_volume,
        checker_cells = diagnostics.checker_cells,
        "plates generated"
    );

    Ok(PlateOutput {
        plates,
        footprint: (width, height),
        diagnostics,
    })
}

/// Load an SVG marker from disk and generate its plates.
pub fn generate_plates_from_path(
    kernel: &mut dyn GeometryBundle,
    path: &Path,
    config: &PlateConfig,
) -> Result<PlateOutput, PipelineError> {
    let image = load_marker_svg(path)?;
    generate_plates(kernel, &image, config)
}

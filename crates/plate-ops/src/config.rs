use std::path::Path;

use plate_types::PlateConfig;

use crate::types::PipelineError;

/// Reject parameter combinations the pipeline cannot build from.
///
/// A checker depth at or beyond the full plate thickness is allowed; the
/// pipeline reports it as a warning.
pub fn validate_config(config: &PlateConfig) -> Result<(), PipelineError> {
    let invalid = |name: &'static str, reason: String| PipelineError::InvalidParameter { name, reason };

    if !(config.base_thickness.is_finite() && config.base_thickness > 0.0) {
        return Err(invalid(
            "base_thickness",
            format!("must be positive, got {}", config.base_thickness),
        ));
    }
    if !(config.cut_thickness.is_finite() && config.cut_thickness > 0.0) {
        return Err(invalid(
            "cut_thickness",
            format!("must be positive, got {}", config.cut_thickness),
        ));
    }

    let checker = &config.checkerboard;
    if !checker.enabled {
        return Ok(());
    }
    if !(checker.thickness.is_finite() && checker.thickness >= 0.0) {
        return Err(invalid(
            "checkerboard.thickness",
            format!("must be zero or positive, got {}", checker.thickness),
        ));
    }
    if checker.grid.0 == 0 || checker.grid.1 == 0 {
        return Err(invalid(
            "checkerboard.grid",
            format!("needs at least one cell per axis, got {}x{}", checker.grid.0, checker.grid.1),
        ));
    }
    if !(0.0..1.0).contains(&checker.inset_margin) {
        return Err(invalid(
            "checkerboard.inset_margin",
            format!("must be in [0, 1), got {}", checker.inset_margin),
        ));
    }
    Ok(())
}

/// Load a JSON config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<PlateConfig, PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::InvalidParameter {
        name: "config",
        reason: format!("cannot read {}: {e}", path.display()),
    })?;
    let config: PlateConfig =
        serde_json::from_str(&text).map_err(|e| PipelineError::InvalidParameter {
            name: "config",
            reason: format!("{}: {e}", path.display()),
        })?;
    validate_config(&config)?;
    Ok(config)
}

use serde::{Deserialize, Serialize};

/// Parameters for the back-face checkerboard relief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerboardConfig {
    pub enabled: bool,
    /// Recess depth measured down from the top face.
    pub thickness: f64,
    /// Number of cells along x (columns) and y (rows).
    pub grid: (u32, u32),
    /// Fraction of each cell given up to the walls between recesses.
    pub inset_margin: f64,
}

impl Default for CheckerboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thickness: 1.0,
            grid: (11, 11),
            inset_margin: 0.05,
        }
    }
}

/// Full set of plate generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    /// Thickness of the white (base) plate.
    pub base_thickness: f64,
    /// Thickness of the black (cut) plate.
    pub cut_thickness: f64,
    /// Lift the cut plate into the base plate and pocket the base plate to match.
    pub black_inside: bool,
    pub checkerboard: CheckerboardConfig,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            base_thickness: 2.0,
            cut_thickness: 1.0,
            black_inside: false,
            checkerboard: CheckerboardConfig::default(),
        }
    }
}

impl PlateConfig {
    pub fn total_thickness(&self) -> f64 {
        self.base_thickness + self.cut_thickness
    }
}

//! Back-face checkerboard relief.
//!
//! The footprint is split into a uniform `cols x rows` grid. Every cell whose
//! `col + row` is odd becomes a shallow prism, shrunk toward its center by the
//! inset margin, that is subtracted from the top of both plates.

use plate_kernel::SolidGeometryProvider;
use plate_types::CheckerboardConfig;
use tracing::{debug, instrument};

use crate::types::{GeometryError, PlatePair};

/// One recessed cell of the relief.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckerCell {
    pub col: u32,
    pub row: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Bottom of the recess.
    pub z: f64,
    pub depth: f64,
}

impl CheckerCell {
    pub fn origin(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn size(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}

/// Recessed cells for a `width x height` footprint whose top face sits at
/// `total_thickness`. Yields nothing when the depth is zero.
pub fn checker_cells(
    width: f64,
    height: f64,
    config: &CheckerboardConfig,
    total_thickness: f64,
) -> impl Iterator<Item = CheckerCell> {
    let (cols, rows) = config.grid;
    let depth = config.thickness;
    let inset = config.inset_margin;
    let cell_w = width / f64::from(cols.max(1));
    let cell_h = height / f64::from(rows.max(1));
    let active = depth > 0.0;

    (0..cols)
        .flat_map(move |col| (0..rows).map(move |row| (col, row)))
        .filter(move |&(col, row)| active && (col + row) % 2 == 1)
        .map(move |(col, row)| CheckerCell {
            col,
            row,
            x: cell_w * f64::from(col) + cell_w * inset / 2.0,
            y: cell_h * f64::from(row) + cell_h * inset / 2.0,
            width: cell_w * (1.0 - inset),
            height: cell_h * (1.0 - inset),
            z: total_thickness - depth,
            depth,
        })
}

/// Subtract the relief from both plates. Returns the updated pair and the
/// number of cells cut. Solids of the consumed pair are released once replaced.
#[instrument(skip_all, fields(grid = ?config.grid, depth = config.thickness))]
pub fn apply_checkerboard<K: SolidGeometryProvider + ?Sized>(
    kernel: &mut K,
    plates: PlatePair,
    footprint: (f64, f64),
    config: &CheckerboardConfig,
    total_thickness: f64,
) -> Result<(PlatePair, usize), GeometryError> {
    let PlatePair { mut base, mut cut } = plates;
    let mut count = 0;

    for cell in checker_cells(footprint.0, footprint.1, config, total_thickness) {
        let tool = kernel.make_box(cell.size(), cell.origin())?;
        let next_base = kernel.cut(&base, &tool)?;
        let next_cut = kernel.cut(&cut, &tool)?;
        for stale in [&tool, &base, &cut] {
            kernel.release(stale);
        }
        (base, cut) = (next_base, next_cut);
        count += 1;
    }

    debug!(cells = count, "checkerboard applied");
    Ok((PlatePair { base, cut }, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_kernel::{BoxKernel, SolidIntrospect};

    fn config(grid: (u32, u32), thickness: f64, inset: f64) -> CheckerboardConfig {
        CheckerboardConfig {
            enabled: true,
            thickness,
            grid,
            inset_margin: inset,
        }
    }

    #[test]
    fn only_odd_cells_are_recessed() {
        let cells: Vec<_> = checker_cells(20.0, 20.0, &config((2, 2), 0.5, 0.0), 3.0).collect();
        let ids: Vec<_> = cells.iter().map(|c| (c.col, c.row)).collect();
        assert_eq!(ids, vec![(0, 1), (1, 0)]);
        assert!(cells.iter().all(|c| c.z == 2.5 && c.depth == 0.5));
    }

    #[test]
    fn inset_shrinks_toward_center() {
        let cell = checker_cells(10.0, 20.0, &config((1, 2), 1.0, 0.1), 3.0)
            .next()
            .unwrap();
        // Cell (0, 1) is 10 x 10 starting at y = 10.
        assert!((cell.x - 0.5).abs() < 1e-12);
        assert!((cell.y - 10.5).abs() < 1e-12);
        assert!((cell.width - 9.0).abs() < 1e-12);
        assert!((cell.height - 9.0).abs() < 1e-12);
    }

    #[test]
    fn default_grid_cell_count() {
        let n = checker_cells(50.0, 50.0, &CheckerboardConfig::default(), 3.0).count();
        // 121 cells, 60 of them odd.
        assert_eq!(n, 60);
    }

    #[test]
    fn zero_depth_is_noop() {
        assert_eq!(checker_cells(10.0, 10.0, &config((4, 4), 0.0, 0.05), 3.0).count(), 0);

        let mut k = BoxKernel::new();
        let base = k.make_box([10.0, 10.0, 2.0], [0.0, 0.0, 1.0]).unwrap();
        let cut = k.make_box([10.0, 10.0, 1.0], [0.0; 3]).unwrap();
        let (plates, count) = apply_checkerboard(
            &mut k,
            PlatePair { base, cut },
            (10.0, 10.0),
            &config((4, 4), 0.0, 0.05),
            3.0,
        )
        .unwrap();
        assert_eq!(count, 0);
        assert!((k.volume(&plates.base).unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn recess_reaches_both_plates_when_stacked_high() {
        let mut k = BoxKernel::new();
        // Cut plate lifted to the top of the stack, as with black_inside.
        let base = k.make_box([10.0, 10.0, 2.0], [0.0, 0.0, 1.0]).unwrap();
        let cut = k.make_box([10.0, 10.0, 1.0], [0.0, 0.0, 2.0]).unwrap();
        let (plates, count) = apply_checkerboard(
            &mut k,
            PlatePair { base, cut },
            (10.0, 10.0),
            &config((2, 2), 0.5, 0.0),
            3.0,
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(k.top_at(&plates.cut, 7.5, 2.5).unwrap(), Some(2.5));
        assert_eq!(k.top_at(&plates.cut, 2.5, 2.5).unwrap(), Some(3.0));
        assert!((k.volume(&plates.base).unwrap() - (200.0 - 25.0)).abs() < 1e-9);
    }
}

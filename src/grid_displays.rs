use std::fmt;

use crate::cells::CellState;
use crate::grid::Grid;
use crate::pathing::RouteResult;

/// A copy of the grid's cells with a route search result painted over it.
///
/// Cells on a found route become `Marker`, cells explored by a failed search become `LightMarker`.
/// The start and end keep their own states.
pub fn overlay(grid: &Grid, result: &RouteResult) -> Vec<Vec<CellState>> {
    let (painted, paint) = match *result {
        RouteResult::Found(ref route) => (route.iter().collect::<Vec<_>>(), CellState::Marker),
        RouteResult::NotFound(ref visited) => {
            (visited.iter().collect::<Vec<_>>(), CellState::LightMarker)
        }
    };

    let mut cells = grid.snapshot();
    for pos in painted {
        // A route computed on a different grid may stray outside this one.
        let cell = cells.get_mut(pos.y as usize).and_then(|row| row.get_mut(pos.x as usize));
        if let Some(cell) = cell {
            if !cell.is_endpoint() {
                *cell = paint;
            }
        }
    }
    cells
}

/// Text rendering of a grid with a route search result painted over it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayDisplay {
    cells: Vec<Vec<CellState>>,
}

impl OverlayDisplay {
    pub fn new(grid: &Grid, result: &RouteResult) -> OverlayDisplay {
        OverlayDisplay { cells: overlay(grid, result) }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.cells
    }
}

impl fmt::Display for OverlayDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rows(f, &self.cells)
    }
}

/// One glyph per cell, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rows(f, self.rows())
    }
}

fn write_rows(f: &mut fmt::Formatter, rows: &[Vec<CellState>]) -> fmt::Result {
    for row in rows {
        let line = row.iter().map(|cell| cell.glyph()).collect::<String>();
        writeln!(f, "{}", line)?;
    }
    Ok(())
}

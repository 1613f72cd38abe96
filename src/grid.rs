use error_chain::bail;
use std::convert::TryFrom;
use std::fmt;

use crate::cells::{CellState, CompassDiagonal, CompassPrimary, Position, PositionSmallVec};
use crate::endpoints::Side;
use crate::errors::*;
use crate::units::{Height, Width};

/// Smallest accepted width or height. Anything smaller has no interior cell that is not next to a
/// corner.
pub const MIN_SIDE_LENGTH: usize = 4;

/// The start and end of a maze, both sat on the border of the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Endpoints {
    pub start: Position,
    pub end: Position,
}

impl Endpoints {
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.start == pos || self.end == pos
    }
}

/// Both sides must be at least `MIN_SIDE_LENGTH` cells long and representable as `u32` coordinates.
pub(crate) fn check_dimensions(width: Width, height: Height) -> Result<()> {
    let (Width(w), Height(h)) = (width, height);
    let representable = u32::try_from(w).is_ok() && u32::try_from(h).is_ok();
    if w < MIN_SIDE_LENGTH || h < MIN_SIDE_LENGTH || !representable {
        bail!(ErrorKind::InvalidDimensions(w, h));
    }
    Ok(())
}

/// A rectangular array of cell states addressed as `data[y][x]`.
///
/// The outer ring of the rectangle is the border. Apart from the two endpoints, border cells are
/// walls for the whole lifetime of the grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    data: Vec<Vec<CellState>>,
    width: usize,
    height: usize,
    endpoints: Option<Endpoints>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: width: {:?}, height: {:?}, endpoints: {:?}",
               self.width,
               self.height,
               self.endpoints)
    }
}

impl Grid {
    /// Create a grid filled with walls.
    ///
    /// Both sides must be at least `MIN_SIDE_LENGTH` cells long and fit a `Position` coordinate.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        check_dimensions(width, height)?;
        let (Width(w), Height(h)) = (width, height);

        Ok(Grid {
            data: vec![vec![CellState::Wall; w]; h],
            width: w,
            height: h,
            endpoints: None,
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn endpoints(&self) -> Option<Endpoints> {
        self.endpoints
    }

    #[inline]
    pub fn start_pos(&self) -> Option<Position> {
        self.endpoints.map(|e| e.start)
    }

    #[inline]
    pub fn end_pos(&self) -> Option<Position> {
        self.endpoints.map(|e| e.end)
    }

    /// Set the start and end explicitly, e.g. to rebuild a known maze.
    ///
    /// Both must be non corner border positions on different sides of the grid. Any previous
    /// endpoints revert to walls.
    pub fn place_endpoints(&mut self, start: Position, end: Position) -> Result<()> {
        match (Side::of(self, start), Side::of(self, end)) {
            (Some(start_side), Some(end_side)) if start_side != end_side => {}
            _ => bail!(ErrorKind::InvalidEndpoints(start.x, start.y, end.x, end.y)),
        }
        self.stamp_endpoints(Endpoints { start, end });
        Ok(())
    }

    /// Record the endpoints and mark their cells. Callers guarantee the positions are valid.
    pub(crate) fn stamp_endpoints(&mut self, endpoints: Endpoints) {
        if let Some(old) = self.endpoints.take() {
            self.data[old.start.y as usize][old.start.x as usize] = CellState::Wall;
            self.data[old.end.y as usize][old.end.x as usize] = CellState::Wall;
        }
        self.data[endpoints.start.y as usize][endpoints.start.x as usize] = CellState::Start;
        self.data[endpoints.end.y as usize][endpoints.end.x as usize] = CellState::End;
        self.endpoints = Some(endpoints);
    }

    /// Forget the endpoints, turning their cells back into border walls.
    pub fn clear_endpoints(&mut self) {
        if let Some(old) = self.endpoints.take() {
            self.data[old.start.y as usize][old.start.x as usize] = CellState::Wall;
            self.data[old.end.y as usize][old.end.x as usize] = CellState::Wall;
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        0 <= x && x < self.width as i64 && 0 <= y && y < self.height as i64
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Is the position on the outer ring of the rectangle?
    pub fn is_border(&self, x: i64, y: i64) -> bool {
        self.in_bounds(x, y) &&
        (x == 0 || y == 0 || x == self.width as i64 - 1 || y == self.height as i64 - 1)
    }

    /// Interior cells are the only ones the carver may turn into passages.
    #[inline]
    pub fn can_be_carved(&self, x: i64, y: i64) -> bool {
        self.in_bounds(x, y) && !self.is_border(x, y)
    }

    #[inline]
    fn is_border_position(&self, pos: Position) -> bool {
        self.is_border(pos.x as i64, pos.y as i64)
    }

    #[inline]
    fn is_interior(&self, pos: Position) -> bool {
        self.can_be_carved(pos.x as i64, pos.y as i64)
    }

    /// The East, West, South and North neighbours, in that order, that are interior cells.
    ///
    /// With `include_endpoints` a neighbouring start or end position is also included, which is how
    /// a route can step onto the border.
    pub fn neighbours(&self, pos: Position, include_endpoints: bool) -> PositionSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| pos.offset(dir.offset()))
            .filter(|&adjacent| {
                self.is_interior(adjacent) ||
                (include_endpoints && self.endpoints.map_or(false, |e| e.contains(adjacent)))
            })
            .collect()
    }

    /// The interior diagonal neighbours. Never used for moving around the grid.
    pub fn diagonal_neighbours(&self, pos: Position) -> PositionSmallVec {
        CompassDiagonal::ALL
            .iter()
            .filter_map(|dir| pos.offset(dir.offset()))
            .filter(|&adjacent| self.is_interior(adjacent))
            .collect()
    }

    /// How many of the interior 4-neighbours and diagonal neighbours are not walls.
    pub fn open_neighbour_count(&self, pos: Position) -> usize {
        self.neighbours(pos, false)
            .iter()
            .chain(self.diagonal_neighbours(pos).iter())
            .filter(|&&n| self.is_open(n))
            .count()
    }

    pub fn get(&self, pos: Position) -> Result<CellState> {
        if self.contains(pos) {
            Ok(self.data[pos.y as usize][pos.x as usize])
        } else {
            bail!(ErrorKind::OutOfBounds(pos.x as i64, pos.y as i64))
        }
    }

    /// Is the position inside the grid and not a wall?
    #[inline]
    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos).map(CellState::is_open).unwrap_or(false)
    }

    pub(crate) fn set(&mut self, pos: Position, state: CellState) -> Result<()> {
        if self.contains(pos) {
            self.data[pos.y as usize][pos.x as usize] = state;
            Ok(())
        } else {
            bail!(ErrorKind::OutOfBounds(pos.x as i64, pos.y as i64))
        }
    }

    /// Overwrite every cell, keeping any endpoints marked.
    pub fn fill(&mut self, state: CellState) {
        for row in self.data.iter_mut() {
            for cell in row.iter_mut() {
                *cell = state;
            }
        }
        if let Some(endpoints) = self.endpoints {
            self.stamp_endpoints(endpoints);
        }
    }

    /// Flip an interior cell between passage and wall, returning its new state.
    ///
    /// Border cells and the endpoints are protected.
    pub fn toggle(&mut self, pos: Position) -> Result<CellState> {
        let current = self.get(pos)?;
        if self.is_border_position(pos) || current.is_endpoint() {
            bail!(ErrorKind::ProtectedCell(pos.x, pos.y));
        }
        let flipped = match current {
            CellState::Wall => CellState::Passage,
            _ => CellState::Wall,
        };
        self.set(pos, flipped)?;
        Ok(flipped)
    }

    /// The position itself if open, otherwise the first open interior neighbour, trying the axis
    /// neighbours before the diagonal ones.
    pub fn nearest_open(&self, pos: Position) -> Option<Position> {
        if self.is_open(pos) {
            return Some(pos);
        }
        self.neighbours(pos, false)
            .iter()
            .chain(self.diagonal_neighbours(pos).iter())
            .cloned()
            .find(|&n| self.is_open(n))
    }

    /// Rows from top to bottom.
    #[inline]
    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.data
    }

    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        self.data.clone()
    }

    /// Build a grid from rows of text: `#` wall, space or `.` passage, `S` start and `E` end.
    #[cfg(test)]
    pub(crate) fn from_text_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].chars().count();
        let mut grid = Grid::new(Width(width), Height(height)).expect("invalid test grid size");
        let (mut start, mut end) = (None, None);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let pos = Position::new(x as u32, y as u32);
                match glyph {
                    '#' => {}
                    ' ' | '.' => grid.set(pos, CellState::Passage).expect("test cell in bounds"),
                    'S' => start = Some(pos),
                    'E' => end = Some(pos),
                    other => panic!("unexpected test grid glyph {:?}", other),
                }
            }
        }
        if let (Some(s), Some(e)) = (start, end) {
            grid.place_endpoints(s, e).expect("invalid test grid endpoints");
        }
        grid
    }
}

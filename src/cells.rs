use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// The contents of a single grid cell.
///
/// The numeric codes are stable and can be used by display collaborators as palette indices.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
#[repr(u8)]
pub enum CellState {
    Passage = 0,
    Wall = 1,
    Start = 2,
    End = 3,
    /// A cell on a found route, only ever present in overlay snapshots.
    Marker = 4,
    /// A cell explored by a failed route search, only ever present in overlay snapshots.
    LightMarker = 5,
}

impl CellState {
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Anything that is not a wall can be walked through.
    #[inline]
    pub fn is_open(self) -> bool {
        self != CellState::Wall
    }

    #[inline]
    pub fn is_endpoint(self) -> bool {
        self == CellState::Start || self == CellState::End
    }

    pub fn glyph(self) -> char {
        match self {
            CellState::Passage => ' ',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Marker => '*',
            CellState::LightMarker => '.',
        }
    }
}

impl Default for CellState {
    fn default() -> CellState {
        CellState::Wall
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// The position `(dx, dy)` away from this one.
    /// Returns None if the result is not representable, i.e. off the top or left of any grid.
    #[inline]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Position::new(x, y))
    }

    #[inline]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Do the two positions share an edge (4-connectivity)?
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(u32, u32)> for Position {
    fn from(x_y_pair: (u32, u32)) -> Position {
        Position::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// Axis aligned directions. `y` grows southwards, rows are stored top to bottom.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    East,
    West,
    South,
    North,
}

impl CompassPrimary {
    /// The neighbour enumeration order. Route searches depend on it being fixed.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::East,
                                          CompassPrimary::West,
                                          CompassPrimary::South,
                                          CompassPrimary::North];

    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
            CompassPrimary::South => (0, 1),
            CompassPrimary::North => (0, -1),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassDiagonal {
    SouthEast,
    NorthEast,
    NorthWest,
    SouthWest,
}

impl CompassDiagonal {
    pub const ALL: [CompassDiagonal; 4] = [CompassDiagonal::SouthEast,
                                           CompassDiagonal::NorthEast,
                                           CompassDiagonal::NorthWest,
                                           CompassDiagonal::SouthWest];

    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            CompassDiagonal::SouthEast => (1, 1),
            CompassDiagonal::NorthEast => (1, -1),
            CompassDiagonal::NorthWest => (-1, -1),
            CompassDiagonal::SouthWest => (-1, 1),
        }
    }
}

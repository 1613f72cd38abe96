use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::Position;
use crate::grid::{Endpoints, Grid};
use crate::units::{Height, Width};

/// One of the four edges of the grid rectangle.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// The side a non corner border position lies on. Corners and other positions have none.
    pub fn of(grid: &Grid, pos: Position) -> Option<Side> {
        let (Width(w), Height(h)) = (grid.width(), grid.height());
        let (x, y) = (pos.x as usize, pos.y as usize);
        let inside_row = 0 < x && x < w - 1;
        let inside_column = 0 < y && y < h - 1;

        if x == 0 && inside_column {
            Some(Side::Left)
        } else if x == w - 1 && inside_column {
            Some(Side::Right)
        } else if y == 0 && inside_row {
            Some(Side::Top)
        } else if y == h - 1 && inside_row {
            Some(Side::Bottom)
        } else {
            None
        }
    }

    /// A uniformly random position along this side, excluding both corners.
    fn random_position<R: Rng + ?Sized>(self, grid: &Grid, rng: &mut R) -> Position {
        let (Width(w), Height(h)) = (grid.width(), grid.height());
        let (last_x, last_y) = (w as u32 - 1, h as u32 - 1);
        match self {
            Side::Left => Position::new(0, rng.gen_range(1..last_y)),
            Side::Right => Position::new(last_x, rng.gen_range(1..last_y)),
            Side::Top => Position::new(rng.gen_range(1..last_x), 0),
            Side::Bottom => Position::new(rng.gen_range(1..last_x), last_y),
        }
    }
}

/// Choose a start and an end on two different sides of the grid and mark them on the grid.
///
/// Sides are drawn without replacement so the two positions can never coincide. Any endpoints the
/// grid already had are replaced; see `MazeGenerator::create_ends` for the reusing variant.
pub fn select_endpoints<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Endpoints {
    let mut sides = Side::ALL;
    let (first_side, second_side) = {
        let (picked, _) = sides.partial_shuffle(rng, 2);
        (picked[0], picked[1])
    };

    let endpoints = Endpoints {
        start: first_side.random_position(grid, rng),
        end: second_side.random_position(grid, rng),
    };
    grid.stamp_endpoints(endpoints);

    debug!("selected start {} on the {:?} side and end {} on the {:?} side",
           endpoints.start,
           first_side,
           endpoints.end,
           second_side);
    endpoints
}

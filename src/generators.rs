//! Maze carving by randomized frontier growth with a density cap.
//!
//! Starting from the cells next to the start position, a frontier of discovered interior cells is
//! grown one cell at a time. A popped cell becomes a passage only if few enough of its neighbours
//! (axis and diagonal) are already open, which stops the carve from opening up large rooms.
//! Rejected cells stay visited and are never looked at again, so every interior cell is evaluated at
//! most once and the carve always terminates.
//!
//! The carve is exposed as an iterator of `Tick`s so that a caller can animate it, pause it, edit
//! the grid between ticks or simply drain it.

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use std::iter::FusedIterator;

use crate::cells::{CellState, Position, PositionSmallVec};
use crate::endpoints;
use crate::grid::Grid;
use crate::units::Sparsiness;
use crate::utils::{position_set, FnvHashSet};

/// How the next cell to evaluate is taken from the frontier.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum FrontierPop {
    /// Any frontier cell with equal probability. Gives sparse, branching mazes.
    Random,
    /// The most recently discovered cell. Gives long winding corridors.
    Lifo,
}

impl Default for FrontierPop {
    fn default() -> FrontierPop {
        FrontierPop::Random
    }
}

impl FrontierPop {
    /// Remove one position from the frontier. The order of the remaining positions is kept.
    pub fn pop_from<R: Rng + ?Sized>(self,
                                     frontier: &mut Vec<Position>,
                                     rng: &mut R)
                                     -> Option<Position> {
        if frontier.is_empty() {
            return None;
        }
        match self {
            FrontierPop::Random => {
                let index = rng.gen_range(0..frontier.len());
                Some(frontier.remove(index))
            }
            FrontierPop::Lifo => frontier.pop(),
        }
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum TickEvent {
    /// Carving has begun. Nothing has been carved yet.
    Started,
    /// These cells just became passages.
    Changed(Vec<Position>),
    /// Carving is complete.
    Done,
}

/// One numbered unit of observable carving progress. Numbers start at 1 and go up by one per tick.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Tick {
    pub number: u64,
    pub event: TickEvent,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Phase {
    NotStarted,
    GrowingFrontier,
    OpeningEnd,
    Finishing,
    Exhausted,
}

/// A carve in progress. Each call to `next` runs until the next tick.
///
/// Nothing happens to the grid until the first tick is pulled. Dropping the iterator part way
/// through abandons the carve, leaving the grid partially carved.
pub struct Carving<'a, R: Rng + ?Sized> {
    grid: &'a mut Grid,
    rng: &'a mut R,
    sparsiness: Sparsiness,
    pop: FrontierPop,
    frontier: Vec<Position>,
    visited: FnvHashSet<Position>,
    end_approach: PositionSmallVec,
    phase: Phase,
    ticks: u64,
}

impl<'a, R: Rng + ?Sized> Carving<'a, R> {
    pub fn new(grid: &'a mut Grid,
               rng: &'a mut R,
               sparsiness: Sparsiness,
               pop: FrontierPop)
               -> Carving<'a, R> {
        let capacity = grid.size();
        Carving {
            grid,
            rng,
            sparsiness,
            pop,
            frontier: Vec::new(),
            visited: position_set(capacity),
            end_approach: PositionSmallVec::new(),
            phase: Phase::NotStarted,
            ticks: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Access to the grid between ticks, e.g. for manual edits while the maze is being carved.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of ticks produced so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    fn tick(&mut self, event: TickEvent) -> Tick {
        self.ticks += 1;
        Tick {
            number: self.ticks,
            event,
        }
    }

    fn begin(&mut self) {
        self.grid.fill(CellState::Wall);
        let endpoints = match self.grid.endpoints() {
            Some(existing) => existing,
            None => endpoints::select_endpoints(self.grid, self.rng),
        };
        debug!("carving a {:?} grid, sparsiness {:?}, {:?} frontier pop",
               self.grid,
               self.sparsiness,
               self.pop);

        // Fixed now so that endpoint edits between ticks cannot change which cells get opened.
        self.end_approach = self.grid.neighbours(endpoints.end, false);

        let seeds = self.grid.neighbours(endpoints.start, false);
        for &pos in seeds.iter() {
            if self.visited.insert(pos) {
                self.frontier.push(pos);
            }
        }
    }

    /// Evaluate frontier cells until one is carved, returning it, or the frontier is empty.
    fn carve_next(&mut self) -> Option<Position> {
        let Sparsiness(max_open) = self.sparsiness;

        while let Some(current) = self.pop.pop_from(&mut self.frontier, self.rng) {
            let open_count = self.grid.open_neighbour_count(current);
            if open_count > max_open {
                trace!("rejected {} with {} open neighbours", current, open_count);
                continue;
            }

            self.grid
                .set(current, CellState::Passage)
                .expect("frontier positions are always interior cells");

            let mut next_cells = self.grid.neighbours(current, false);
            next_cells.shuffle(self.rng);
            for &next in next_cells.iter() {
                if self.visited.insert(next) {
                    self.frontier.push(next);
                }
            }
            return Some(current);
        }
        None
    }

    /// Force open the interior cells next to the end chosen when the carve began, so it can always
    /// be entered.
    fn open_end(&mut self) -> Vec<Position> {
        for &pos in self.end_approach.iter() {
            self.grid
                .set(pos, CellState::Passage)
                .expect("neighbours are always inside the grid");
        }
        self.end_approach.to_vec()
    }
}

impl<'a, R: Rng + ?Sized> Iterator for Carving<'a, R> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        loop {
            match self.phase {
                Phase::NotStarted => {
                    self.begin();
                    self.phase = Phase::GrowingFrontier;
                    return Some(self.tick(TickEvent::Started));
                }
                Phase::GrowingFrontier => {
                    if let Some(carved) = self.carve_next() {
                        return Some(self.tick(TickEvent::Changed(vec![carved])));
                    }
                    self.phase = Phase::OpeningEnd;
                }
                Phase::OpeningEnd => {
                    self.phase = Phase::Finishing;
                    let opened = self.open_end();
                    if !opened.is_empty() {
                        return Some(self.tick(TickEvent::Changed(opened)));
                    }
                }
                Phase::Finishing => {
                    self.phase = Phase::Exhausted;
                    let done = self.tick(TickEvent::Done);
                    debug!("carving finished after {} ticks", done.number);
                    return Some(done);
                }
                Phase::Exhausted => return None,
            }
        }
    }
}

impl<'a, R: Rng + ?Sized> FusedIterator for Carving<'a, R> {}

/// Carve the whole maze in one go, returning the number of ticks the carve took.
pub fn carve_all<R: Rng + ?Sized>(grid: &mut Grid,
                                  rng: &mut R,
                                  sparsiness: Sparsiness,
                                  pop: FrontierPop)
                                  -> u64 {
    Carving::new(grid, rng, sparsiness, pop).fold(0, |_, tick| tick.number)
}

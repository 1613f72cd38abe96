//! The library front door: one grid, the options it was built from and the random source that
//! carves it.

use error_chain::bail;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CellState, Position};
use crate::config::MazeOptions;
use crate::endpoints;
use crate::errors::*;
use crate::generators::{self, Carving};
use crate::grid::{Endpoints, Grid};
use crate::pathing::{self, RouteResult, RouteStrategy};

/// Owns a maze grid and carves and routes it according to its `MazeOptions`.
///
/// ```
/// use frontier_mazes::config::MazeOptionsBuilder;
/// use frontier_mazes::maze::MazeGenerator;
/// use frontier_mazes::pathing::RouteStrategy;
/// use frontier_mazes::units::{Height, Width};
///
/// let options = MazeOptionsBuilder::new(Width(20), Height(12)).seed(99).build().unwrap();
/// let mut maze = MazeGenerator::new(options).unwrap();
/// let ticks = maze.carve_all();
/// assert!(ticks >= 3);
/// let result = maze.find_route(RouteStrategy::BestFirst, None).unwrap();
/// if let Some(route) = result.route() {
///     assert_eq!(route.last().cloned(), maze.end_pos());
/// }
/// ```
pub struct MazeGenerator<R: Rng = XorShiftRng> {
    grid: Grid,
    options: MazeOptions,
    rng: R,
}

impl MazeGenerator<XorShiftRng> {
    /// A generator seeded from `options.seed`, or from system entropy when there is no seed.
    pub fn new(options: MazeOptions) -> Result<MazeGenerator<XorShiftRng>> {
        let rng = match options.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        MazeGenerator::with_rng(options, rng)
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// A generator drawing from the given random source. `options.seed` is ignored.
    pub fn with_rng(options: MazeOptions, rng: R) -> Result<MazeGenerator<R>> {
        let grid = Grid::new(options.width, options.height)?;
        Ok(MazeGenerator {
            grid,
            options,
            rng,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn options(&self) -> &MazeOptions {
        &self.options
    }

    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        self.grid.snapshot()
    }

    pub fn start_pos(&self) -> Option<Position> {
        self.grid.start_pos()
    }

    pub fn end_pos(&self) -> Option<Position> {
        self.grid.end_pos()
    }

    /// Choose the start and end if they have not been chosen yet. Repeat calls return the same pair.
    pub fn create_ends(&mut self) -> Endpoints {
        match self.grid.endpoints() {
            Some(existing) => existing,
            None => endpoints::select_endpoints(&mut self.grid, &mut self.rng),
        }
    }

    /// Forget the start and end so that the next carve picks new ones.
    pub fn clear_endpoints(&mut self) {
        self.grid.clear_endpoints();
    }

    /// Start a step by step carve. Nothing happens until the first tick is pulled.
    pub fn carve(&mut self) -> Carving<'_, R> {
        Carving::new(&mut self.grid,
                     &mut self.rng,
                     self.options.sparsiness,
                     self.options.frontier_pop)
    }

    /// Carve the whole maze, returning the number of ticks it took.
    pub fn carve_all(&mut self) -> u64 {
        generators::carve_all(&mut self.grid,
                              &mut self.rng,
                              self.options.sparsiness,
                              self.options.frontier_pop)
    }

    /// Carve until the start can reach the end, giving up after `max_attempts` carves.
    ///
    /// Returns the number of carves it took, or None if no attempt was connected. A carve is not
    /// guaranteed to connect start and end, the density cap can wall the end off.
    pub fn carve_until_connected(&mut self, max_attempts: usize) -> Result<Option<usize>> {
        for attempt in 1..=max_attempts {
            self.carve_all();
            let result = pathing::find_route(&self.grid, RouteStrategy::BestFirst, None)?;
            if result.is_found() {
                debug!("connected maze after {} attempt(s)", attempt);
                return Ok(Some(attempt));
            }
        }
        debug!("no connected maze after {} attempts", max_attempts);
        Ok(None)
    }

    /// Route from `origin`, or from the start when None, to the end.
    pub fn find_route(&self,
                      strategy: RouteStrategy,
                      origin: Option<Position>)
                      -> Result<RouteResult> {
        pathing::find_route(&self.grid, strategy, origin)
    }

    /// A usable route origin at or right next to `pos`, for origins picked by pointing at the grid.
    pub fn route_origin_near(&self, pos: Position) -> Result<Option<Position>> {
        if !self.grid.contains(pos) {
            bail!(ErrorKind::OutOfBounds(pos.x as i64, pos.y as i64));
        }
        Ok(self.grid.nearest_open(pos))
    }

    /// Flip an interior cell between wall and passage. See `Grid::toggle`.
    pub fn toggle(&mut self, pos: Position) -> Result<CellState> {
        self.grid.toggle(pos)
    }
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::config::MazeOptionsBuilder;
    use crate::generators::{FrontierPop, TickEvent};
    use crate::units::{Height, Sparsiness, Width};

    fn seeded_maze(w: usize, h: usize, seed: u64) -> MazeGenerator {
        let options = MazeOptionsBuilder::new(Width(w), Height(h)).seed(seed).build().unwrap();
        MazeGenerator::new(options).unwrap()
    }

    #[test]
    fn create_ends_is_idempotent() {
        let mut maze = seeded_maze(12, 9, 4);
        assert_eq!(maze.start_pos(), None);
        let first = maze.create_ends();
        for _ in 0..5 {
            assert_eq!(maze.create_ends(), first);
        }
        assert_eq!(maze.start_pos(), Some(first.start));
        assert_eq!(maze.end_pos(), Some(first.end));
    }

    #[test]
    fn carving_keeps_existing_ends() {
        let mut maze = seeded_maze(16, 16, 8);
        let ends = maze.create_ends();
        maze.carve_all();
        assert_eq!(maze.grid().endpoints(), Some(ends));
        maze.carve_all();
        assert_eq!(maze.grid().endpoints(), Some(ends));
    }

    #[test]
    fn cleared_ends_are_chosen_again() {
        let mut maze = seeded_maze(16, 16, 8);
        maze.carve_all();
        maze.clear_endpoints();
        assert_eq!(maze.grid().endpoints(), None);
        maze.carve_all();
        assert!(maze.grid().endpoints().is_some());
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = seeded_maze(25, 17, 1999);
        let mut b = seeded_maze(25, 17, 1999);
        assert_eq!(a.carve_all(), b.carve_all());
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn step_by_step_carve_matches_carve_all() {
        let mut stepped = seeded_maze(14, 10, 31);
        let mut drained = seeded_maze(14, 10, 31);
        let last = stepped.carve().last();
        let total = drained.carve_all();
        assert_eq!(last.map(|tick| (tick.number, tick.event)),
                   Some((total, TickEvent::Done)));
        assert_eq!(stepped.snapshot(), drained.snapshot());
    }

    #[test]
    fn options_are_applied() {
        let options = MazeOptionsBuilder::new(Width(10), Height(7))
            .sparsiness(Sparsiness(1))
            .frontier_pop(FrontierPop::Lifo)
            .seed(3)
            .build()
            .unwrap();
        let maze = MazeGenerator::new(options).unwrap();
        assert_eq!(maze.options(), &options);
        assert_eq!(maze.grid().width(), Width(10));
        assert_eq!(maze.grid().height(), Height(7));
        assert_eq!(maze.snapshot().len(), 7);
        assert!(maze.snapshot().iter().all(|row| row.len() == 10));
    }

    #[test]
    fn routing_needs_ends() {
        let maze = seeded_maze(8, 8, 0);
        match maze.find_route(RouteStrategy::DepthFirst, None) {
            Err(Error(ErrorKind::MissingEndpoints, _)) => {}
            other => panic!("expected MissingEndpoints, got {:?}", other),
        }
    }

    #[test]
    fn connected_carve_has_a_route() {
        let mut maze = seeded_maze(30, 20, 77);
        let attempts = maze.carve_until_connected(50)
            .unwrap()
            .expect("a connected maze within 50 carves");
        assert!(attempts >= 1);
        for &strategy in &[RouteStrategy::DepthFirst, RouteStrategy::BestFirst] {
            let result = maze.find_route(strategy, None).unwrap();
            let route = result.route().unwrap();
            assert_eq!(route.first().cloned(), maze.start_pos());
            assert_eq!(route.last().cloned(), maze.end_pos());
        }
    }

    #[test]
    fn no_attempts_means_no_maze() {
        let mut maze = seeded_maze(8, 8, 5);
        assert_eq!(maze.carve_until_connected(0).unwrap(), None);
        assert_eq!(maze.start_pos(), None);
    }

    #[test]
    fn toggles_flip_and_persist() {
        let mut maze = seeded_maze(9, 9, 12);
        maze.carve_all();
        let pos = Position::new(4, 4);
        let before = maze.grid().get(pos).unwrap();
        let after = maze.toggle(pos).unwrap();
        assert_ne!(before, after);
        assert_eq!(maze.grid().get(pos).unwrap(), after);
        assert_eq!(maze.toggle(pos).unwrap(), before);

        let start = maze.start_pos().unwrap();
        match maze.toggle(start) {
            Err(Error(ErrorKind::ProtectedCell(x, y), _)) => assert_eq!((x, y), (start.x, start.y)),
            other => panic!("expected ProtectedCell, got {:?}", other),
        }
        match maze.toggle(Position::new(0, 0)) {
            Err(Error(ErrorKind::ProtectedCell(0, 0), _)) => {}
            other => panic!("expected ProtectedCell, got {:?}", other),
        }
        match maze.toggle(Position::new(9, 3)) {
            Err(Error(ErrorKind::OutOfBounds(9, 3), _)) => {}
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn route_origin_snaps_to_open_cells() {
        let mut maze = seeded_maze(10, 10, 2);
        maze.create_ends();
        // Nothing carved yet, only the endpoints are open.
        let start = maze.start_pos().unwrap();
        assert_eq!(maze.route_origin_near(start).unwrap(), Some(start));
        assert_eq!(maze.route_origin_near(Position::new(5, 5)).unwrap(), None);

        maze.toggle(Position::new(5, 4)).unwrap();
        assert_eq!(maze.route_origin_near(Position::new(5, 5)).unwrap(),
                   Some(Position::new(5, 4)));
        assert!(maze.route_origin_near(Position::new(10, 0)).is_err());
    }

    #[test]
    fn quickcheck_routes_reach_the_end() {
        fn prop(w: u8, h: u8, seed: u64, lifo: bool) -> TestResult {
            let pop = if lifo { FrontierPop::Lifo } else { FrontierPop::Random };
            let options = MazeOptionsBuilder::new(Width(4 + (w % 25) as usize),
                                                  Height(4 + (h % 25) as usize))
                .frontier_pop(pop)
                .seed(seed)
                .build()
                .unwrap();
            let mut maze = MazeGenerator::new(options).unwrap();
            maze.carve_all();
            let start = maze.start_pos().unwrap();
            let end = maze.end_pos().unwrap();
            for &strategy in &[RouteStrategy::DepthFirst, RouteStrategy::BestFirst] {
                if let RouteResult::Found(route) = maze.find_route(strategy, None).unwrap() {
                    let well_formed = route[0] == start && route[route.len() - 1] == end &&
                                      route.windows(2).all(|pair| pair[0].is_adjacent(pair[1]));
                    if !well_formed {
                        return TestResult::failed();
                    }
                }
            }
            TestResult::passed()
        }
        quickcheck(prop as fn(u8, u8, u64, bool) -> TestResult);
    }
}

//! Route finding between a search origin and the end of a carved maze.
//!
//! Two strategies share the same search loop and differ only in which discovered cell is expanded
//! next: depth first takes the most recently discovered one, best first takes the one closest to the
//! end by Manhattan distance. Neither is a shortest path search. A cell is marked visited when it is
//! discovered and is never re-examined, so best first is a greedy search rather than A*.

use error_chain::bail;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cells::Position;
use crate::errors::*;
use crate::grid::Grid;
use crate::utils::{position_map, position_set, FnvHashMap, FnvHashSet};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum RouteStrategy {
    DepthFirst,
    BestFirst,
}

impl Default for RouteStrategy {
    fn default() -> RouteStrategy {
        RouteStrategy::BestFirst
    }
}

/// The outcome of a route search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteResult {
    /// The route from the search origin to the end, both included.
    Found(Vec<Position>),
    /// Every cell the search reached before running out of cells to expand.
    NotFound(FnvHashSet<Position>),
}

impl RouteResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        match *self {
            RouteResult::Found(_) => true,
            RouteResult::NotFound(_) => false,
        }
    }

    pub fn route(&self) -> Option<&[Position]> {
        match *self {
            RouteResult::Found(ref route) => Some(route),
            RouteResult::NotFound(_) => None,
        }
    }

    pub fn visited(&self) -> Option<&FnvHashSet<Position>> {
        match *self {
            RouteResult::Found(_) => None,
            RouteResult::NotFound(ref visited) => Some(visited),
        }
    }
}

/// The collection of discovered but not yet expanded cells. Decides the search order.
trait SearchFrontier {
    fn push(&mut self, pos: Position);
    fn pop(&mut self) -> Option<Position>;
}

/// Depth first: most recently discovered first.
struct Stack(Vec<Position>);

impl SearchFrontier for Stack {
    #[inline]
    fn push(&mut self, pos: Position) {
        self.0.push(pos);
    }

    #[inline]
    fn pop(&mut self) -> Option<Position> {
        self.0.pop()
    }
}

/// Best first: closest to the goal first, ties going to the earliest discovered.
struct DistanceQueue {
    goal: Position,
    heap: BinaryHeap<Reverse<(u32, u64, Position)>>,
    discovered: u64,
}

impl DistanceQueue {
    fn new(goal: Position) -> DistanceQueue {
        DistanceQueue {
            goal,
            heap: BinaryHeap::new(),
            discovered: 0,
        }
    }
}

impl SearchFrontier for DistanceQueue {
    fn push(&mut self, pos: Position) {
        let distance = pos.manhattan_distance(self.goal);
        self.heap.push(Reverse((distance, self.discovered, pos)));
        self.discovered += 1;
    }

    fn pop(&mut self) -> Option<Position> {
        self.heap.pop().map(|Reverse((_, _, pos))| pos)
    }
}

/// Search for a route from `origin` (the grid's start when None) to the grid's end.
///
/// Routes only pass through cells that are not walls and may step onto the start and end border
/// cells. A search that exhausts the reachable cells is not an error, it returns
/// `RouteResult::NotFound` with the explored cells.
pub fn find_route(grid: &Grid,
                  strategy: RouteStrategy,
                  origin: Option<Position>)
                  -> Result<RouteResult> {
    let endpoints = grid.endpoints().ok_or(ErrorKind::MissingEndpoints)?;
    let begin = origin.unwrap_or(endpoints.start);
    if !grid.contains(begin) {
        bail!(ErrorKind::OutOfBounds(begin.x as i64, begin.y as i64));
    }

    let result = if begin == endpoints.end {
        RouteResult::Found(vec![begin])
    } else {
        match strategy {
            RouteStrategy::DepthFirst => search(grid, begin, endpoints.end, Stack(Vec::new())),
            RouteStrategy::BestFirst => {
                search(grid, begin, endpoints.end, DistanceQueue::new(endpoints.end))
            }
        }
    };

    match result {
        RouteResult::Found(ref route) => {
            debug!("{:?} search from {} found a route of {} cells",
                   strategy,
                   begin,
                   route.len())
        }
        RouteResult::NotFound(ref visited) => {
            debug!("{:?} search from {} gave up after visiting {} cells",
                   strategy,
                   begin,
                   visited.len())
        }
    }
    Ok(result)
}

fn search<F: SearchFrontier>(grid: &Grid,
                             begin: Position,
                             end: Position,
                             mut frontier: F)
                             -> RouteResult {
    let mut visited = position_set(grid.size());
    let mut came_from = position_map(grid.size());
    visited.insert(begin);
    frontier.push(begin);

    while let Some(current) = frontier.pop() {
        for &next in grid.neighbours(current, true).iter() {
            if visited.contains(&next) {
                continue;
            }
            if next == end {
                came_from.insert(next, current);
                return RouteResult::Found(walk_back(&came_from, begin, end));
            }
            if grid.is_open(next) {
                visited.insert(next);
                came_from.insert(next, current);
                frontier.push(next);
            }
        }
    }

    RouteResult::NotFound(visited)
}

/// Follow the discovery links from `end` back to `begin`, returning the route in walking order.
fn walk_back(came_from: &FnvHashMap<Position, Position>,
             begin: Position,
             end: Position)
             -> Vec<Position> {
    let mut route = vec![end];
    let mut current = end;
    while current != begin {
        current = *came_from.get(&current)
            .expect("every discovered cell records where it was discovered from");
        route.push(current);
    }
    route.reverse();
    route
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::CellState;
    use crate::generators::{carve_all, FrontierPop};
    use crate::units::{Height, Sparsiness, Width};

    const STRATEGIES: [RouteStrategy; 2] = [RouteStrategy::DepthFirst, RouteStrategy::BestFirst];

    fn gp(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    fn assert_valid_route(grid: &Grid, route: &[Position], begin: Position) {
        assert_eq!(route.first(), Some(&begin));
        assert_eq!(route.last(), grid.end_pos().as_ref());
        for pair in route.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]),
                    "{} and {} are not adjacent",
                    pair[0],
                    pair[1]);
        }
        assert!(route.iter().all(|&pos| grid.is_open(pos)));
    }

    #[test]
    fn detours_around_a_single_wall() {
        let g = Grid::from_text_rows(&["######",
                                       "#....#",
                                       "S.#..E",
                                       "#....#",
                                       "#....#",
                                       "######"]);
        for &strategy in &STRATEGIES {
            let result = find_route(&g, strategy, None).unwrap();
            let route = result.route().expect("a route exists");
            assert_valid_route(&g, route, gp(0, 2));
            assert!(!route.contains(&gp(2, 2)));
        }
    }

    #[test]
    fn single_corridor_is_followed_exactly() {
        let g = Grid::from_text_rows(&["#######",
                                       "S...###",
                                       "###.###",
                                       "###...E",
                                       "#######"]);
        let corridor = vec![gp(0, 1), gp(1, 1), gp(2, 1), gp(3, 1), gp(3, 2), gp(3, 3), gp(4, 3),
                            gp(5, 3), gp(6, 3)];
        for &strategy in &STRATEGIES {
            assert_eq!(find_route(&g, strategy, None).unwrap(),
                       RouteResult::Found(corridor.clone()));
        }
    }

    #[test]
    fn depth_first_follows_neighbour_order() {
        // Both ways round the block work; depth first dives into the last pushed neighbour (north)
        // first, best first heads east.
        let g = Grid::from_text_rows(&["#######",
                                       "#.....#",
                                       "S.###.E",
                                       "#.....#",
                                       "#######"]);
        let dfs = find_route(&g, RouteStrategy::DepthFirst, None).unwrap();
        let route = dfs.route().unwrap();
        assert_valid_route(&g, route, gp(0, 2));
        assert_eq!(route[2], gp(1, 1));

        let best = find_route(&g, RouteStrategy::BestFirst, None).unwrap();
        let route = best.route().unwrap();
        assert_valid_route(&g, route, gp(0, 2));
        assert_eq!(route.len(), 9);
    }

    #[test]
    fn blocked_end_reports_the_explored_cells() {
        let g = Grid::from_text_rows(&["######",
                                       "#..#.#",
                                       "S..#.E",
                                       "#..#.#",
                                       "######"]);
        for &strategy in &STRATEGIES {
            let result = find_route(&g, strategy, None).unwrap();
            assert!(!result.is_found());
            assert_eq!(result.route(), None);
            let visited = result.visited().unwrap();
            let mut explored = visited.iter().cloned().collect::<Vec<_>>();
            explored.sort();
            assert_eq!(explored,
                       vec![gp(0, 2), gp(1, 1), gp(1, 2), gp(1, 3), gp(2, 1), gp(2, 2), gp(2, 3)]);
        }
    }

    #[test]
    fn walled_in_start_visits_only_itself() {
        let mut g = Grid::new(Width(5), Height(5)).unwrap();
        g.place_endpoints(gp(0, 2), gp(4, 2)).unwrap();
        for &strategy in &STRATEGIES {
            match find_route(&g, strategy, None).unwrap() {
                RouteResult::NotFound(visited) => {
                    assert_eq!(visited.into_iter().collect::<Vec<_>>(), vec![gp(0, 2)])
                }
                found => panic!("unexpected route {:?}", found),
            }
        }
    }

    #[test]
    fn origin_can_be_overridden() {
        let g = Grid::from_text_rows(&["######",
                                       "#....#",
                                       "S.#..E",
                                       "#....#",
                                       "######"]);
        for &strategy in &STRATEGIES {
            let result = find_route(&g, strategy, Some(gp(3, 3))).unwrap();
            assert_valid_route(&g, result.route().unwrap(), gp(3, 3));
        }
        assert_eq!(find_route(&g, RouteStrategy::BestFirst, Some(gp(5, 2))).unwrap(),
                   RouteResult::Found(vec![gp(5, 2)]));
    }

    #[test]
    fn origin_outside_the_grid_is_an_error() {
        let g = Grid::from_text_rows(&["#####", "S...E", "#####", "#####"]);
        match find_route(&g, RouteStrategy::DepthFirst, Some(gp(10, 1))) {
            Err(Error(ErrorKind::OutOfBounds(10, 1), _)) => {}
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn routing_needs_endpoints() {
        let g = Grid::new(Width(6), Height(6)).unwrap();
        match find_route(&g, RouteStrategy::BestFirst, None) {
            Err(Error(ErrorKind::MissingEndpoints, _)) => {}
            other => panic!("expected MissingEndpoints, got {:?}", other),
        }
    }

    #[test]
    fn distance_queue_breaks_ties_by_discovery_order() {
        let mut queue = DistanceQueue::new(gp(5, 5));
        queue.push(gp(5, 1));
        queue.push(gp(1, 5));
        queue.push(gp(4, 4));
        queue.push(gp(3, 5));
        assert_eq!(queue.pop(), Some(gp(4, 4)));
        assert_eq!(queue.pop(), Some(gp(3, 5)));
        assert_eq!(queue.pop(), Some(gp(5, 1)));
        assert_eq!(queue.pop(), Some(gp(1, 5)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn quickcheck_strategies_agree_on_reachability() {
        fn prop(w: u8, h: u8, sparsiness: u8, seed: u64) -> TestResult {
            let (w, h) = (4 + (w % 30) as usize, 4 + (h % 30) as usize);
            let mut g = Grid::new(Width(w), Height(h)).unwrap();
            carve_all(&mut g,
                      &mut XorShiftRng::seed_from_u64(seed),
                      Sparsiness((sparsiness % 5) as usize),
                      FrontierPop::Random);
            let start = g.start_pos().unwrap();
            let end = g.end_pos().unwrap();

            let results = STRATEGIES.iter()
                .map(|&strategy| find_route(&g, strategy, None).unwrap())
                .collect::<Vec<_>>();
            let agree = results[0].is_found() == results[1].is_found();
            let valid = results.iter().filter_map(RouteResult::route).all(|route| {
                route.first() == Some(&start) && route.last() == Some(&end) &&
                route.windows(2).all(|pair| pair[0].is_adjacent(pair[1])) &&
                route[1..route.len() - 1].iter().all(|&pos| g.get(pos).unwrap() == CellState::Passage)
            });
            TestResult::from_bool(agree && valid)
        }
        quickcheck(prop as fn(u8, u8, u8, u64) -> TestResult);
    }
}

use docopt::Docopt;
use error_chain::bail;
use frontier_mazes::{
    cells::Position,
    config::MazeOptionsBuilder,
    generators::{FrontierPop, TickEvent},
    grid_displays::OverlayDisplay,
    maze::MazeGenerator,
    pathing::{RouteResult, RouteStrategy},
    units::{Height, Sparsiness, Width},
};
use log::{debug, info};
use serde_derive::Deserialize;
use std::time::Instant;

const USAGE: &str = "Frontier Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--grid-width=<w> --grid-height=<h>] [--sparsiness=<n>] [--lifo] [--seed=<s>] [--step] [--connected=<attempts>] [--strategy=<name>] [--route-from-x=<x> --route-from-y=<y>]

Options:
    -h --help                Show this screen.
    --grid-width=<w>         The grid width in a w*h grid [default: 30].
    --grid-height=<h>        The grid height in a w*h grid [default: 20].
    --sparsiness=<n>         Most open neighbours a cell may have and still be carved [default: 2].
    --lifo                   Carve from the most recently discovered frontier cell instead of a random one.
    --seed=<s>               Seed for a reproducible maze.
    --step                   Print every carving tick as it happens.
    --connected=<attempts>   Re-carve up to this many times until the start reaches the end.
    --strategy=<name>        Route search, dfs or best-first [default: best-first].
    --route-from-x=<x>       x coordinate of the route origin, snapped to an open cell. Defaults to the start.
    --route-from-y=<y>       y coordinate of the route origin, snapped to an open cell. Defaults to the start.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_sparsiness: usize,
    flag_lifo: bool,
    flag_seed: Option<u64>,
    flag_step: bool,
    flag_connected: Option<usize>,
    flag_strategy: String,
    flag_route_from_x: Option<u32>,
    flag_route_from_y: Option<u32>,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::frontier_mazes::errors::Error, ::frontier_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }

        errors {
            UnknownStrategy(name: String) {
                description("unknown route strategy")
                display("unknown route strategy '{}', expected dfs or best-first", name)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let strategy = parse_strategy(&args.flag_strategy)?;

    let mut builder = MazeOptionsBuilder::new(Width(args.flag_grid_width),
                                              Height(args.flag_grid_height))
        .sparsiness(Sparsiness(args.flag_sparsiness))
        .frontier_pop(if args.flag_lifo { FrontierPop::Lifo } else { FrontierPop::Random });
    if let Some(seed) = args.flag_seed {
        builder = builder.seed(seed);
    }
    let options = builder.build().chain_err(|| "Invalid maze options")?;
    debug!("{:?}", options);

    let mut maze = MazeGenerator::new(options)?;

    let carve_start = Instant::now();
    if let Some(attempts) = args.flag_connected {
        match maze.carve_until_connected(attempts)? {
            Some(used) => println!("Connected maze after {} carve(s)", used),
            None => println!("No connected maze after {} carve(s)", attempts),
        }
    } else if args.flag_step {
        for tick in maze.carve() {
            match tick.event {
                TickEvent::Started => println!("tick {}: started", tick.number),
                TickEvent::Changed(ref cells) => {
                    println!("tick {}: carved {} cell(s)", tick.number, cells.len())
                }
                TickEvent::Done => println!("tick {}: done", tick.number),
            }
        }
    } else {
        let ticks = maze.carve_all();
        println!("Carved in {} ticks", ticks);
    }
    info!("carving took {:?}", carve_start.elapsed());

    let origin = route_origin(&args, &maze)?;
    let route_start = Instant::now();
    let result = maze.find_route(strategy, origin)?;
    info!("routing took {:?}", route_start.elapsed());

    match result {
        RouteResult::Found(ref route) => {
            println!("{:?} route of {} cells found", strategy, route.len())
        }
        RouteResult::NotFound(ref visited) => {
            println!("{:?} found no route after visiting {} cells",
                     strategy,
                     visited.len())
        }
    }
    println!("{}", OverlayDisplay::new(maze.grid(), &result));

    Ok(())
}

fn parse_strategy(name: &str) -> Result<RouteStrategy> {
    match name {
        "dfs" | "depth-first" => Ok(RouteStrategy::DepthFirst),
        "best-first" => Ok(RouteStrategy::BestFirst),
        other => bail!(ErrorKind::UnknownStrategy(other.to_owned())),
    }
}

/// The requested route origin snapped onto an open cell, or None to route from the start.
fn route_origin(args: &MazeArgs, maze: &MazeGenerator) -> Result<Option<Position>> {
    if let (Some(x), Some(y)) = (args.flag_route_from_x, args.flag_route_from_y) {
        let requested = Position::new(x, y);
        let snapped = maze.route_origin_near(requested)
            .chain_err(|| format!("Route origin {} is not on the grid", requested))?;
        if snapped.is_none() {
            println!("No open cell near {}, routing from the start instead", requested);
        }
        Ok(snapped)
    } else {
        Ok(None)
    }
}

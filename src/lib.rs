//! **frontier_mazes** carves mazes on a grid of wall and passage cells by growing a randomized
//! frontier, and finds routes through them with depth first or greedy best first search.
//!
//! The carve is an iterator of ticks so the maze can be watched, paused and edited as it grows.

#![recursion_limit = "1024"]

pub mod cells;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod maze;
pub mod pathing;
pub mod units;
pub mod utils;

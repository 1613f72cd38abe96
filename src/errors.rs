//! Errors reported by grid queries, grid mutations and route searches.
//!
//! Other modules `use crate::errors::*;` to get the `Error`, `ErrorKind`, `ResultExt` and `Result`
//! types that `error_chain!` creates.

use error_chain::error_chain;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("grid dimensions too small")
            display("a {}x{} grid is invalid, width and height must both be larger than 3", width, height)
        }

        OutOfBounds(x: i64, y: i64) {
            description("position outside of the grid")
            display("position ({}, {}) is outside of the grid", x, y)
        }

        ProtectedCell(x: u32, y: u32) {
            description("border and endpoint cells cannot be edited")
            display("cell ({}, {}) is a border or endpoint cell and cannot be edited", x, y)
        }

        InvalidEndpoints(start_x: u32, start_y: u32, end_x: u32, end_y: u32) {
            description("start and end must be distinct, non corner, border positions")
            display("({}, {}) -> ({}, {}) are not distinct non corner border positions",
                    start_x, start_y, end_x, end_y)
        }

        MissingEndpoints {
            description("start and end positions have not been chosen")
            display("start and end positions have not been chosen yet")
        }
    }
}

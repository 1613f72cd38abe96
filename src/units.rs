/// Number of columns in a grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);

/// Number of rows in a grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Upper bound on the already open neighbours of a cell that may still be carved.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Sparsiness(pub usize);

impl Default for Sparsiness {
    fn default() -> Sparsiness {
        Sparsiness(2)
    }
}

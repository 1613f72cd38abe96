use crate::errors::*;
use crate::generators::FrontierPop;
use crate::grid;
use crate::units::{Height, Sparsiness, Width};

/// Everything needed to set up a `MazeGenerator`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeOptions {
    pub width: Width,
    pub height: Height,
    pub sparsiness: Sparsiness,
    pub frontier_pop: FrontierPop,
    /// Fixed seed for a reproducible maze. Without one the generator seeds from system entropy.
    pub seed: Option<u64>,
}

impl MazeOptions {
    /// Options for a `width` by `height` grid with every other setting at its default.
    pub fn new(width: Width, height: Height) -> Result<MazeOptions> {
        MazeOptionsBuilder::new(width, height).build()
    }
}

/// Builds validated `MazeOptions`.
///
/// ```
/// use frontier_mazes::config::MazeOptionsBuilder;
/// use frontier_mazes::generators::FrontierPop;
/// use frontier_mazes::units::{Height, Sparsiness, Width};
///
/// let options = MazeOptionsBuilder::new(Width(30), Height(20))
///     .sparsiness(Sparsiness(3))
///     .frontier_pop(FrontierPop::Lifo)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(options.seed, Some(7));
/// ```
#[derive(Clone, Debug)]
pub struct MazeOptionsBuilder {
    options: MazeOptions,
}

impl MazeOptionsBuilder {
    pub fn new(width: Width, height: Height) -> MazeOptionsBuilder {
        MazeOptionsBuilder {
            options: MazeOptions {
                width,
                height,
                sparsiness: Sparsiness::default(),
                frontier_pop: FrontierPop::default(),
                seed: None,
            },
        }
    }

    pub fn sparsiness(mut self, sparsiness: Sparsiness) -> MazeOptionsBuilder {
        self.options.sparsiness = sparsiness;
        self
    }

    pub fn frontier_pop(mut self, pop: FrontierPop) -> MazeOptionsBuilder {
        self.options.frontier_pop = pop;
        self
    }

    pub fn seed(mut self, seed: u64) -> MazeOptionsBuilder {
        self.options.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<MazeOptions> {
        grid::check_dimensions(self.options.width, self.options.height)?;
        Ok(self.options)
    }
}

pub mod frontier;
pub mod iterative_backtracker;
pub mod recursive_backtracker;
pub mod types;
pub mod wilson;

use std::fmt;

use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{error::MazeError, gameboard::Maze};
pub use frontier::{Bag, Frontier, Selection};
pub use iterative_backtracker::IterativeBacktracker;
pub use recursive_backtracker::RecursiveBacktracker;
pub use types::MazeGenAlgo;
pub use wilson::Wilson;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeded generator, or a randomly seeded one when there's no seed.
pub fn random_from_seed(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}

/// Algorithm carving a perfect maze (spanning tree of the grid) out of a closed grid.
pub trait MazeAlgorithm: fmt::Debug {
    /// Opens walls of `maze` until it's a perfect maze.
    ///
    /// Expects a maze with every wall closed, such as one fresh from [`Maze::new`].
    fn carve(&self, maze: &mut Maze, rng: &mut Random);

    fn generate(&self, height: usize, width: usize, rng: &mut Random) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(height, width)?;
        self.carve(&mut maze, rng);
        Ok(maze)
    }
}

use rand::{seq::SliceRandom as _, Rng as _, SeedableRng as _};
use smallvec::SmallVec;

use crate::gameboard::Maze;

use super::{Bag, Frontier as _, MazeAlgorithm, Random, Selection};

/// Backtracking without recursion, the pending cells are kept in a [`Bag`].
///
/// With [`Selection::Stack`] it behaves like the recursive backtracker, [`Selection::Queue`]
/// grows the maze breadth first and [`Selection::Random`] expands random pending cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct IterativeBacktracker {
    pub selection: Selection,
}

impl IterativeBacktracker {
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}

impl MazeAlgorithm for IterativeBacktracker {
    fn carve(&self, maze: &mut Maze, rng: &mut Random) {
        let mut bag = Bag::new(self.selection, Random::seed_from_u64(rng.gen()));
        bag.add(maze.first_cell());

        while let Some(current) = bag.peek() {
            let isolated = maze
                .get_neighbors(current)
                .into_iter()
                .filter(|&neighbor| maze.is_isolated(neighbor))
                .collect::<SmallVec<[_; 4]>>();

            let Some(&next) = isolated.choose(rng) else {
                log::trace!("{:?} is exhausted", current);
                bag.pop();
                continue;
            };

            maze.connect(current, next);
            bag.add(next);
        }

        log::debug!(
            "iterative backtracker ({}) carved {} passages in {}x{} maze",
            self.selection,
            maze.passage_count(),
            maze.height(),
            maze.width()
        );
    }
}

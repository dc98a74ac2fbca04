use rand::seq::SliceRandom as _;

use crate::{
    array::Array2D,
    dims::Dims,
    gameboard::{CellWall, Maze},
};

use super::{MazeAlgorithm, Random};

/// Wilson's algorithm, picks uniformly among all spanning trees of the grid.
///
/// Cells join the tree through loop-erased random walks. A walk starts in a cell outside of the
/// tree and wanders until it hits the tree, remembering only the last direction it left each
/// cell in. Following those directions from the start again gives the walk with all of its loops
/// erased, and that path is carved into the maze.
///
/// Marks are used to tell which cells are in the tree, they are cleared before and after.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wilson;

impl Wilson {
    fn random_walk(
        maze: &mut Maze,
        start: Dims,
        next: &mut Array2D<Option<CellWall>>,
        rng: &mut Random,
    ) {
        let mut current = start;
        while !maze.is_marked(current) {
            let Some(&candidate) = maze.get_neighbors(current).choose(rng) else {
                return;
            };

            // overwriting the previous choice is what erases the loops
            next[current] = Maze::which_wall_between(current, candidate);
            current = candidate;
        }

        current = start;
        while !maze.is_marked(current) {
            let Some(wall) = next[current] else {
                break;
            };

            maze.remove_wall(current, wall);
            maze.mark(current, true);
            current += wall.to_coord();
        }
    }
}

impl MazeAlgorithm for Wilson {
    fn carve(&self, maze: &mut Maze, rng: &mut Random) {
        maze.clear_marks();

        let mut cells = maze.get_cells().iter_pos().collect::<Vec<_>>();
        cells.shuffle(rng);

        let mut next = Array2D::new(None, maze.width(), maze.height());
        if let Some(&root) = cells.first() {
            maze.mark(root, true);
        }

        for cell in cells {
            if !maze.is_marked(cell) {
                Self::random_walk(maze, cell, &mut next, rng);
            }
        }

        maze.clear_marks();

        log::debug!(
            "wilson carved {} passages in {}x{} maze",
            maze.passage_count(),
            maze.height(),
            maze.width()
        );
    }
}

use crate::{
    dims::Dims,
    gameboard::{maze::Neighbors, Maze},
};

use super::{MazeAlgorithm, Random};

/// Randomized depth-first carving.
///
/// Every carved cell gets its neighbors in a fresh random order and is finished before its
/// parent looks at the next neighbor. The pending cells live on an explicit stack, so large
/// mazes don't run out of call stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecursiveBacktracker {
    /// Cell the carving starts from, the first cell of the maze if not set.
    pub start: Option<Dims>,
}

struct Frame {
    cell: Dims,
    neighbors: Neighbors,
    next: usize,
}

impl Frame {
    fn new(maze: &Maze, cell: Dims, rng: &mut Random) -> Self {
        Self {
            cell,
            neighbors: maze.get_shuffled_neighbors(cell, rng),
            next: 0,
        }
    }
}

impl RecursiveBacktracker {
    pub fn starting_at(start: Dims) -> Self {
        Self { start: Some(start) }
    }

    fn visit(maze: &mut Maze, start: Dims, rng: &mut Random) {
        let mut stack = vec![Frame::new(maze, start, rng)];
        while let Some(frame) = stack.last_mut() {
            let Some(&neighbor) = frame.neighbors.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            // isolated means not yet part of the tree, so no cycle can appear
            if !maze.is_isolated(neighbor) {
                continue;
            }

            let cell = frame.cell;
            maze.connect(cell, neighbor);

            // exits stay dead ends
            if !maze.is_exit(neighbor) {
                stack.push(Frame::new(maze, neighbor, rng));
            }
        }
    }
}

impl MazeAlgorithm for RecursiveBacktracker {
    fn carve(&self, maze: &mut Maze, rng: &mut Random) {
        let start = match self.start {
            Some(start) if maze.is_in_bounds(start) => start,
            Some(start) => {
                log::warn!(
                    "Start {:?} is outside of the maze, starting from the first cell",
                    start
                );
                maze.first_cell()
            }
            None => maze.first_cell(),
        };

        Self::visit(maze, start, rng);

        log::debug!(
            "recursive backtracker carved {} passages in {}x{} maze",
            maze.passage_count(),
            maze.height(),
            maze.width()
        );
    }
}

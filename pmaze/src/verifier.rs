//! Checks that the passages of a maze form a spanning tree of its grid.

use crate::{
    dims::Dims,
    disjoint_set::DisjointSet,
    gameboard::{CellWall, Maze},
};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imperfection {
    #[error("passage between {0:?} and {1:?} closes a loop")]
    Cycle(Dims, Dims),
    #[error("maze falls apart into {0} unconnected regions")]
    Disconnected(usize),
}

/// Succeeds iff the maze is perfect: connected and without loops.
pub fn verify(maze: &Maze) -> Result<(), Imperfection> {
    let cells = maze.get_cells();
    let mut sets = DisjointSet::new(cells.len());

    for (from, cell) in cells.iter_pos().zip(cells.iter()) {
        // every passage once, from its top/left end
        for wall in [CellWall::Right, CellWall::Bottom] {
            if !cell.is_open(wall) {
                continue;
            }

            let to = from + wall.to_coord();
            let (Some(a), Some(b)) = (cells.dim_to_idx(from), cells.dim_to_idx(to)) else {
                continue;
            };

            if !sets.union(a, b) {
                return Err(Imperfection::Cycle(from, to));
            }
        }
    }

    match sets.class_count() {
        1 => Ok(()),
        count => Err(Imperfection::Disconnected(count)),
    }
}

impl Maze {
    pub fn is_perfect(&self) -> bool {
        verify(self).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::{IterativeBacktracker, MazeAlgorithm as _, Random};

    #[test]
    fn square() {
        let mut maze = Maze::new(2, 2).unwrap();
        assert_eq!(verify(&maze), Err(Imperfection::Disconnected(4)));

        maze.break_wall(Dims(0, 0), Dims(1, 0)).unwrap();
        maze.break_wall(Dims(1, 0), Dims(1, 1)).unwrap();
        assert_eq!(verify(&maze), Err(Imperfection::Disconnected(2)));

        maze.break_wall(Dims(1, 1), Dims(0, 1)).unwrap();
        assert_eq!(maze.passage_count(), 3);
        assert!(maze.is_perfect());

        maze.break_wall(Dims(0, 1), Dims(0, 0)).unwrap();
        assert!(matches!(verify(&maze), Err(Imperfection::Cycle(..))));
        assert!(!maze.is_perfect());
    }

    #[test]
    fn single_cell_is_perfect() {
        assert!(Maze::new(1, 1).unwrap().is_perfect());
    }

    #[test]
    fn extra_passage_in_generated_maze() {
        let mut rng = Random::seed_from_u64(6);
        let mut maze = IterativeBacktracker::default()
            .generate(5, 5, &mut rng)
            .unwrap();
        assert!(maze.is_perfect());

        let (a, b) = maze
            .get_cells()
            .iter_pos()
            .flat_map(|pos| maze.get_neighbors(pos).into_iter().map(move |n| (pos, n)))
            .find(|&(a, b)| !maze.has_passage(a, b))
            .unwrap();
        maze.break_wall(a, b).unwrap();
        assert!(matches!(verify(&maze), Err(Imperfection::Cycle(..))));
    }

    #[test]
    fn generated_maze_survives_serialization() {
        let mut rng = Random::seed_from_u64(13);
        let maze = IterativeBacktracker::default()
            .generate(3, 3, &mut rng)
            .unwrap();
        let parsed: Maze = maze.to_string().parse().unwrap();
        assert_eq!(verify(&parsed), Ok(()));
    }
}

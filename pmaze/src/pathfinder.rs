//! Depth first search for a way out of the maze.
//!
//! The marks of the maze are the visited set. A cell stays marked only while it's on the
//! current path, so after a successful search the marked cells are exactly the path to the exit,
//! and after a failed one no marks are left behind.
//!
//! Marks left from earlier searches block the search, clear them first with
//! [`Maze::clear_marks`].

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{maze::Neighbors, Maze},
};

struct Frame {
    cell: Dims,
    neighbors: Neighbors,
    next: usize,
}

impl Frame {
    fn new(maze: &Maze, cell: Dims) -> Self {
        Self {
            cell,
            neighbors: maze.get_open_neighbors(cell),
            next: 0,
        }
    }
}

/// Finds a path from `start` to an exit, going only through open passages.
///
/// Returns the path including both ends, or `None` if no exit can be reached.
pub fn find_path(maze: &mut Maze, start: Dims) -> Result<Option<Vec<Dims>>, MazeError> {
    if !maze.is_in_bounds(start) {
        return Err(MazeError::OutOfBounds(start));
    }

    maze.mark(start, true);
    if maze.is_exit(start) {
        return Ok(Some(vec![start]));
    }

    let mut stack = vec![Frame::new(maze, start)];
    while let Some(frame) = stack.last_mut() {
        let Some(&neighbor) = frame.neighbors.get(frame.next) else {
            // dead end, so it must not block other searches
            maze.mark(frame.cell, false);
            stack.pop();
            continue;
        };
        frame.next += 1;

        if maze.is_marked(neighbor) {
            continue;
        }

        maze.mark(neighbor, true);
        if maze.is_exit(neighbor) {
            let mut path: Vec<_> = stack.iter().map(|frame| frame.cell).collect();
            path.push(neighbor);
            log::trace!("found exit {:?} in {} steps", neighbor, path.len() - 1);
            return Ok(Some(path));
        }

        stack.push(Frame::new(maze, neighbor));
    }

    log::trace!("no exit reachable from {:?}", start);
    Ok(None)
}

/// Same as [`find_path`], only tells whether there is a path.
pub fn search_path(maze: &mut Maze, start: Dims) -> Result<bool, MazeError> {
    Ok(find_path(maze, start)?.is_some())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::{MazeAlgorithm as _, Random, RecursiveBacktracker, Wilson};

    #[test]
    fn path_in_perfect_maze() {
        for seed in 0..10 {
            let mut rng = Random::seed_from_u64(seed);
            let mut maze = Wilson.generate(7, 9, &mut rng).unwrap();

            let path = find_path(&mut maze, Dims::ZERO).unwrap().unwrap();
            assert_eq!(path.first(), Some(&Dims::ZERO));
            assert_eq!(path.last(), Some(&maze.exit()));
            for step in path.windows(2) {
                assert!(maze.has_passage(step[0], step[1]));
            }

            // only the path stays marked
            assert_eq!(maze.marked_count(), path.len());
            assert!(path.iter().all(|&pos| maze.is_marked(pos)));
        }
    }

    #[test]
    fn no_path_leaves_no_marks() {
        let mut maze: Maze = "2\n3\nE\nESW\nW\n\nN\n\n".parse().unwrap();
        assert!(!search_path(&mut maze, Dims::ZERO).unwrap());
        assert_eq!(maze.marked_count(), 0);

        // the exit connects once the last wall is gone
        maze.break_wall(Dims(1, 1), Dims(2, 1)).unwrap();
        assert!(search_path(&mut maze, Dims::ZERO).unwrap());
        assert_eq!(maze.to_string(), "2\n3\nE*\nESW*\nW\n\nNE*\nW*\n");
    }

    #[test]
    fn path_with_loops() {
        // fully open 3x3 grid, many loops for the search to get lost in
        let mut maze = Maze::new(3, 3).unwrap();
        for pos in Dims::iter_fill(Dims::ZERO, maze.size()) {
            for neighbor in maze.get_neighbors(pos) {
                maze.break_wall(pos, neighbor).unwrap();
            }
        }

        let path = find_path(&mut maze, Dims(1, 1)).unwrap().unwrap();
        assert_eq!(path.last(), Some(&Dims(2, 2)));
        assert_eq!(maze.marked_count(), path.len());
    }

    #[test]
    fn stale_marks_block_the_search() {
        let mut rng = Random::seed_from_u64(5);
        let mut maze = RecursiveBacktracker::default()
            .generate(4, 4, &mut rng)
            .unwrap();
        // the exit is a dead end, its only neighbor is the way in
        let before_exit = maze.get_open_neighbors(maze.exit())[0];
        maze.set_marked(before_exit, true).unwrap();

        assert!(!search_path(&mut maze, Dims::ZERO).unwrap());

        maze.clear_marks();
        assert!(search_path(&mut maze, Dims::ZERO).unwrap());
    }

    #[test]
    fn start_cases() {
        let mut maze = Maze::new(2, 2).unwrap();
        assert_eq!(find_path(&mut maze, Dims(1, 1)).unwrap(), Some(vec![Dims(1, 1)]));
        assert!(matches!(
            find_path(&mut maze, Dims(2, 0)),
            Err(MazeError::OutOfBounds(_))
        ));
    }
}

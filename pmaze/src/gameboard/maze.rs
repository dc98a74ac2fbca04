use std::thread;

use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{algorithms::Random, array::Array2D, dims::Dims, error::MazeError};

use super::{Cell, CellWall, Observer};

pub type Neighbors = SmallVec<[Dims; 4]>;

#[derive(Debug)]
pub struct Maze {
    pub(crate) cells: Array2D<Cell>,
    observer: Option<Box<dyn Observer>>,
}

impl Maze {
    /// Largest number of cells a maze can have, so every cell index fits a coordinate.
    pub const MAX_CELLS: usize = i32::MAX as usize;

    /// Creates a `height` x `width` maze with every wall closed.
    ///
    /// The exit is the bottom-right cell.
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        let fits = height
            .checked_mul(width)
            .is_some_and(|cells| cells <= Self::MAX_CELLS);
        if height == 0 || width == 0 || !fits {
            return Err(MazeError::InvalidDimensions {
                height: height as i64,
                width: width as i64,
            });
        }

        let mut maze = Maze {
            cells: Array2D::new(Cell::new(), width, height),
            observer: None,
        };

        let size = maze.size();
        for pos in Dims::iter_fill(Dims::ZERO, size) {
            if pos.1 < size.1 - 1 {
                maze.add_neighbor(pos, pos + CellWall::Bottom.to_coord())?;
            }
            if pos.0 < size.0 - 1 {
                maze.add_neighbor(pos, pos + CellWall::Right.to_coord())?;
            }
        }

        let exit = maze.exit();
        maze.cells[exit].set_exit(true);

        Ok(maze)
    }

    // Only called while the lattice is being built, the neighbor graph is fixed afterwards.
    fn add_neighbor(&mut self, cell: Dims, other: Dims) -> Result<(), MazeError> {
        for pos in [cell, other] {
            if !self.is_in_bounds(pos) {
                return Err(MazeError::OutOfBounds(pos));
            }
        }

        let wall =
            Self::which_wall_between(cell, other).ok_or(MazeError::IllegalAdjacency(cell, other))?;
        self.cells[cell].add_neighbor(wall);
        self.cells[other].add_neighbor(wall.reverse_wall());

        Ok(())
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replaces the observer, returning the previous one.
    pub fn set_observer(&mut self, observer: Option<Box<dyn Observer>>) -> Option<Box<dyn Observer>> {
        std::mem::replace(&mut self.observer, observer)
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn first_cell(&self) -> Dims {
        Dims::ZERO
    }

    pub fn exit(&self) -> Dims {
        self.size() - Dims::ONE
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    /// Returns the wall between two cells, if they are adjacent in the lattice.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        use CellWall::*;

        match (cell.0 - cell2.0, cell.1 - cell2.1) {
            (-1, 0) => Some(Right),
            (1, 0) => Some(Left),
            (0, -1) => Some(Bottom),
            (0, 1) => Some(Top),
            _ => None,
        }
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn cell(&self, pos: Dims) -> Result<&Cell, MazeError> {
        self.get_cell(pos).ok_or(MazeError::OutOfBounds(pos))
    }

    /// All registered neighbors of `pos`, empty if `pos` is outside of the maze.
    pub fn get_neighbors(&self, pos: Dims) -> Neighbors {
        self.get_cell(pos)
            .map(|cell| cell.neighbors().iter().map(|wall| pos + wall.to_coord()).collect())
            .unwrap_or_default()
    }

    /// Same as [`Maze::get_neighbors`], in a fresh random order on every call.
    pub fn get_shuffled_neighbors(&self, pos: Dims, rng: &mut Random) -> Neighbors {
        let mut neighbors = self.get_neighbors(pos);
        neighbors.shuffle(rng);
        neighbors
    }

    /// Neighbors reachable from `pos` through an open passage.
    pub fn get_open_neighbors(&self, pos: Dims) -> Neighbors {
        self.get_cell(pos)
            .map(|cell| cell.passages().map(|wall| pos + wall.to_coord()).collect())
            .unwrap_or_default()
    }

    /// Opens the passage between two neighboring cells, on both sides.
    pub fn break_wall(&mut self, cell: Dims, other: Dims) -> Result<(), MazeError> {
        for pos in [cell, other] {
            if !self.is_in_bounds(pos) {
                return Err(MazeError::OutOfBounds(pos));
            }
        }

        match Self::which_wall_between(cell, other) {
            Some(wall) if self.cells[cell].has_neighbor(wall) => {
                self.remove_wall(cell, wall);
                Ok(())
            }
            _ => Err(MazeError::IllegalAdjacency(cell, other)),
        }
    }

    /// Opens the `wall` of `cell` and the opposite wall of its neighbor.
    ///
    /// Does nothing if there is no such neighbor or the passage is already open.
    pub(crate) fn remove_wall(&mut self, cell: Dims, wall: CellWall) {
        let other = cell + wall.to_coord();
        let valid = self
            .get_cell(cell)
            .is_some_and(|c| c.has_neighbor(wall) && c.is_closed(wall));
        if !valid || !self.is_in_bounds(other) {
            return;
        }

        self.cells[cell].make_passage(wall);
        self.cells[other].make_passage(wall.reverse_wall());
        self.changed();
    }

    /// Carves a passage between two adjacent cells, ignoring non-adjacent pairs.
    pub(crate) fn connect(&mut self, cell: Dims, other: Dims) {
        if let Some(wall) = Self::which_wall_between(cell, other) {
            self.remove_wall(cell, wall);
        }
    }

    pub fn has_passage(&self, cell: Dims, other: Dims) -> bool {
        Self::which_wall_between(cell, other)
            .zip(self.get_cell(cell))
            .is_some_and(|(wall, c)| c.is_open(wall))
    }

    pub fn is_isolated(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_isolated)
    }

    pub fn is_marked(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_marked)
    }

    pub fn is_exit(&self, pos: Dims) -> bool {
        self.get_cell(pos).is_some_and(Cell::is_exit)
    }

    pub fn set_marked(&mut self, pos: Dims, marked: bool) -> Result<(), MazeError> {
        if !self.is_in_bounds(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }

        self.mark(pos, marked);
        Ok(())
    }

    pub(crate) fn mark(&mut self, pos: Dims, marked: bool) {
        if self.cells[pos].is_marked() != marked {
            self.cells[pos].set_marked(marked);
            self.changed();
        }
    }

    pub fn clear_marks(&mut self) {
        let mut changed = false;
        for cell in self.cells.iter_mut() {
            changed |= cell.is_marked();
            cell.set_marked(false);
        }

        if changed {
            self.changed();
        }
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_marked()).count()
    }

    /// Number of open passages, each counted once.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [CellWall::Right, CellWall::Bottom]
                    .into_iter()
                    .filter(|&wall| cell.is_open(wall))
                    .count()
            })
            .sum()
    }

    fn changed(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&self.cells);
            if let Some(delay) = observer.frame_delay() {
                thread::sleep(delay);
            }
        }
    }
}

impl Clone for Maze {
    /// Clones the board only, the observer stays with the original.
    fn clone(&self) -> Self {
        Maze {
            cells: self.cells.clone(),
            observer: None,
        }
    }
}

impl PartialEq for Maze {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Maze {}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, time::Duration};

    use rand::SeedableRng as _;

    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        changes: Rc<std::cell::Cell<usize>>,
    }

    impl Observer for Counter {
        fn on_change(&mut self, _: &Array2D<Cell>) {
            self.changes.set(self.changes.get() + 1);
        }

        fn frame_delay(&self) -> Option<Duration> {
            Some(Duration::ZERO)
        }
    }

    #[test]
    fn invalid_dimensions() {
        assert!(matches!(
            Maze::new(0, 3),
            Err(MazeError::InvalidDimensions { height: 0, width: 3 })
        ));
        assert!(matches!(
            Maze::new(3, 0),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn too_many_cells() {
        assert!(matches!(
            Maze::new(Maze::MAX_CELLS, 2),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Maze::new(1 << 16, 1 << 16),
            Err(MazeError::InvalidDimensions { height: 65536, width: 65536 })
        ));
        assert!(matches!(
            Maze::new(usize::MAX, usize::MAX),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn lattice() {
        let maze = Maze::new(3, 4).unwrap();
        assert_eq!(maze.size(), Dims(4, 3));
        assert_eq!(maze.cell_count(), 12);

        assert_eq!(maze.get_neighbors(Dims(0, 0)).len(), 2);
        assert_eq!(maze.get_neighbors(Dims(1, 0)).len(), 3);
        assert_eq!(maze.get_neighbors(Dims(1, 1)).len(), 4);
        assert!(maze.get_neighbors(Dims(4, 0)).is_empty());

        for pos in maze.get_cells().iter_pos() {
            for neighbor in maze.get_neighbors(pos) {
                assert!(Maze::which_wall_between(pos, neighbor).is_some());
                assert!(maze.get_neighbors(neighbor).contains(&pos));
            }
            assert!(maze.is_isolated(pos));
        }

        assert_eq!(maze.exit(), Dims(3, 2));
        assert!(maze.is_exit(Dims(3, 2)));
        assert_eq!(maze.get_cells().iter().filter(|c| c.is_exit()).count(), 1);
    }

    #[test]
    fn shuffled_neighbors_are_a_permutation() {
        let maze = Maze::new(3, 3).unwrap();
        let mut rng = Random::seed_from_u64(7);
        let mut expected = maze.get_neighbors(Dims(1, 1));
        expected.sort_by_key(|d| (d.1, d.0));

        for _ in 0..10 {
            let mut shuffled = maze.get_shuffled_neighbors(Dims(1, 1), &mut rng);
            shuffled.sort_by_key(|d| (d.1, d.0));
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn break_wall_is_symmetric_and_idempotent() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.break_wall(Dims(0, 0), Dims(1, 0)).unwrap();
        maze.break_wall(Dims(1, 0), Dims(0, 0)).unwrap();

        assert!(maze.has_passage(Dims(0, 0), Dims(1, 0)));
        assert!(maze.has_passage(Dims(1, 0), Dims(0, 0)));
        assert!(!maze.has_passage(Dims(0, 0), Dims(0, 1)));
        assert!(!maze.is_isolated(Dims(1, 0)));
        assert!(maze.is_isolated(Dims(1, 1)));
        assert_eq!(maze.passage_count(), 1);
        assert_eq!(maze.get_open_neighbors(Dims(0, 0)).as_slice(), &[Dims(1, 0)]);
    }

    #[test]
    fn break_wall_errors() {
        let mut maze = Maze::new(2, 2).unwrap();
        assert!(matches!(
            maze.break_wall(Dims(0, 0), Dims(1, 1)),
            Err(MazeError::IllegalAdjacency(..))
        ));
        assert!(matches!(
            maze.break_wall(Dims(0, 0), Dims(0, 0)),
            Err(MazeError::IllegalAdjacency(..))
        ));
        assert!(matches!(
            maze.break_wall(Dims(1, 0), Dims(2, 0)),
            Err(MazeError::OutOfBounds(Dims(2, 0)))
        ));
        assert!(matches!(
            maze.set_marked(Dims(-1, 0), true),
            Err(MazeError::OutOfBounds(_))
        ));
        assert!(matches!(maze.cell(Dims(0, 2)), Err(MazeError::OutOfBounds(_))));
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn marks() {
        let mut maze = Maze::new(2, 3).unwrap();
        maze.set_marked(Dims(2, 1), true).unwrap();
        maze.set_marked(Dims(0, 0), true).unwrap();
        assert!(maze.is_marked(Dims(2, 1)));
        assert_eq!(maze.marked_count(), 2);

        maze.clear_marks();
        assert_eq!(maze.marked_count(), 0);
    }

    #[test]
    fn observer_sees_every_change() {
        let changes = Rc::new(std::cell::Cell::new(0));
        let mut maze = Maze::new(2, 2).unwrap().with_observer(Box::new(Counter {
            changes: Rc::clone(&changes),
        }));

        maze.break_wall(Dims(0, 0), Dims(0, 1)).unwrap();
        // already open, nothing changes
        maze.break_wall(Dims(0, 1), Dims(0, 0)).unwrap();
        maze.set_marked(Dims(1, 1), true).unwrap();
        maze.set_marked(Dims(1, 1), true).unwrap();
        maze.clear_marks();
        assert_eq!(changes.get(), 3);

        let clone = maze.clone();
        assert_eq!(clone, maze);
        assert!(maze.set_observer(None).is_some());
    }
}

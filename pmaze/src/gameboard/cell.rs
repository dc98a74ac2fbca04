use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::dims::Dims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    neighbors: SmallVec<[CellWall; 4]>,
    passages: [bool; 4],
    marked: bool,
    exit: bool,
}

impl Cell {
    /// Cell with no neighbors and every wall closed.
    pub fn new() -> Cell {
        Cell {
            neighbors: SmallVec::new(),
            passages: [false; 4],
            marked: false,
            exit: false,
        }
    }

    pub(crate) fn add_neighbor(&mut self, wall: CellWall) {
        if !self.has_neighbor(wall) {
            self.neighbors.push(wall);
        }
    }

    pub fn has_neighbor(&self, wall: CellWall) -> bool {
        self.neighbors.contains(&wall)
    }

    /// Directions of the registered neighbors, in registration order.
    pub fn neighbors(&self) -> &[CellWall] {
        &self.neighbors
    }

    pub(crate) fn make_passage(&mut self, wall: CellWall) {
        self.passages[wall as usize] = true;
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        self.passages[wall as usize]
    }

    pub fn is_closed(&self, wall: CellWall) -> bool {
        !self.is_open(wall)
    }

    /// Open passages, in the `N`, `E`, `S`, `W` order.
    pub fn passages(&self) -> impl Iterator<Item = CellWall> + '_ {
        CellWall::get_in_order()
            .into_iter()
            .filter(|&wall| self.is_open(wall))
    }

    /// `true` while no passage leads out of this cell.
    pub fn is_isolated(&self) -> bool {
        !self.passages.iter().any(|&open| open)
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    pub fn is_exit(&self) -> bool {
        self.exit
    }

    pub(crate) fn set_exit(&mut self, exit: bool) {
        self.exit = exit;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    pub fn to_coord(self) -> Dims {
        match self {
            Self::Top => Dims(0, -1),
            Self::Right => Dims(1, 0),
            Self::Bottom => Dims(0, 1),
            Self::Left => Dims(-1, 0),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        use CellWall::*;

        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    pub const fn get_in_order() -> [CellWall; 4] {
        use CellWall::*;

        [Top, Right, Bottom, Left]
    }

    /// Compass letter used by the text format.
    pub fn to_char(self) -> char {
        match self {
            Self::Top => 'N',
            Self::Right => 'E',
            Self::Bottom => 'S',
            Self::Left => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<CellWall> {
        match c {
            'N' => Some(Self::Top),
            'E' => Some(Self::Right),
            'S' => Some(Self::Bottom),
            'W' => Some(Self::Left),
            _ => None,
        }
    }
}

pub mod cell;
pub mod maze;
pub mod observer;
pub mod ser;

pub use cell::{Cell, CellWall};
pub use maze::Maze;
pub use observer::Observer;

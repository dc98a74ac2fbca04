//! Perfect mazes on rectangular grids: generation, solving, verification and a text format.

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod disjoint_set;
pub mod error;
pub mod gameboard;
pub mod pathfinder;
pub mod verifier;

pub use error::MazeError;

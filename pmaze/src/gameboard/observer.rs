use std::{fmt, time::Duration};

use crate::array::Array2D;

use super::Cell;

/// Display collaborator attached to a [`Maze`](super::Maze).
///
/// It's notified after every wall break and every mark change, and may ask the maze to pause
/// for a while after each notification, so the changes can be animated.
pub trait Observer: fmt::Debug {
    fn on_change(&mut self, cells: &Array2D<Cell>);

    fn frame_delay(&self) -> Option<Duration> {
        None
    }
}

//! Text form of a maze.
//!
//! ```text
//! 2        height
//! 3        width
//! E        one line per cell, row by row:
//! ESW*       `N`, `E`, `S`, `W` for every open passage, `*` if the cell is marked
//! W
//! E
//! NEW
//! W
//! ```

use std::{fmt, fs, path::Path, str::FromStr};

use crate::error::MazeError;

use super::{CellWall, Maze};

const MARK_CHAR: char = '*';

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.height())?;
        writeln!(f, "{}", self.width())?;

        for cell in self.cells.iter() {
            for wall in cell.passages() {
                write!(f, "{}", wall.to_char())?;
            }
            if cell.is_marked() {
                write!(f, "{}", MARK_CHAR)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn malformed(line: usize, reason: impl Into<String>) -> MazeError {
    MazeError::MalformedSerialization {
        line,
        reason: reason.into(),
    }
}

fn parse_dimension(line: Option<(usize, &str)>, name: &str) -> Result<i64, MazeError> {
    let (idx, line) = line.ok_or_else(|| malformed(0, format!("missing {} header", name)))?;
    line.trim()
        .parse()
        .map_err(|_| malformed(idx + 1, format!("invalid {} '{}'", name, line.trim())))
}

impl Maze {
    /// Builds a maze from the lines of its text form.
    ///
    /// Cells without a line keep all of their walls, empty lines after the last cell are ignored.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, MazeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<S> = lines.into_iter().collect();
        let mut lines = lines
            .iter()
            .map(|line| line.as_ref().trim_end_matches('\r'))
            .enumerate();

        let height = parse_dimension(lines.next(), "height")?;
        let width = parse_dimension(lines.next(), "width")?;
        if height <= 0 || width <= 0 {
            return Err(MazeError::InvalidDimensions { height, width });
        }

        let mut maze = Maze::new(height as usize, width as usize)?;

        for (cell_idx, (line_idx, line)) in lines.enumerate() {
            let line_no = line_idx + 1;
            let Some(pos) = maze.cells.idx_to_dim(cell_idx) else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(malformed(line_no, "more cells than the maze can hold"));
            };

            for c in line.chars() {
                if c == MARK_CHAR {
                    maze.cells[pos].set_marked(true);
                    continue;
                }

                match CellWall::from_char(c) {
                    Some(wall) if maze.cells[pos].has_neighbor(wall) => maze.remove_wall(pos, wall),
                    Some(_) => {
                        return Err(malformed(
                            line_no,
                            format!("passage '{}' of cell {:?} leads out of the maze", c, pos),
                        ))
                    }
                    None => return Err(malformed(line_no, format!("illegal character '{}'", c))),
                }
            }
        }

        log::trace!(
            "parsed {}x{} maze with {} passages",
            maze.height(),
            maze.width(),
            maze.passage_count()
        );

        Ok(maze)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MazeError> {
        Ok(fs::write(path, self.to_string())?)
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::from_lines(s.lines())
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{IterativeBacktracker, MazeAlgorithm, RecursiveBacktracker, Selection, Wilson};

/// Generator picked by name, from settings or from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MazeGenAlgo {
    Recursive,
    #[default]
    Iterative,
    Wilson,
}

impl MazeGenAlgo {
    pub const ALL: [MazeGenAlgo; 3] = [
        MazeGenAlgo::Recursive,
        MazeGenAlgo::Iterative,
        MazeGenAlgo::Wilson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MazeGenAlgo::Recursive => "recursive",
            MazeGenAlgo::Iterative => "iterative",
            MazeGenAlgo::Wilson => "wilson",
        }
    }

    /// `selection` is only used by the iterative backtracker.
    pub fn generator(self, selection: Selection) -> Box<dyn MazeAlgorithm> {
        match self {
            MazeGenAlgo::Recursive => Box::new(RecursiveBacktracker::default()),
            MazeGenAlgo::Iterative => Box::new(IterativeBacktracker::new(selection)),
            MazeGenAlgo::Wilson => Box::new(Wilson),
        }
    }
}

impl fmt::Display for MazeGenAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MazeGenAlgo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MazeGenAlgo::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown algorithm '{}', expected recursive, iterative or wilson",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::Random;

    #[test]
    fn parse_names() {
        for algo in MazeGenAlgo::ALL {
            assert_eq!(algo.to_string().parse(), Ok(algo));
        }
        assert_eq!("Wilson".parse(), Ok(MazeGenAlgo::Wilson));
        assert!("kruskal".parse::<MazeGenAlgo>().is_err());
    }

    #[test]
    fn every_algo_generates() {
        let mut rng = Random::seed_from_u64(0);
        for algo in MazeGenAlgo::ALL {
            let maze = algo
                .generator(Selection::Random)
                .generate(4, 6, &mut rng)
                .unwrap();
            assert!(maze.is_perfect(), "{}", algo);
        }
    }
}

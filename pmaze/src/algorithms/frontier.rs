use std::{collections::VecDeque, fmt, str::FromStr};

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use super::Random;

/// Order in which a [`Bag`] hands out its pending items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Last in, first out
    #[default]
    Stack,
    /// First in, first out
    Queue,
    /// Uniformly random
    Random,
}

impl Selection {
    pub const ALL: [Selection; 3] = [Selection::Stack, Selection::Queue, Selection::Random];

    pub fn name(self) -> &'static str {
        match self {
            Selection::Stack => "stack",
            Selection::Queue => "queue",
            Selection::Random => "random",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selection::ALL
            .into_iter()
            .find(|selection| selection.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown selection '{}', expected stack, queue or random", s))
    }
}

/// Container of pending items, for the iterative generators.
pub trait Frontier<T> {
    fn add(&mut self, item: T);

    /// The item that [`Frontier::pop`] would remove, without removing it.
    fn peek(&mut self) -> Option<T>;

    fn pop(&mut self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct Bag<T> {
    items: VecDeque<T>,
    selection: Selection,
    rng: Random,
    // random pick, kept until the bag changes, so peek and pop agree
    picked: Option<usize>,
}

impl<T: Copy> Bag<T> {
    pub fn new(selection: Selection, rng: Random) -> Self {
        Self {
            items: VecDeque::new(),
            selection,
            rng,
            picked: None,
        }
    }

    fn current(&mut self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }

        Some(match self.selection {
            Selection::Stack => self.items.len() - 1,
            Selection::Queue => 0,
            Selection::Random => *self
                .picked
                .get_or_insert_with(|| self.rng.gen_range(0..self.items.len())),
        })
    }
}

impl<T: Copy> Frontier<T> for Bag<T> {
    fn add(&mut self, item: T) {
        self.items.push_back(item);
        self.picked = None;
    }

    fn peek(&mut self) -> Option<T> {
        let idx = self.current()?;
        self.items.get(idx).copied()
    }

    fn pop(&mut self) -> Option<T> {
        let idx = self.current()?;
        self.picked = None;
        match self.selection {
            Selection::Stack => self.items.pop_back(),
            Selection::Queue => self.items.pop_front(),
            Selection::Random => self.items.swap_remove_back(idx),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Args, Subcommand};
use pmaze::{
    algorithms::{random_from_seed, MazeGenAlgo, Random, Selection},
    array::Array2D,
    dims::Dims,
    gameboard::{Cell, Maze, Observer},
    pathfinder,
    verifier::{self, Imperfection},
    MazeError,
};
use rand::{thread_rng, Rng as _};

use crate::settings::{Settings, SettingsError};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("maze is not perfect: {0}")]
    Imperfect(#[from] Imperfection),
    #[error("no exit is reachable from {0:?}")]
    NoPath(Dims),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new perfect maze
    Generate(GenerateArgs),
    /// Mark the path from a cell to the exit
    Solve(SolveArgs),
    /// Check that a maze is perfect
    Verify {
        #[clap(help = "Maze file")]
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    #[clap(short, long, help = "recursive, iterative or wilson")]
    pub algo: Option<MazeGenAlgo>,
    #[clap(short, long, help = "stack, queue or random, for the iterative generator")]
    pub selection: Option<Selection>,
    #[clap(short = 'H', long)]
    pub height: Option<usize>,
    #[clap(short = 'W', long)]
    pub width: Option<usize>,
    #[clap(long, help = "Seed for a reproducible maze")]
    pub seed: Option<u64>,
    #[clap(short, long, help = "Output file, stdout if not set")]
    pub output: Option<PathBuf>,
    #[clap(long, action, help = "Verify the maze before writing it")]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    #[clap(help = "Maze file")]
    pub path: PathBuf,
    #[clap(long, value_parser = parse_pos, help = "Start cell as X,Y, the first cell if not set")]
    pub start: Option<Dims>,
    #[clap(short, long, help = "Output file, stdout if not set")]
    pub output: Option<PathBuf>,
}

pub fn parse_pos(s: &str) -> Result<Dims, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid coordinate '{}': {}", v, err))
    };
    Ok(Dims(coord(x)?, coord(y)?))
}

/// Paces generation in slow mode and traces every change.
#[derive(Debug)]
pub struct SlowObserver {
    delay: Option<Duration>,
    changes: usize,
}

impl SlowObserver {
    pub fn new(delay: Option<Duration>) -> Self {
        Self { delay, changes: 0 }
    }
}

impl Observer for SlowObserver {
    fn on_change(&mut self, cells: &Array2D<Cell>) {
        self.changes += 1;
        log::trace!(
            "change #{}, {} marked cells",
            self.changes,
            cells.iter().filter(|cell| cell.is_marked()).count()
        );
    }

    fn frame_delay(&self) -> Option<Duration> {
        self.delay
    }
}

pub fn run(command: Command, settings: &Settings) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => {
            let maze = generate(&args, settings)?;
            write_maze(&maze, args.output.as_deref())
        }
        Command::Solve(args) => {
            let mut maze = Maze::load(&args.path)?;
            let path = solve(&mut maze, args.start)?;
            log::info!("found a path of {} steps", path.len() - 1);
            write_maze(&maze, args.output.as_deref())
        }
        Command::Verify { path } => {
            let maze = Maze::load(&path)?;
            verifier::verify(&maze)?;
            println!("{}: perfect {}x{} maze", path.display(), maze.height(), maze.width());
            Ok(())
        }
    }
}

pub fn generate(args: &GenerateArgs, settings: &Settings) -> Result<Maze, CliError> {
    let algo = args.algo.unwrap_or_else(|| settings.get_default_algorithm());
    let selection = args.selection.unwrap_or_else(|| settings.get_selection());
    let height = args.height.unwrap_or_else(|| settings.get_height());
    let width = args.width.unwrap_or_else(|| settings.get_width());
    let seed = args
        .seed
        .or_else(|| settings.get_seed())
        .unwrap_or_else(|| thread_rng().gen());

    log::info!(
        "Generating {}x{} maze with {} (seed {})",
        height,
        width,
        algo,
        seed
    );

    let mut rng: Random = random_from_seed(Some(seed));
    let mut maze = Maze::new(height, width)?
        .with_observer(Box::new(SlowObserver::new(settings.get_frame_delay())));
    algo.generator(selection).carve(&mut maze, &mut rng);
    maze.set_observer(None);

    if args.verify {
        verifier::verify(&maze)?;
    }

    Ok(maze)
}

/// Clears old marks and marks the path from `start` to the exit.
pub fn solve(maze: &mut Maze, start: Option<Dims>) -> Result<Vec<Dims>, CliError> {
    let start = start.unwrap_or_else(|| maze.first_cell());
    maze.clear_marks();
    pathfinder::find_path(maze, start)?.ok_or(CliError::NoPath(start))
}

fn write_maze(maze: &Maze, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => Ok(maze.save(path)?),
        None => Ok(io::stdout().lock().write_all(maze.to_string().as_bytes())?),
    }
}

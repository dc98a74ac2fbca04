use std::sync::{OnceLock, RwLock};

use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

pub fn get_logger() -> &'static StderrLogger {
    LOGGER.get_or_init(|| StderrLogger::new(LevelFilter::Warn))
}

/// Installs the logger, later calls only change the level.
pub fn init(level: LevelFilter) {
    let logger = get_logger();
    logger.set_level(level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Writes messages to stderr, so they never mix with mazes written to stdout.
pub struct StderrLogger {
    level: RwLock<LevelFilter>,
}

impl StderrLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level: RwLock::new(level),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level.read().map(|level| *level).unwrap_or(LevelFilter::Warn)
    }

    pub fn set_level(&self, level: LevelFilter) {
        if let Ok(mut current) = self.level.write() {
            *current = level;
        }
    }

    pub fn format(record: &Record) -> String {
        format!(
            "[{} {}] {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Raises `level` by one step for every `-v`.
pub fn with_verbosity(level: LevelFilter, verbose: u8) -> LevelFilter {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let current = levels.iter().position(|&l| l == level).unwrap_or(2);
    levels[(current + verbose as usize).min(levels.len() - 1)]
}

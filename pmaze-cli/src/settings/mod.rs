use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use log::LevelFilter;
use pmaze::algorithms::{MazeGenAlgo, Selection};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::constants;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load/save settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings file {path:?}: {source}")]
    Ron {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_algorithm: Option<MazeGenAlgo>,
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub slow: Option<bool>,
    #[serde(default)]
    pub frame_delay_ms: Option<u64>,
}

impl Settings {
    const DEFAULT_HEIGHT: usize = 15;
    const DEFAULT_WIDTH: usize = 25;
    const DEFAULT_FRAME_DELAY: u64 = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        constants::settings_path()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(text)
            .map_err(|source| SettingsError::Ron {
                path: path.to_owned(),
                source,
            })
    }

    /// Loads settings from `path`, writing the default settings there first if it doesn't exist.
    pub fn load(path: PathBuf) -> Result<Self, SettingsError> {
        match fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text, &path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating default settings at {:?}", path);
                Self::reset_config(&path)?;
                Self::parse(DEFAULT_SETTINGS, &path)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    pub fn set_default_algorithm(mut self, value: MazeGenAlgo) -> Self {
        self.default_algorithm = Some(value);
        self
    }

    pub fn get_default_algorithm(&self) -> MazeGenAlgo {
        self.default_algorithm.unwrap_or_default()
    }

    pub fn set_selection(mut self, value: Selection) -> Self {
        self.selection = Some(value);
        self
    }

    pub fn get_selection(&self) -> Selection {
        self.selection.unwrap_or_default()
    }

    pub fn get_height(&self) -> usize {
        self.height.unwrap_or(Self::DEFAULT_HEIGHT)
    }

    pub fn get_width(&self) -> usize {
        self.width.unwrap_or(Self::DEFAULT_WIDTH)
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.log_level.as_deref().map(str::parse) {
            None => LevelFilter::Warn,
            Some(Ok(level)) => level,
            Some(Err(_)) => {
                log::warn!("Invalid log level in settings, using warn");
                LevelFilter::Warn
            }
        }
    }

    pub fn set_slow(mut self, value: bool) -> Self {
        self.slow = Some(value);
        self
    }

    pub fn get_slow(&self) -> bool {
        self.slow.unwrap_or_default()
    }

    /// Pause after every change of a maze, only in slow mode.
    pub fn get_frame_delay(&self) -> Option<Duration> {
        self.get_slow().then(|| {
            Duration::from_millis(self.frame_delay_ms.unwrap_or(Self::DEFAULT_FRAME_DELAY))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_parse() {
        let settings = Settings::parse(DEFAULT_SETTINGS, Path::new("default")).unwrap();
        assert_eq!(settings.get_default_algorithm(), MazeGenAlgo::Iterative);
        assert_eq!(settings.get_selection(), Selection::Stack);
        assert_eq!(settings.get_height(), 15);
        assert_eq!(settings.get_width(), 25);
        assert_eq!(settings.get_seed(), None);
        assert_eq!(settings.get_log_level(), LevelFilter::Warn);
        assert_eq!(settings.get_frame_delay(), None);
    }

    #[test]
    fn partial_settings() {
        let text = "(default_algorithm: wilson, slow: true, log_level: \"debug\", seed: 7)";
        let settings = Settings::parse(text, Path::new("partial")).unwrap();
        assert_eq!(settings.get_default_algorithm(), MazeGenAlgo::Wilson);
        assert_eq!(settings.get_selection(), Selection::Stack);
        assert_eq!(settings.get_seed(), Some(7));
        assert_eq!(settings.get_log_level(), LevelFilter::Debug);
        assert_eq!(settings.get_frame_delay(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn invalid_settings() {
        assert!(matches!(
            Settings::parse("(height: \"tall\")", Path::new("bad")),
            Err(SettingsError::Ron { .. })
        ));

        let settings = Settings {
            log_level: Some("loud".into()),
            ..Settings::new()
        };
        assert_eq!(settings.get_log_level(), LevelFilter::Warn);
    }

    #[test]
    fn builders() {
        let settings = Settings::new()
            .set_default_algorithm(MazeGenAlgo::Recursive)
            .set_selection(Selection::Queue)
            .set_seed(3)
            .set_slow(true);
        assert_eq!(settings.get_default_algorithm(), MazeGenAlgo::Recursive);
        assert_eq!(settings.get_selection(), Selection::Queue);
        assert_eq!(settings.get_seed(), Some(3));
        assert!(settings.get_slow());
    }

    #[test]
    fn load_creates_default_file() {
        let dir = std::env::temp_dir().join(format!("pmaze-settings-{}", std::process::id()));
        let path = dir.join("settings.ron");

        let settings = Settings::load(path.clone()).unwrap();
        assert_eq!(settings.get_width(), 25);
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);

        fs::write(&path, "(width: 3)").unwrap();
        assert_eq!(Settings::load(path.clone()).unwrap().get_width(), 3);

        fs::remove_dir_all(&dir).unwrap();
    }
}

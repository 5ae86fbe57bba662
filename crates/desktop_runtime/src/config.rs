//! Typed runtime configuration and its TOML loader.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DesktopError, DesktopResult};
use crate::model::{
    DesktopState, ThemeMode, Viewport, DEFAULT_PASSWORD, MENU_BAR_HEIGHT, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};
use crate::reducer::DesktopPolicy;

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization; callers validate
/// the loaded value.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// # Errors
    ///
    /// Missing files, unreadable files and TOML parse failures all surface as
    /// [`DesktopError::Config`].
    pub fn load(&self) -> DesktopResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            DesktopError::Config(format!("failed to read {}: {err}", self.path.display()))
        })?;
        toml::from_str(&body).map_err(|err| {
            DesktopError::Config(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub viewport: Viewport,
    pub menu_bar_height: i32,
    pub min_window_width: i32,
    pub min_window_height: i32,
    pub password: String,
    /// Stage mode at session start.
    pub stage_mode: bool,
    pub theme: ThemeMode,
    /// `tracing` level name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// JSON file backing the preference store; in-memory when absent.
    pub state_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            menu_bar_height: MENU_BAR_HEIGHT,
            min_window_width: MIN_WINDOW_WIDTH,
            min_window_height: MIN_WINDOW_HEIGHT,
            password: DEFAULT_PASSWORD.to_string(),
            stage_mode: false,
            theme: ThemeMode::default(),
            log_level: "info".to_string(),
            state_file: None,
        }
    }
}

impl RuntimeConfig {
    /// # Errors
    ///
    /// Returns [`DesktopError::Config`] for malformed TOML or out-of-range values.
    pub fn from_toml_str(body: &str) -> DesktopResult<Self> {
        let config: Self = toml::from_str(body)
            .map_err(|err| DesktopError::Config(format!("failed to parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`DesktopError::Config`] when the file cannot be loaded or fails validation.
    pub fn load(path: impl Into<PathBuf>) -> DesktopResult<Self> {
        let config = ConfigLoader::<Self>::new(path).load()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`DesktopError::Config`] naming the first invalid field.
    pub fn validate(&self) -> DesktopResult<()> {
        if self.viewport.width <= 0 || self.viewport.height <= self.menu_bar_height {
            return Err(DesktopError::Config(
                "viewport must be positive and taller than the menu bar".to_string(),
            ));
        }
        if self.menu_bar_height < 0 {
            return Err(DesktopError::Config(
                "menu_bar_height must not be negative".to_string(),
            ));
        }
        if self.min_window_width <= 0 || self.min_window_height <= 0 {
            return Err(DesktopError::Config(
                "minimum window size must be positive".to_string(),
            ));
        }
        self.tracing_level()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DesktopError::Config`] for an unknown level name.
    pub fn tracing_level(&self) -> DesktopResult<tracing::Level> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| DesktopError::Config(format!("unknown log level `{}`", self.log_level)))
    }

    pub fn policy(&self) -> DesktopPolicy {
        DesktopPolicy {
            min_window_size: (self.min_window_width, self.min_window_height),
            password: self.password.clone(),
        }
    }

    /// Fresh session state honoring the configured stage mode and theme.
    pub fn initial_state(&self) -> DesktopState {
        DesktopState {
            stage_mode: self.stage_mode,
            theme: self.theme,
            ..DesktopState::default()
        }
    }
}

//! Settings loading.
//!
//! Settings come from an optional `config.toml`, then environment overrides.
//! A missing file means defaults; an invalid value anywhere is an error.

mod error;

pub use error::ConfigError;

use crate::page::PageConfig;
use crate::throttle::ThrottleWindow;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding the throttle window, in milliseconds.
pub const WINDOW_ENV: &str = "EVENT_THROTTLE_WINDOW_MS";

/// Window used when neither the file nor the environment sets one.
pub const DEFAULT_WINDOW_MS: u64 = 100;

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    throttle: ThrottleSection,
    #[serde(default)]
    page: PageConfig,
}

/// The `[throttle]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ThrottleSection {
    /// Minimum interval between handler executions, in milliseconds.
    window_ms: Option<i64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Window applied to scroll and pointer handlers.
    pub window: ThrottleWindow,
    /// Page behaviour tunables.
    pub page: PageConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: ThrottleWindow::from_millis(DEFAULT_WINDOW_MS).unwrap_or_default(),
            page: PageConfig::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path` (if given and present) and the environment.
    ///
    /// The environment takes precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if any
    /// value, including an environment override, is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => load_file(path)?.unwrap_or_default(),
            None => Self::default(),
        };

        if let Some(window) = window_from_env()? {
            debug!(%window, var = WINDOW_ENV, "Window overridden by environment");
            settings.window = window;
        }

        info!(window = %settings.window, "Settings resolved");
        Ok(settings)
    }

    /// Replaces the window with an explicit millisecond value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Throttle`] if `millis` is out of range.
    pub fn with_window_ms(mut self, millis: u64) -> Result<Self, ConfigError> {
        self.window = ThrottleWindow::from_millis(millis)?;
        Ok(self)
    }
}

/// Loads the config file if it exists.
fn load_file(path: &Path) -> Result<Option<Settings>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(None);
    }
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: display.clone(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
        path: display.clone(),
        source,
    })?;

    let window = match parsed.throttle.window_ms {
        Some(millis) => {
            ThrottleWindow::try_from(millis).map_err(|e| ConfigError::ValidationError {
                path: display.clone(),
                message: e.to_string(),
            })?
        }
        None => Settings::default().window,
    };
    parsed
        .page
        .validate()
        .map_err(|message| ConfigError::ValidationError {
            path: display,
            message,
        })?;

    Ok(Some(Settings {
        window,
        page: parsed.page,
    }))
}

/// Reads the window override, if set.
fn window_from_env() -> Result<Option<ThrottleWindow>, ConfigError> {
    match std::env::var(WINDOW_ENV) {
        Ok(value) => value
            .parse::<ThrottleWindow>()
            .map(Some)
            .map_err(|source| ConfigError::Environment {
                var: WINDOW_ENV,
                source,
            }),
        Err(_) => Ok(None),
    }
}

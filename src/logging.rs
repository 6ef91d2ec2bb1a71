//! Log subscriber installation for binaries and demos.
//!
//! The library itself only emits `tracing` events; nothing is printed until a
//! subscriber is installed. [`init`] installs a `tracing-subscriber` formatter
//! printing severity, call site and message.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::decorator_error::ConfigError;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum severity emitted when no directives are given.
    pub level: Level,
    /// `RUST_LOG`-style directives; they take precedence over `level`.
    pub directives: Option<String>,
    /// Print the call-site target (module path) of each record.
    pub show_target: bool,
    pub show_thread_names: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            directives: None,
            show_target: true,
            show_thread_names: false,
        }
    }
}

impl LogConfig {
    /// Default configuration, with directives taken from `RUST_LOG` when set.
    pub fn from_env() -> Self {
        Self {
            directives: std::env::var(EnvFilter::DEFAULT_ENV)
                .ok()
                .filter(|d| !d.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_thread_names(mut self, show: bool) -> Self {
        self.show_thread_names = show;
        self
    }

    pub fn with_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    fn filter(&self) -> Result<EnvFilter, ConfigError> {
        match &self.directives {
            Some(directives) => EnvFilter::try_new(directives)
                .map_err(|e| ConfigError::Subscriber(e.to_string())),
            None => Ok(EnvFilter::default().add_directive(LevelFilter::from_level(self.level).into())),
        }
    }
}

/// Install the global log subscriber.
///
/// # Errors
///
/// [`ConfigError::Subscriber`] if the directives do not parse or a global
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter()?)
        .with_target(config.show_target)
        .with_thread_names(config.show_thread_names)
        .try_init()
        .map_err(|e| ConfigError::Subscriber(e.to_string()))
}

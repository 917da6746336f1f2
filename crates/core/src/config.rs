use crate::error::{CoreError, Result};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Period between two sampling cycles, in milliseconds
    pub refresh_ms: u64,

    /// Slice the input listener sleeps between two keyboard polls, in milliseconds
    pub input_poll_ms: u64,

    /// Render on the alternate screen with absolute cursor positioning
    pub fullscreen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_ms: 2000,
            input_poll_ms: 100,
            fullscreen: false,
        }
    }
}

impl Config {
    /// Build the configuration from the built-in defaults and the CLI overrides
    pub fn load(cli_config: Option<&CliConfig>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(cli) = cli_config {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if cli.fullscreen {
            self.fullscreen = true;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.refresh_ms < 50 {
            return Err(CoreError::config(
                "Refresh interval must be at least 50ms",
            ));
        }

        if self.refresh_ms > 10000 {
            return Err(CoreError::config(
                "Refresh interval must be at most 10 seconds",
            ));
        }

        if self.input_poll_ms == 0 || self.input_poll_ms > self.refresh_ms {
            return Err(CoreError::config(format!(
                "Input poll interval must be between 1ms and the refresh interval ({}ms)",
                self.refresh_ms
            )));
        }

        Ok(())
    }

    /// Get refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// Get input poll interval as Duration
    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }
}

/// Settings taken from the command line
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub fullscreen: bool,
}

//

use std::time::Duration;

use clap::Parser;

use crate::core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub consumers: usize,
    pub max_delay: Duration,
    pub debug: bool,
}

impl Config {
    pub fn new(consumers: usize) -> Self {
        Self {
            consumers,
            max_delay: Duration::from_secs(0),
            debug: false,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.consumers == 0 {
            return Err(Error::NoConsumers);
        }
        Ok(())
    }
}

/// Sum integers from stdin through a single-slot pipeline of consumer threads.
#[derive(Parser, Debug)]
#[command(version, about, disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Number of consumer threads
    #[arg(value_name = "CONSUMERS")]
    pub consumers: usize,

    /// Upper bound of each consumer's random sleep, in milliseconds (0 disables sleeping)
    #[arg(value_name = "MAX_DELAY_MS")]
    pub max_delay_ms: u64,

    /// Any value enables the per-item debug trace on stderr
    #[arg(value_name = "DEBUG", allow_hyphen_values = true)]
    pub debug: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config::new(self.consumers)
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
            .with_debug(self.debug.is_some())
    }
}

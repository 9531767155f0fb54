/// Configuration management
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `OUTLET_REBUILD_DIR`: Directory that rebuilt artifacts are written to (default: `.`)
/// - `OUTLET_LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `RUST_LOG`: Log filter, read by the tracing subscriber
///
/// # Example
///
/// ```no_run
/// use outlet_shared::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Rebuilding into {}", config.rebuild_dir.display());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,

    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!(
                "OUTLET_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                other
            ),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default directory for rebuilt artifacts
    pub rebuild_dir: PathBuf,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rebuild_dir: PathBuf::from("."),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let rebuild_dir = match lookup("OUTLET_REBUILD_DIR") {
            Some(dir) if dir.trim().is_empty() => {
                anyhow::bail!("OUTLET_REBUILD_DIR must not be empty")
            }
            Some(dir) => PathBuf::from(dir),
            None => defaults.rebuild_dir,
        };

        let log_format = match lookup("OUTLET_LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => defaults.log_format,
        };

        Ok(Config {
            rebuild_dir,
            log_format,
        })
    }
}

//! # Outlet CLI
//!
//! Command-line front end for the output adapters.
//!
//! ## Usage
//!
//! ```bash
//! outlet aliases
//! echo '{"cat": 0.2, "dog": 0.9}' | outlet postprocess label --options '{"top_k": 1}'
//! outlet postprocess pil --input photo.png --as png > wire.json
//! outlet rebuild image --input encoded.txt --dir ./out
//! ```
//!
//! Logs go to stderr; `RUST_LOG` and `OUTLET_LOG_FORMAT` control them.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use outlet_adapters::adapters::{aliases, create_adapter, create_adapter_with};
use outlet_shared::codec::decode_png;
use outlet_shared::config::{Config, LogFormat};
use outlet_shared::models::{DataTable, NdArray, RawValue};
use serde_json::Value as JsonValue;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "outlet", version, about = "Convert function outputs into wire values")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered aliases with their kind and preset options
    Aliases,
    /// Postprocess a raw value and print the wire value
    Postprocess {
        /// Adapter alias (see `outlet aliases`)
        alias: String,
        /// Options object merged over the alias preset
        #[arg(long)]
        options: Option<String>,
        /// Input file (or - for stdin)
        #[arg(long, default_value = "-")]
        input: String,
        /// How to read the input
        #[arg(long = "as", value_enum, default_value_t = InputShape::Json)]
        shape: InputShape,
    },
    /// Rebuild an artifact from a transmitted wire value
    Rebuild {
        /// Adapter alias (see `outlet aliases`)
        alias: String,
        /// Input file (or - for stdin)
        #[arg(long, default_value = "-")]
        input: String,
        /// Output directory (default: OUTLET_REBUILD_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Shape of the raw value read from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputShape {
    /// Any JSON value
    Json,
    /// Nested JSON lists of numbers
    Array,
    /// `{"headers": [...], "data": [[...]]}`
    Table,
    /// A filesystem path
    Path,
    /// PNG bytes, decoded to an image
    Png,
}

impl InputShape {
    fn parse(self, bytes: &[u8]) -> anyhow::Result<RawValue> {
        let value = match self {
            InputShape::Json => RawValue::Json(parse_json(bytes)?),
            InputShape::Array => RawValue::Array(NdArray::from_nested(&parse_json(bytes)?)?),
            InputShape::Table => RawValue::Table(DataTable::from_json(&parse_json(bytes)?)?),
            InputShape::Path => {
                let text = std::str::from_utf8(bytes).context("path input must be UTF-8")?;
                RawValue::Path(PathBuf::from(text.trim()))
            }
            InputShape::Png => RawValue::Image(decode_png(bytes)?),
        };

        Ok(value)
    }
}

fn parse_json(bytes: &[u8]) -> anyhow::Result<JsonValue> {
    serde_json::from_slice(bytes).context("input is not valid JSON")
}

fn read_input(input: &str) -> anyhow::Result<Vec<u8>> {
    if input == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read(input).with_context(|| format!("failed to read {}", input))
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "outlet_adapters=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    match cli.command {
        Commands::Aliases => {
            for entry in aliases() {
                println!(
                    "{:<12} {:<16} {}",
                    entry.alias,
                    entry.kind.name(),
                    entry.preset_options()
                );
            }
        }
        Commands::Postprocess {
            alias,
            options,
            input,
            shape,
        } => {
            let overrides = match options {
                Some(text) => serde_json::from_str::<JsonValue>(&text)
                    .context("--options is not valid JSON")?,
                None => JsonValue::Null,
            };
            let adapter = create_adapter_with(&alias, &overrides)?;
            let value = shape.parse(&read_input(&input)?)?;

            let wire = adapter.postprocess(value)?;
            println!("{}", serde_json::to_string_pretty(&wire)?);
        }
        Commands::Rebuild { alias, input, dir } => {
            let adapter = create_adapter(&alias)?;
            let data = String::from_utf8(read_input(&input)?).context("input must be UTF-8")?;
            let dir = dir.unwrap_or(config.rebuild_dir);

            let reference = adapter.rebuild(&dir, data.trim())?;
            println!("{}", serde_json::to_string_pretty(&reference)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_input_shapes() {
        let value = InputShape::Json.parse(br#"{"a": 1}"#).unwrap();
        assert_eq!(value.as_json(), Some(&json!({"a": 1})));

        let value = InputShape::Array.parse(b"[[1, 2], [3, 4]]").unwrap();
        assert!(matches!(value, RawValue::Array(ref a) if a.shape() == [2, 2]));

        let value = InputShape::Table.parse(br#"{"headers": ["x"], "data": [[1]]}"#).unwrap();
        assert_eq!(value.shape_name(), "table");

        let value = InputShape::Path.parse(b"/tmp/a.png\n").unwrap();
        assert_eq!(value.as_path(), Some(std::path::Path::new("/tmp/a.png")));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(InputShape::Json.parse(b"{oops").is_err());
        assert!(InputShape::Array.parse(b"[[1], [2, 3]]").is_err());
        assert!(InputShape::Png.parse(b"not a png").is_err());
    }
}

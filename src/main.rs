use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use web3_rust::rlp::{decode_all_with, encode_item};
use web3_rust::{hex_input, inspect, item_to_json, json_to_item, Config, LogConfig};

#[derive(Parser)]
#[command(name = "rlp")]
#[command(about = "Encode, decode and inspect RLP data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Accept non-canonical length prefixes and integers
    #[arg(long, global = true)]
    permissive: bool,

    /// Maximum list nesting depth
    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode every item in a hex buffer and print it
    Decode {
        /// Hex input, or `-` to read it from stdin
        input: String,

        /// Output format: json or text
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Encode a JSON tree and print the hex result
    Encode {
        /// JSON input, or `-` to read it from stdin
        json: String,
    },

    /// Print the header of every item in a hex buffer
    Inspect {
        /// Hex input, or `-` to read it from stdin
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if cli.permissive {
        config.decoder.strict = false;
    }
    if let Some(max_depth) = cli.max_depth {
        config.decoder.max_depth = max_depth;
    }
    config.validate()?;

    init_logging(&config.log);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Decode { input, format } => {
            if let Some(format) = format {
                config.output.format = format;
                config.validate()?;
            }

            let data = read_hex(&input)?;
            let items = decode_all_with(&data, &config.decoder)
                .context("Failed to decode input")?;
            info!(items = items.len(), bytes = data.len(), "decoded input");

            for item in &items {
                if config.output.format == "json" {
                    println!("{}", item_to_json(item)?);
                } else {
                    println!("{}", item);
                }
            }
        }

        Commands::Encode { json } => {
            let text = read_arg(&json)?;
            let value: serde_json::Value =
                serde_json::from_str(&text).context("Failed to parse JSON input")?;
            let item = json_to_item(&value)?;
            let encoded = encode_item(&item);
            info!(bytes = encoded.len(), "encoded input");

            println!("{}", config.format_hex(&encoded));
        }

        Commands::Inspect { input } => {
            let data = read_hex(&input)?;
            let entries = inspect(&data, &config.decoder).context("Failed to inspect input")?;
            for entry in &entries {
                println!("{}", entry);
            }
        }
    }

    Ok(())
}

fn init_logging(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_arg(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn read_hex(arg: &str) -> Result<Vec<u8>> {
    hex_input(&read_arg(arg)?)
}

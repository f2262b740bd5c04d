use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use web3_rlp::DecoderConfig;

/// Complete tool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decoding policy
    pub decoder: DecoderConfig,
    /// Logging configuration
    pub log: LogConfig,
    /// Output configuration
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level or `EnvFilter` directive
    pub level: String,
    /// Enable JSON logging
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `json` or `text`
    pub format: String,
    /// Prefix hex output with `0x`
    pub prefix: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            prefix: true,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const OUTPUT_FORMATS: [&str; 2] = ["json", "text"];

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context("Failed to read configuration file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .context("Failed to write configuration file")?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.decoder.max_depth == 0 {
            anyhow::bail!("decoder.max_depth must be greater than 0");
        }

        // Directives such as `web3_rlp=trace` are left to EnvFilter.
        let level = self.log.level.to_lowercase();
        if !level.contains('=') && !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!("Unknown log level: {}", self.log.level);
        }

        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            anyhow::bail!("Unknown output format: {}", self.output.format);
        }

        Ok(())
    }

    /// Hex rendering honouring `output.prefix`.
    pub fn format_hex(&self, bytes: &[u8]) -> String {
        if self.output.prefix {
            format!("0x{}", hex::encode(bytes))
        } else {
            hex::encode(bytes)
        }
    }
}

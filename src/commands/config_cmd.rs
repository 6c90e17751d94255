use clap::{Args, Subcommand};
use std::path::Path;

use super::OutputFormat;
use crate::config::{Config, DEFAULT_PHOTO_MAX_BYTES};

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# healthlog configuration
#
# Environment variables take priority over this file:
#   HEALTHLOG_CLOCK_FORMAT, HEALTHLOG_PHOTO_MAX_BYTES

# How completion times are shown: 24h (14:05) or 12h (오후 02:05)
clock_format: 24h

# Largest image file accepted as a meal photo, in bytes
photo_max_bytes: {photo_max_bytes}
";

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default config file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<&Path>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("clock_format: {}", config.clock_format.value);
                        println!("  source: {}", config.clock_format.source);
                        println!();

                        println!("photo_max_bytes: {}", config.photo_max_bytes.value);
                        println!("  source: {}", config.photo_max_bytes.source);
                    }
                }
                Ok(())
            }
            ConfigSubcommand::Init => {
                let path = config_path
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Config::default_config_path);
                write_default_config(&path)?;
                println!("Wrote {}", path.display());
                Ok(())
            }
        }
    }
}

fn write_default_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()).into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents =
        DEFAULT_CONFIG_TEMPLATE.replace("{photo_max_bytes}", &DEFAULT_PHOTO_MAX_BYTES.to_string());
    std::fs::write(path, contents)?;
    tracing::info!("Created config file {}", path.display());
    Ok(())
}

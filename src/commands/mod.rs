mod config_cmd;
mod shell_cmd;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use shell_cmd::ShellCommand;

#[derive(Clone, Debug, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

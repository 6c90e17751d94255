use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::OutputFormat;

/// One line typed at the shell prompt
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub action: Action,
}

impl ShellLine {
    /// Parse a prompt line. Words are split on whitespace.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Action {
    /// Select a day: YYYY-MM-DD, today, +N or -N
    Date {
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Show the selected day
    Show {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Start editing part of the selected day
    Open {
        #[command(subcommand)]
        target: OpenTarget,
    },

    /// Set the main text of the open edit
    Set {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Set the meal time of the open edit
    Time { value: Option<String> },

    /// Attach an image file to the open meal edit
    Photo {
        path: Option<PathBuf>,

        /// Remove the photo instead
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },

    /// Set the slot count of the open settings edit
    Count { value: String },

    /// Set the daily water target of the open settings edit
    Target { value: String },

    /// Set the meal labels of the open settings edit (comma-separated)
    Labels {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        labels: Vec<String>,
    },

    /// Commit the open edit
    Save,

    /// Discard the open edit
    Cancel,

    /// Toggle completion of a water or meal slot
    Done {
        #[command(subcommand)]
        target: DoneTarget,
    },

    /// Show the weight trend across all days
    Trend {
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum OpenTarget {
    /// One water slot (numbered from 1)
    Water { slot: usize },
    /// Water slot count and target
    WaterSettings,
    /// One meal slot (numbered from 1)
    Meal { slot: usize },
    /// Meal slot count and labels
    MealSettings,
    Weight,
    Exercise,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum DoneTarget {
    Water { slot: usize },
    Meal { slot: usize },
}

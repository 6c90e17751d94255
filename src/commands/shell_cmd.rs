use clap::Args;
use healthlog_core::{DateKey, SystemClock};
use std::io;

use crate::config::Config;
use crate::shell::Shell;

#[derive(Args, Default)]
pub struct ShellCommand {
    /// Day to start on (YYYY-MM-DD, default: today)
    #[arg(long, short)]
    pub date: Option<String>,
}

impl ShellCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let start = self.date.as_deref().map(DateKey::parse).transpose()?;
        let clock = SystemClock::new(config.clock_format.value);
        let mut shell = Shell::new(clock, start, config.photo_max_bytes.value);

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        shell.run(stdin.lock(), &mut stdout)?;

        tracing::info!(
            "Shell closed on {} ({} days, {} changes)",
            shell.selected(),
            shell.store().len(),
            shell.store().revision()
        );
        Ok(())
    }
}

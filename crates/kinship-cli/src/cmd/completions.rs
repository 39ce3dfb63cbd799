//! `kin completions` — shell completion scripts generated from the clap definition.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `kin completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to stdout, registered for the
/// `kin` binary name.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    generate(shell, command, "kin", &mut out);
    Ok(())
}

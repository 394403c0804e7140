use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Shell};

/// Print a completion script for the given shell to stdout
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut std::io::stdout().lock());
    Ok(())
}

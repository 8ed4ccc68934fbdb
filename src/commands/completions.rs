use crate::Cli;
use anyhow::{bail, Result};
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io;

pub fn run(shell: String) -> Result<()> {
    let mut cmd = Cli::command();
    match shell.as_str() {
        "bash" => generate(Bash, &mut cmd, "asc", &mut io::stdout()),
        "zsh" => generate(Zsh, &mut cmd, "asc", &mut io::stdout()),
        "fish" => generate(Fish, &mut cmd, "asc", &mut io::stdout()),
        other => bail!("unsupported shell '{}', choose: bash, zsh, fish", other),
    }
    Ok(())
}

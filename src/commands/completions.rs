//! # Shell Completions
//!
//! Generates shell completion scripts for `xmlcfg` with `clap_complete`.
//! Flags hidden from help are left out of the script as well.
//!
//! ```bash
//! xmlcfg --completions bash > ~/.local/share/bash-completion/completions/xmlcfg
//! xmlcfg --completions zsh > ~/.zfunc/_xmlcfg
//! ```

use anyhow::Result;
use clap::ValueEnum;
use clap_complete::{generate, Shell};
use std::io;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Write the completion script for `shell` to stdout
pub fn execute(shell: CompletionShell, cmd: &mut clap::Command) -> Result<()> {
    let shell: Shell = shell.into();
    generate(shell, cmd, "xmlcfg", &mut io::stdout());
    Ok(())
}

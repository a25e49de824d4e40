use anyhow::{Context as _, Result};
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const BIN_NAME: &str = "dialbook";

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: CompletionShell,
    /// Write the script to PATH instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl CompletionShell {
    fn shell(self) -> Shell {
        match self {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
        }
    }
}

/// Completion scripts never touch config, the store or the network, so the
/// command works on a fresh install.
pub fn emit(args: CompletionsArgs) -> Result<()> {
    let mut cmd = crate::Cli::command();
    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("create completion file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_script(args.shell, &mut cmd, &mut writer);
            writer
                .flush()
                .with_context(|| format!("write completion file {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_script(args.shell, &mut cmd, &mut stdout);
        }
    }
    Ok(())
}

fn write_script(shell: CompletionShell, cmd: &mut clap::Command, out: &mut dyn Write) {
    generate(shell.shell(), cmd, BIN_NAME, out);
}

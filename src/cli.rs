// Command-line interface.
// Argument definitions and dispatch to the command entry points.

use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::state::{AlwaysProceed, LinePrompt};

#[derive(Parser, Debug)]
#[command(
    name = "esa",
    about = "Browse esa.io categories and posts through a local response cache"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete the local response cache
    Flush,
    /// List a category's subcategories and posts
    Ls(LsArgs),
    /// Reserved for future use
    Show(ReservedArgs),
    /// Reserved for future use
    Tree(ReservedArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct LsArgs {
    /// Category path, e.g. "Engineering/Backend"; omit for the top level
    pub category: Option<String>,

    /// List categories only
    #[arg(short = 'c', long)]
    pub categories_only: bool,

    /// List posts only
    #[arg(short = 'p', long)]
    pub posts_only: bool,

    /// Fetch missing pages without asking
    #[arg(short = 'I', long)]
    pub non_interactive: bool,
}

impl LsArgs {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReservedArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Run the selected command with configuration from the process environment.
pub async fn run(cli: Cli) -> Result<()> {
    dispatch(cli, Config::from_env).await
}

/// Load configuration only for the commands that touch the cache or the API.
async fn dispatch<F>(cli: Cli, load_config: F) -> Result<()>
where
    F: FnOnce() -> Result<Config>,
{
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Flush => commands::flush(&load_config()?),
        Command::Ls(args) => {
            let config = load_config()?;
            if args.non_interactive {
                commands::ls(&config, &args, AlwaysProceed, &mut stdout).await
            } else {
                commands::ls(&config, &args, LinePrompt::stdio(), &mut stdout).await
            }
        }
        Command::Show(args) => commands::show(&args),
        Command::Tree(args) => commands::tree(&args),
    }
}

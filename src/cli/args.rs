//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan QML files for translation keys and merge new ones into en.json
//! - `update`: Pull translations, validate them, and regenerate the QML module
//! - `init`: Initialize a lingo configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show what would change without modifying en.json
    #[arg(long, conflicts_with = "auto")]
    pub dry_run: bool,

    /// Automatically add new strings with suggested values (no prompts)
    #[arg(long)]
    pub auto: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Skip pulling from Transifex (use existing JSON files)
    #[arg(long)]
    pub no_pull: bool,

    /// Only validate existing translations without updating
    #[arg(long)]
    pub validate_only: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys from QML files and merge new ones into en.json
    Extract(ExtractArgs),
    /// Pull translations, validate, and regenerate the TranslationManager module
    Update(UpdateArgs),
    /// Initialize a new .lingorc.json configuration file
    Init,
}

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "star-config-gen")]
#[command(about = "Generate MikroTik RouterOS scripts from a star topology description")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Generate router scripts for a topology file.
    Generate(GenerateArgs),
    /// Show the networks a topology enumerates to.
    Networks(NetworksArgs),
    /// Merge several .rsc scripts into one.
    Merge(MergeArgs),
    /// List games available for game routing.
    Games(GamesArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Topology file (.toml, otherwise JSON).
    pub topology: PathBuf,
    #[arg(long, value_enum, default_value_t = RouterSelect::All)]
    pub router: RouterSelect,
    #[arg(long, value_enum, default_value_t = ScriptFormat::Script)]
    pub format: ScriptFormat,
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Game catalog replacing the built-in one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct NetworksArgs {
    pub topology: PathBuf,
    #[arg(long, value_enum, default_value_t = TableFormat::Text)]
    pub format: TableFormat,
}

#[derive(Parser, Debug)]
pub struct MergeArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(long)]
    pub output: PathBuf,
    /// Coalesce adjacent `set` commands on the same item.
    #[arg(long)]
    pub shorten: bool,
}

#[derive(Parser, Debug)]
pub struct GamesArgs {
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouterSelect {
    Master,
    Slave,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptFormat {
    Script,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Text,
    Json,
}

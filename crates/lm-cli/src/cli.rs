use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lm_types::LineId;

#[derive(Parser)]
#[command(
    name = "linemerge",
    about = "Merge segmented line fragments into a single line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Infer the reading order of the selected lines
    Order(SelectionArgs),
    /// Merge the selected lines and print the resulting line
    Merge(SelectionArgs),
    /// Print the sentinel cost matrix for the selected lines
    Matrix(SelectionArgs),
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Document snapshot (JSON)
    pub document: PathBuf,

    /// Line ids to merge, comma separated (`3,1,2` or `line#3,line#1`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub lines: Vec<LineId>,

    /// Merge configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Command {
    pub fn selection(&self) -> &SelectionArgs {
        match self {
            Command::Order(args) | Command::Merge(args) | Command::Matrix(args) => args,
        }
    }
}

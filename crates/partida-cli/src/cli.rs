use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use partida_types::{Circuit, EntryId};

#[derive(Parser)]
#[command(
    name = "partida",
    about = "Partida — double-entry journal, account ledger, and trial balance",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Book file (chart of accounts and posted entries, JSON)
    #[arg(short, long, global = true, default_value = "books.json")]
    pub books: PathBuf,

    /// Reporting configuration (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify the book file and summarize it
    Check,
    /// List entries, most recent first
    Diario(DiarioArgs),
    /// Show one account's movements and running balance
    Mayor(MayorArgs),
    /// Trial balance for a period and circuit
    Sumas(SumasArgs),
    /// Post an entry read from a JSON draft
    Post(PostArgs),
    /// Post the offsetting entry of an existing one
    Reverse(ReverseArgs),
}

#[derive(Args)]
pub struct DiarioArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct MayorArgs {
    pub account: String,
}

#[derive(Args)]
pub struct SumasArgs {
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long)]
    pub circuit: Option<Circuit>,
}

#[derive(Args)]
pub struct PostArgs {
    /// Draft file: {"date", "concept", "circuit"?, "lines": [...]}
    pub entry: PathBuf,
    /// Save the updated book file
    #[arg(short, long)]
    pub write: bool,
}

#[derive(Args)]
pub struct ReverseArgs {
    pub id: EntryId,
    #[arg(long)]
    pub date: NaiveDate,
    /// Save the updated book file
    #[arg(short, long)]
    pub write: bool,
}

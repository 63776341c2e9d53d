use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xml_equiv_core::WhitespaceHandling;

#[derive(Parser, Debug)]
#[command(name = "xml-equiv")]
#[command(about = "Check XML documents for semantic equivalence")]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare a control document against a test document.
    Compare(CompareArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    pub control: PathBuf,
    pub test: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print only the one-line verdict.
    #[arg(long)]
    pub summary: bool,
    /// Print nothing; rely on the exit status.
    #[arg(short, long)]
    pub quiet: bool,
    /// Which whitespace-only text nodes take part in the comparison.
    #[arg(long, value_enum)]
    pub whitespace: Option<WhitespaceArg>,
    /// Optional TOML file with comparison settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Label shown in the report header.
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum WhitespaceArg {
    All,
    Significant,
    None,
}

impl From<WhitespaceArg> for WhitespaceHandling {
    fn from(arg: WhitespaceArg) -> Self {
        match arg {
            WhitespaceArg::All => WhitespaceHandling::All,
            WhitespaceArg::Significant => WhitespaceHandling::Significant,
            WhitespaceArg::None => WhitespaceHandling::None,
        }
    }
}

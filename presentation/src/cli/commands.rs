//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for round results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every advisor opinion
    Full,
    /// Only the consensus summary
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for consilium
#[derive(Parser, Debug)]
#[command(name = "consilium")]
#[command(author, version, about = "Advisory panel - specialist advisors discuss a case and a lead synthesizes a consensus")]
#[command(long_about = r#"
Consilium fans a case description out to a panel of specialist advisors
(each backed by a model call), then has the lead advisor synthesize the
surviving opinions into one consensus document.

Rounds are memoized by their full input, rate limited per identity, and
persisted to a bounded on-disk session store.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./consilium.toml      Project-level config
3. ~/.config/consilium/config.toml   Global config

Example:
  consilium "58-year-old with chest pain and dyspnea; onset 2h ago"
  consilium --questions "58-year-old with chest pain"
  consilium --session round_00003
"#)]
pub struct Cli {
    /// The case description (agenda) for the panel
    pub agenda: Option<String>,

    /// Generate clarifying intake questions instead of running a round
    #[arg(long)]
    pub questions: bool,

    /// How many clarifying questions to request
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Model for every advisor (overrides the configured default)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Deliberation rounds (overrides the configured default)
    #[arg(long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Bypass the round cache
    #[arg(long)]
    pub no_cache: bool,

    /// Skip web/literature context providers
    #[arg(long)]
    pub no_context: bool,

    /// Extra context blocks read from files
    #[arg(long, value_name = "FILE")]
    pub context_file: Vec<PathBuf>,

    /// Rate-limit identity (an opaque caller tag)
    #[arg(long, default_value = "local")]
    pub identity: String,

    /// Show a stored session by name and exit
    #[arg(long, value_name = "NAME")]
    pub session: Option<String>,

    /// List stored sessions and exit
    #[arg(long)]
    pub list_sessions: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

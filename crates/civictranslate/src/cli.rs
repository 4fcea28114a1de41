//! Clap derive structures for the `civictranslate` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use civictranslate_core::{DataMode, Priority, RequestStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// civictranslate -- track translation requests from the command line
#[derive(Debug, Parser)]
#[command(
    name = "civictranslate",
    version,
    about = "Track and manage translation requests",
    long_about = "A command-line dashboard for CivicTranslate translation requests.\n\n\
        Runs against a built-in demo dataset (mock mode) or a REST API\n\
        (live mode). Sign in per command with --as admin|client.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Data source: mock (demo dataset) or live (REST API)
    #[arg(long, global = true)]
    pub mode: Option<DataMode>,

    /// API base URL for live mode (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Role to sign in as: admin or client
    #[arg(long = "as", value_name = "ROLE", env = "CIVICTRANSLATE_ROLE", global = true)]
    pub role: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CIVICTRANSLATE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Skip the simulated latency of mock mode
    #[arg(long, global = true)]
    pub no_latency: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, create, update, and delete translation requests
    #[command(alias = "req", alias = "r")]
    Requests(RequestsArgs),

    /// Show request counts by status
    Stats,

    /// Show the signed-in profile
    Whoami,

    /// Manage the bearer token used in live mode
    Token(TokenArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Requests ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List requests, newest first
    #[command(alias = "ls")]
    List {
        /// Only requests in this status (pending, in-progress, completed)
        #[arg(long, short = 's')]
        status: Option<RequestStatus>,

        /// Only requests with this priority (low, medium, high)
        #[arg(long, short = 'p')]
        priority: Option<Priority>,

        /// Case-insensitive text search over id, title, and description
        #[arg(long, short = 'f')]
        search: Option<String>,
    },

    /// Show one request
    Get {
        /// Request id, e.g. TRQ-004
        id: String,
    },

    /// Submit a new translation request
    Create {
        /// Short title
        #[arg(long)]
        title: String,

        /// Source language
        #[arg(long = "from", value_name = "LANGUAGE")]
        source_language: String,

        /// Target language
        #[arg(long = "to", value_name = "LANGUAGE")]
        target_language: String,

        /// Priority (low, medium, high)
        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// Longer description of the material
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Change the status of a request
    SetStatus {
        /// Request id
        id: String,

        /// New status (pending, in-progress, completed)
        status: RequestStatus,
    },

    /// Delete a request (admin only)
    #[command(alias = "rm")]
    Delete {
        /// Request id
        id: String,
    },
}

// ── Token ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Store a bearer token (prompts when VALUE is omitted)
    Set {
        /// Token value
        value: Option<String>,
    },

    /// Forget the stored token
    Clear,

    /// Report whether a token is stored
    Status,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

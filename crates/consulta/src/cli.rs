//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::filter::{SortKey, WhereClause};

/// Search, filter, sort and page the booking client's list screens.
#[derive(Debug, Parser)]
#[command(name = "consulta", version)]
#[command(about = "Search, filter, sort and page therapists, favorites, appointments, notifications and payments")]
pub struct Cli {
    /// Config file (YAML). Defaults to ./consulta.yaml when present.
    #[arg(long, global = true, env = "CONSULTA_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read collections from this directory (or file) instead of the configured source.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Artificial latency for the in-memory source, in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub collection: Collection,
}

#[derive(Debug, Subcommand)]
pub enum Collection {
    /// Therapist directory
    Therapists(ListArgs),
    /// Saved therapists
    Favorites(ListArgs),
    /// Booked sessions
    Appointments(ListArgs),
    /// Inbox notifications
    Notifications(ListArgs),
    /// Payment history
    Payments(ListArgs),
}

impl Collection {
    pub fn args(&self) -> &ListArgs {
        match self {
            Collection::Therapists(args)
            | Collection::Favorites(args)
            | Collection::Appointments(args)
            | Collection::Notifications(args)
            | Collection::Payments(args) => args,
        }
    }
}

/// Query flags shared by every collection.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Free-text search term (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Fields to search, replacing the collection's defaults.
    #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
    pub search_in: Vec<String>,

    /// Filter: field=value, field>=n, field<=n, field~=a,b or field@from..to. Repeatable.
    #[arg(short = 'w', long = "where", value_name = "EXPR")]
    pub filters: Vec<WhereClause>,

    /// Sort key: field[:asc|desc].
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Option<SortKey>,

    /// Page number, starting at 1.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page; 0 shows everything. Defaults to the configured page size.
    #[arg(long, value_name = "N")]
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable listing
    #[default]
    Text,
    Json,
    Yaml,
    Csv,
}

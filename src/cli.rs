use crate::links::file::DEFAULT_STORE_FILE;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reelpass",
    version,
    about = "Composite trust scoring for verified professional profiles"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding reelpass.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one evidence bundle
    Score(ScoreCommand),
    /// Print the tier for a composite total
    Tier(TierCommand),
    /// Score every evidence bundle under a directory
    Batch(BatchCommand),
    /// Manage public profile links
    #[command(subcommand)]
    Link(LinkCommand),
    /// Portfolio statistics for a professional
    Stats(StatsCommand),
    /// Recruiter scorecards
    Recruiters(RecruitersCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub bundle: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TierCommand {
    pub score: u32,
}

#[derive(Args)]
pub struct BatchCommand {
    pub dir: PathBuf,
}

#[derive(Args)]
pub struct StoreArgs {
    /// Link store file
    #[arg(long, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum LinkCommand {
    /// Create a link; fails if the professional already has an active one
    Create(LinkIssueCommand),
    /// Revoke any active link and create a new one
    Replace(LinkIssueCommand),
    Revoke(LinkSlugCommand),
    /// Record a view on a link
    View(LinkSlugCommand),
    /// List every link for a professional
    Show(LinkShowCommand),
}

#[derive(Args)]
pub struct LinkIssueCommand {
    pub professional_id: String,
    /// 90, 180, 365 or never (defaults to [links].default_expiration)
    #[arg(long)]
    pub expires: Option<String>,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct LinkSlugCommand {
    pub slug: String,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct LinkShowCommand {
    pub professional_id: String,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct StatsCommand {
    pub portfolio: PathBuf,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct RecruitersCommand {
    pub ratings: PathBuf,
    #[arg(long, value_enum, default_value = "rating")]
    pub sort: SortBy,
    /// Case-insensitive name or email filter
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, ValueEnum)]
pub enum SortBy {
    Rating,
    Reviews,
    Recent,
}

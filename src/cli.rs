use crate::types::checklist::ChecklistKind;
use crate::types::config::PolicyName;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "covcheck",
    version,
    about = "Transcript coverage scoring for clinical visit checklists"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a complete transcript file against a checklist
    Score(ScoreCommand),
    /// Read incremental transcript updates from stdin and score live
    Stream(StreamCommand),
    /// List the built-in checklists and their items
    Checklists(ChecklistsCommand),
    /// Parse and validate a covcheck config file
    Validate(ValidateCommand),
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ChecklistArg {
    Default,
    InitialEvaluation,
    FollowUp,
}

impl From<ChecklistArg> for ChecklistKind {
    fn from(arg: ChecklistArg) -> Self {
        match arg {
            ChecklistArg::Default => ChecklistKind::Default,
            ChecklistArg::InitialEvaluation => ChecklistKind::InitialEvaluation,
            ChecklistArg::FollowUp => ChecklistKind::FollowUp,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum PolicyArg {
    Diminishing,
    Occurrence,
}

impl From<PolicyArg> for PolicyName {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Diminishing => PolicyName::Diminishing,
            PolicyArg::Occurrence => PolicyName::Occurrence,
        }
    }
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Transcript text file
    pub path: PathBuf,
    #[arg(long, value_enum)]
    pub checklist: Option<ChecklistArg>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON file of topic signals from the speech analysis service
    #[arg(long)]
    pub topics: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct StreamCommand {
    #[arg(long, value_enum)]
    pub checklist: Option<ChecklistArg>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub topics: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ChecklistsCommand {
    /// Restrict the listing to one checklist kind
    #[arg(long, value_enum)]
    pub checklist: Option<ChecklistArg>,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub path: PathBuf,
}

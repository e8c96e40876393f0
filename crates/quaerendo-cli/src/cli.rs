//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use quaerendo_domain::{ClaimId, EntityId, EvidenceId, EvidenceRelationship};

/// Quaerendo CLI - browse claims and evidence, submit your own.
#[derive(Debug, Parser)]
#[command(name = "quaerendo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Text and tables (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Create an account and store the session token
    Register(RegisterArgs),

    /// Show whether a session token is held
    Whoami,

    /// List claims
    Claims,

    /// Show a claim and its evidence
    Claim(ClaimArgs),

    /// Show a piece of evidence
    Evidence(EvidenceArgs),

    /// Resolve an application path (e.g. /evidence/42) and show it
    Open(OpenArgs),

    /// Submit a new claim
    SubmitClaim(SubmitClaimArgs),

    /// Submit evidence for an existing claim
    SubmitEvidence(SubmitEvidenceArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the login command.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Username
    pub username: String,

    /// Password
    #[arg(long, env = "QUAERENDO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Username
    pub username: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(long, env = "QUAERENDO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Section toggles applied before a detail view is drawn.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub struct ToggleArgs {
    /// Flip the Source section (expanded by default)
    #[arg(long)]
    pub toggle_source: bool,

    /// Flip the Reviews section (collapsed by default)
    #[arg(long)]
    pub toggle_reviews: bool,
}

/// Arguments for the claim command.
#[derive(Debug, Parser)]
pub struct ClaimArgs {
    /// Claim ID
    pub id: ClaimId,

    #[command(flatten)]
    pub toggles: ToggleArgs,
}

/// Arguments for the evidence command.
#[derive(Debug, Parser)]
pub struct EvidenceArgs {
    /// Evidence ID
    pub id: EvidenceId,

    #[command(flatten)]
    pub toggles: ToggleArgs,
}

/// Arguments for the open command.
#[derive(Debug, Parser)]
pub struct OpenArgs {
    /// Application path, e.g. /claim/12
    pub path: String,

    #[command(flatten)]
    pub toggles: ToggleArgs,
}

/// Source fields shared by both submission commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SourceArgs {
    /// Title of the source
    #[arg(long, default_value = "")]
    pub source_title: String,

    /// Link to the source
    #[arg(long, default_value = "")]
    pub source_url: String,

    /// Description of the source
    #[arg(long, default_value = "")]
    pub source_description: String,

    /// Author entity IDs (repeatable)
    #[arg(long = "author")]
    pub authors: Vec<EntityId>,
}

/// Arguments for the submit-claim command.
#[derive(Debug, Parser)]
pub struct SubmitClaimArgs {
    /// The claim text
    pub text: String,

    /// Context for reviewers
    #[arg(short, long, default_value = "")]
    pub description: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the submit-evidence command.
#[derive(Debug, Parser)]
pub struct SubmitEvidenceArgs {
    /// Claim the evidence is for
    pub claim_id: ClaimId,

    /// How the evidence bears on the claim, in your review
    #[arg(short, long, value_enum)]
    pub relationship: RelationshipArg,

    /// Description of the evidence
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Additional review comments
    #[arg(long, default_value = "")]
    pub comments: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API base URL
        #[arg(short, long)]
        url: String,
        /// Token storage file
        #[arg(short, long)]
        storage: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Relationship argument for reviews.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RelationshipArg {
    /// Establishes the claim
    Proves,
    /// Makes the claim more likely
    Supports,
    /// No bearing on the claim
    Unrelated,
    /// Bears on the claim without settling it
    Inconclusive,
    /// Makes the claim less likely
    Disputes,
    /// Refutes the claim
    Disproves,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<RelationshipArg> for EvidenceRelationship {
    fn from(relationship: RelationshipArg) -> Self {
        match relationship {
            RelationshipArg::Proves => EvidenceRelationship::Proves,
            RelationshipArg::Supports => EvidenceRelationship::Supports,
            RelationshipArg::Unrelated => EvidenceRelationship::Unrelated,
            RelationshipArg::Inconclusive => EvidenceRelationship::Inconclusive,
            RelationshipArg::Disputes => EvidenceRelationship::Disputes,
            RelationshipArg::Disproves => EvidenceRelationship::Disproves,
        }
    }
}

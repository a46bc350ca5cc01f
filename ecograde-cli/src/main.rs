use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "ecograde", about = "Eco-design self-assessment from the terminal")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Store assessments on a remote API instead of local files
    #[arg(long, global = true)]
    remote_url: Option<String>,

    /// Bearer token for the remote API
    #[arg(long, global = true, requires = "remote_url")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse criteria referentials
    Referentials(commands::referentials::ReferentialsArgs),
    /// Manage assessments
    Assessments(commands::assessments::AssessmentsArgs),
    /// Record an answer for a criterion
    Answer(commands::answer::AnswerArgs),
    /// Move through the questionnaire
    Nav(commands::nav::NavArgs),
    /// Show the score breakdown
    Score(commands::score::ScoreArgs),
    /// List improvement actions for non-compliant criteria
    Improvements(commands::improvements::ImprovementsArgs),
    /// Mark an assessment finished
    Complete(commands::complete::CompleteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let ctx = context::AppContext::build(cli.data_dir, cli.remote_url, cli.token).await?;

    match cli.command {
        Commands::Referentials(args) => commands::referentials::run(&ctx, args).await,
        Commands::Assessments(args) => commands::assessments::run(&ctx, args).await,
        Commands::Answer(args) => commands::answer::run(&ctx, args).await,
        Commands::Nav(args) => commands::nav::run(&ctx, args).await,
        Commands::Score(args) => commands::score::run(&ctx, args).await,
        Commands::Improvements(args) => commands::improvements::run(&ctx, args).await,
        Commands::Complete(args) => commands::complete::run(&ctx, args).await,
    }
}

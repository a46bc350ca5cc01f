//! Questionnaire navigation commands

use anyhow::Result;
use clap::{Args, Subcommand};

use ecograde_core::Step;

use crate::commands::assessments::print_position;
use crate::context::AppContext;

/// Navigation arguments
#[derive(Args, Debug)]
pub struct NavArgs {
    #[command(subcommand)]
    pub command: NavCommands,
}

/// Navigation subcommands
#[derive(Subcommand, Debug)]
pub enum NavCommands {
    /// Advance to the next criterion
    Next {
        /// Assessment ID
        assessment_id: String,
    },
    /// Step back to the previous criterion
    Previous {
        /// Assessment ID
        assessment_id: String,
    },
    /// Jump to a specific criterion
    Goto {
        /// Assessment ID
        assessment_id: String,
        /// Criterion ID to jump to
        criterion_id: String,
    },
    /// Show the criterion under the cursor
    Current {
        /// Assessment ID
        assessment_id: String,
    },
}

/// Run navigation command
pub async fn run(ctx: &AppContext, args: NavArgs) -> Result<()> {
    match args.command {
        NavCommands::Next { assessment_id } => next(ctx, &assessment_id).await,
        NavCommands::Previous { assessment_id } => previous(ctx, &assessment_id).await,
        NavCommands::Goto {
            assessment_id,
            criterion_id,
        } => goto(ctx, &assessment_id, &criterion_id).await,
        NavCommands::Current { assessment_id } => current(ctx, &assessment_id).await,
    }
}

async fn next(ctx: &AppContext, assessment_id: &str) -> Result<()> {
    let mut session = ctx.open_session(assessment_id).await?;
    match session.next().await {
        Step::Moved(_) => print_position(&session),
        Step::Completed => {
            println!("Questionnaire finished; assessment marked completed.");
            println!(
                "Compliance: {:.1}%",
                session.score().level_score.compliance_rate
            );
        }
        Step::AtStart => print_position(&session),
    }
    Ok(())
}

async fn previous(ctx: &AppContext, assessment_id: &str) -> Result<()> {
    let mut session = ctx.open_session(assessment_id).await?;
    match session.previous().await {
        Step::Moved(_) => print_position(&session),
        Step::AtStart => {
            println!("Already at the first criterion.");
            print_position(&session);
        }
        Step::Completed => {}
    }
    Ok(())
}

async fn goto(ctx: &AppContext, assessment_id: &str, criterion_id: &str) -> Result<()> {
    let mut session = ctx.open_session(assessment_id).await?;
    if session.select_criterion(criterion_id).await.is_none() {
        anyhow::bail!(
            "criterion {} is not in scope at {} depth",
            criterion_id,
            session.assessment().level.as_str()
        );
    }
    print_position(&session);
    Ok(())
}

async fn current(ctx: &AppContext, assessment_id: &str) -> Result<()> {
    let session = ctx.open_session(assessment_id).await?;
    if let Some(position) = session.position() {
        let theme = session.referential().theme_name(&position.theme);
        println!(
            "Theme {} ({} of {}), criterion {} of {}",
            theme,
            session.questionnaire().theme_index(&position.theme).map(|i| i + 1).unwrap_or(0),
            session.questionnaire().theme_count(),
            position.index + 1,
            session
                .questionnaire()
                .criteria(&position.theme)
                .map(|c| c.len())
                .unwrap_or(0)
        );
    }
    print_position(&session);
    Ok(())
}

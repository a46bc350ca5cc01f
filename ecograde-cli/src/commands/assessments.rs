//! Assessment management commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use ecograde_core::{AssessmentSession, EvaluationLevel};

use crate::context::{AppContext, parse_level};

/// Assessments arguments
#[derive(Args, Debug)]
pub struct AssessmentsArgs {
    #[command(subcommand)]
    pub command: AssessmentsCommands,
}

/// Assessments subcommands
#[derive(Subcommand, Debug)]
pub enum AssessmentsCommands {
    /// List stored assessments
    List,
    /// Start a new assessment
    Create {
        /// Referential to assess against
        referential_id: String,
        /// Name of the assessed project
        project_name: String,
        /// Free-form project description
        #[arg(long)]
        description: Option<String>,
        /// Audit depth
        #[arg(long, default_value = "recommended", value_parser = parse_level)]
        level: EvaluationLevel,
    },
    /// Show one assessment
    Show {
        /// Assessment ID
        id: String,
    },
    /// Delete an assessment
    Delete {
        /// Assessment ID
        id: String,
    },
}

/// Run assessments command
pub async fn run(ctx: &AppContext, args: AssessmentsArgs) -> Result<()> {
    match args.command {
        AssessmentsCommands::List => list_assessments(ctx).await,
        AssessmentsCommands::Create {
            referential_id,
            project_name,
            description,
            level,
        } => create_assessment(ctx, &referential_id, &project_name, description, level).await,
        AssessmentsCommands::Show { id } => show_assessment(ctx, &id).await,
        AssessmentsCommands::Delete { id } => delete_assessment(ctx, &id).await,
    }
}

async fn list_assessments(ctx: &AppContext) -> Result<()> {
    let assessments = ctx.manager.list_assessments().await?;
    if assessments.is_empty() {
        println!("No assessments yet. Start one with `ecograde assessments create`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Project").fg(Color::Cyan),
        Cell::new("Referential").fg(Color::Cyan),
        Cell::new("Level").fg(Color::Cyan),
        Cell::new("Answered").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);
    for assessment in assessments {
        let status = if assessment.completed { "completed" } else { "in progress" };
        table.add_row(vec![
            Cell::new(&assessment.id),
            Cell::new(&assessment.project_name),
            Cell::new(&assessment.referential_id),
            Cell::new(assessment.level.as_str()),
            Cell::new(format!(
                "{}/{}",
                assessment.answered_count(),
                assessment.responses.len()
            )),
            Cell::new(status),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn create_assessment(
    ctx: &AppContext,
    referential_id: &str,
    project_name: &str,
    description: Option<String>,
    level: EvaluationLevel,
) -> Result<()> {
    let session = ctx
        .manager
        .create_assessment(referential_id, project_name, description, level)
        .await?;

    println!("Created assessment {}", session.assessment().id);
    println!(
        "{} criteria to audit at {} depth",
        session.questionnaire().len(),
        level.as_str()
    );
    print_position(&session);
    Ok(())
}

async fn show_assessment(ctx: &AppContext, id: &str) -> Result<()> {
    let session = ctx.open_session(id).await?;
    let assessment = session.assessment();

    println!("Assessment {}", assessment.id);
    println!("  Project:     {}", assessment.project_name);
    if let Some(description) = &assessment.project_description {
        println!("  Description: {}", description);
    }
    println!("  Referential: {}", assessment.referential_id);
    println!("  Level:       {}", assessment.level.as_str());
    println!("  Created:     {}", assessment.created_at.to_rfc3339());
    println!("  Updated:     {}", assessment.updated_at.to_rfc3339());
    println!(
        "  Progress:    {}/{} answered{}",
        assessment.answered_count(),
        assessment.responses.len(),
        if assessment.completed { ", completed" } else { "" }
    );
    print_position(&session);
    Ok(())
}

async fn delete_assessment(ctx: &AppContext, id: &str) -> Result<()> {
    if ctx.manager.delete_assessment(id).await? {
        println!("Deleted assessment {}", id);
    } else {
        println!("No assessment with id {}", id);
    }
    Ok(())
}

/// Print the criterion under the cursor
pub fn print_position(session: &AssessmentSession) {
    let Some(criterion) = session.current_criterion() else {
        println!("  Nothing to audit at this depth.");
        return;
    };
    let theme = session.referential().theme_name(&criterion.theme);

    println!();
    println!("[{}] {} - {}", criterion.number, theme, criterion.title);
    if !criterion.description.is_empty() {
        println!("  {}", criterion.description);
    }
    let status = session
        .assessment()
        .response(&criterion.id)
        .map(|r| r.status.as_str())
        .unwrap_or("pending");
    println!("  Level: {}, current answer: {}", criterion.level.as_str(), status);
}

//! Referential browsing commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use ecograde_core::{EvaluationLevel, ThemedCriteria};

use crate::context::{AppContext, parse_level};

/// Referentials arguments
#[derive(Args, Debug)]
pub struct ReferentialsArgs {
    #[command(subcommand)]
    pub command: ReferentialsCommands,
}

/// Referentials subcommands
#[derive(Subcommand, Debug)]
pub enum ReferentialsCommands {
    /// List installed referentials
    List,
    /// Show the criteria of a referential
    Show {
        /// Referential ID
        id: String,
        /// Only show criteria in scope at this audit depth
        #[arg(long, value_parser = parse_level)]
        level: Option<EvaluationLevel>,
    },
}

/// Run referentials command
pub async fn run(ctx: &AppContext, args: ReferentialsArgs) -> Result<()> {
    match args.command {
        ReferentialsCommands::List => list_referentials(ctx).await,
        ReferentialsCommands::Show { id, level } => show_referential(ctx, &id, level).await,
    }
}

async fn list_referentials(ctx: &AppContext) -> Result<()> {
    let summaries = ctx.manager.list_referentials().await?;
    if summaries.is_empty() {
        println!(
            "No referentials installed. Put <id>.json files in {}",
            ctx.data_dir.join("referentials").display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Version").fg(Color::Cyan),
    ]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.id),
            Cell::new(&summary.name),
            Cell::new(&summary.version),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn show_referential(
    ctx: &AppContext,
    id: &str,
    level: Option<EvaluationLevel>,
) -> Result<()> {
    let referential = ctx.manager.get_referential(id).await?;
    println!("{} v{} ({} criteria)", referential.name, referential.version, referential.criteria.len());
    println!();

    let view = ThemedCriteria::build(&referential, level.unwrap_or(EvaluationLevel::Advanced));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Number").fg(Color::Cyan),
        Cell::new("Theme").fg(Color::Cyan),
        Cell::new("Level").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
    ]);
    for criterion in view.iter() {
        table.add_row(vec![
            Cell::new(&criterion.number),
            Cell::new(referential.theme_name(&criterion.theme)),
            Cell::new(criterion.level.as_str()),
            Cell::new(&criterion.title),
        ]);
    }
    println!("{table}");

    if let Some(level) = level {
        println!();
        println!("{} criteria in scope at {} depth", view.len(), level.as_str());
    }
    Ok(())
}

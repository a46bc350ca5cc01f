//! Improvement listing command

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crate::context::AppContext;

/// Improvements arguments
#[derive(Args, Debug)]
pub struct ImprovementsArgs {
    /// Assessment ID
    pub assessment_id: String,
}

/// Run improvements command
pub async fn run(ctx: &AppContext, args: ImprovementsArgs) -> Result<()> {
    let session = ctx.open_session(&args.assessment_id).await?;
    let improvements = session.improvements();

    if improvements.is_empty() {
        println!("No non-compliant criteria, nothing to improve.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Criterion").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Suggestion").fg(Color::Cyan),
    ]);
    for improvement in &improvements {
        table.add_row(vec![
            Cell::new(improvement.priority.as_str()),
            Cell::new(&improvement.criterion_number),
            Cell::new(&improvement.title),
            Cell::new(&improvement.suggestion),
        ]);
    }
    println!("{table}");
    println!();
    println!("{} improvement action(s), highest priority first", improvements.len());
    Ok(())
}

//! Score reporting command

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use ecograde_core::{EvaluationLevel, Tally};

use crate::context::AppContext;

/// Score arguments
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Assessment ID
    pub assessment_id: String,
    /// Print the raw score as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run score command
pub async fn run(ctx: &AppContext, args: ScoreArgs) -> Result<()> {
    let session = ctx.open_session(&args.assessment_id).await?;
    let score = session.score();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
        return Ok(());
    }

    println!(
        "{} against {} ({} depth)",
        session.assessment().project_name,
        session.referential().name,
        session.assessment().level.as_str()
    );
    println!();
    println!(
        "Audited scope: {}/{} compliant ({:.1}%)",
        score.level_score.compliant, score.level_score.total, score.level_score.compliance_rate
    );
    println!(
        "All criteria:  {}/{} compliant ({:.1}%), {} non-compliant, {} pending, {} not applicable",
        score.compliant,
        score.total_criteria - score.not_applicable,
        score.compliance_rate,
        score.non_compliant,
        score.pending,
        score.not_applicable
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Breakdown").fg(Color::Cyan),
        Cell::new("Compliant").fg(Color::Cyan),
        Cell::new("Rate").fg(Color::Cyan),
    ]);
    for level in EvaluationLevel::all() {
        let tally = score.score_by_level.get(level);
        table.add_row(tally_row(&format!("level: {}", level.as_str()), tally));
    }
    for (theme, tally) in &score.score_by_theme {
        let name = session.referential().theme_name(theme);
        table.add_row(tally_row(&format!("theme: {}", name), *tally));
    }
    println!("{table}");
    Ok(())
}

fn tally_row(label: &str, tally: Tally) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(format!("{}/{}", tally.compliant, tally.total)),
        Cell::new(format!("{:.1}%", tally.rate())),
    ]
}

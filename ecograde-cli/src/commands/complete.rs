//! Assessment completion command

use anyhow::Result;
use clap::Args;

use crate::context::AppContext;

/// Complete arguments
#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Assessment ID
    pub assessment_id: String,
}

/// Run complete command
pub async fn run(ctx: &AppContext, args: CompleteArgs) -> Result<()> {
    let mut session = ctx.open_session(&args.assessment_id).await?;

    let already = session.assessment().completed;
    session.complete().await;

    if already {
        println!("Assessment {} was already completed.", args.assessment_id);
    } else {
        println!("Assessment {} marked completed.", args.assessment_id);
    }
    let score = session.score();
    println!(
        "Compliance at {} depth: {:.1}% ({}/{})",
        session.assessment().level.as_str(),
        score.level_score.compliance_rate,
        score.level_score.compliant,
        score.level_score.total
    );
    Ok(())
}

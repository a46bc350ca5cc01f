//! Answer recording command

use anyhow::Result;
use clap::Args;

use ecograde_core::ResponseStatus;

use crate::context::{AppContext, parse_status};

/// Answer arguments
#[derive(Args, Debug)]
pub struct AnswerArgs {
    /// Assessment ID
    pub assessment_id: String,
    /// Criterion to answer; defaults to the one under the cursor
    #[arg(long)]
    pub criterion: Option<String>,
    /// compliant, non-compliant, not-applicable or pending
    #[arg(value_parser = parse_status)]
    pub status: ResponseStatus,
    /// Free-form note attached to the answer
    #[arg(long)]
    pub comment: Option<String>,
}

/// Run answer command
pub async fn run(ctx: &AppContext, args: AnswerArgs) -> Result<()> {
    let mut session = ctx.open_session(&args.assessment_id).await?;

    let criterion_id = match args.criterion {
        Some(id) => id,
        None => session
            .current_criterion()
            .map(|c| c.id.clone())
            .ok_or_else(|| anyhow::anyhow!("no current criterion; pass --criterion"))?,
    };

    if !session
        .update_response(&criterion_id, args.status, args.comment)
        .await
    {
        anyhow::bail!("criterion {} is not part of this referential", criterion_id);
    }

    let score = session.score();
    let (answered, total) = session.progress();
    println!(
        "Recorded {} for {} ({}/{} answered, compliance {:.1}%)",
        args.status.as_str(),
        criterion_id,
        answered,
        total,
        score.compliance_rate
    );
    Ok(())
}

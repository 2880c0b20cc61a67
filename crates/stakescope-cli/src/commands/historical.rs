// crates/stakescope-cli/src/commands/historical.rs
//
// `stakescope historical`: yield reconstructed for an earlier period.

use chrono::{DateTime, Utc};
use clap::Args;

use stakescope_analysis::{reconstruct_historical_yield, HistoricalEstimate};
use stakescope_core::{AnalysisError, Slot};

use super::cadence;
use super::AppContext;
use crate::output::{percent, print_section, seconds, FieldRow};

/// Historical yield reconstruction command.
#[derive(Debug, Args)]
pub struct HistoricalCmd {
    /// Consecutive-block gaps averaged (default: historical.window).
    #[arg(long)]
    pub num_blocks: Option<usize>,

    /// Slot the historical walk starts from (default: historical.start_slot).
    #[arg(long)]
    pub start_slot: Option<Slot>,
}

/// Reconstruct the historical yield for a known average slot time, with a
/// client scoped to this call.
pub async fn collect(
    ctx: &AppContext,
    avg_slot_time: f64,
    now: DateTime<Utc>,
) -> Result<HistoricalEstimate, AnalysisError> {
    let client = ctx.connect()?;
    let params = ctx.config.historical_params();
    reconstruct_historical_yield(&client, &params, avg_slot_time, now).await
}

pub fn rows(estimate: &HistoricalEstimate) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Current inflation", percent(estimate.current_inflation)),
        FieldRow::new("Taper", percent(estimate.taper)),
        FieldRow::new("Days elapsed", format!("{:.1}", estimate.days_elapsed)),
        FieldRow::new("Historical inflation", percent(estimate.historical_inflation)),
        FieldRow::new("Assumed staked ratio", percent(estimate.inputs.staked_ratio)),
        FieldRow::new("Average slot time", seconds(estimate.inputs.avg_slot_time)),
        FieldRow::new("Nominal yield", percent(estimate.result.nominal_yield)),
        FieldRow::new("Real yield", percent(estimate.result.real_yield)),
    ]
}

/// Run the historical command: sample the historical cadence, then
/// reconstruct.
pub async fn run(ctx: &AppContext, cmd: &HistoricalCmd) -> Result<(), Box<dyn std::error::Error>> {
    let historical = &ctx.config.historical;
    let num_blocks = cmd.num_blocks.unwrap_or(historical.window);
    let start_slot = cmd.start_slot.unwrap_or(historical.start_slot);

    let cadence = cadence::collect(ctx, num_blocks, Some(start_slot)).await?;
    let estimate = collect(ctx, cadence.average_slot_time, Utc::now()).await?;
    print_section(ctx.format, "Historical Staking Yield", &estimate, &rows(&estimate));
    Ok(())
}

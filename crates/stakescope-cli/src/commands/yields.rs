// crates/stakescope-cli/src/commands/yields.rs
//
// `stakescope yield`: staking yield from current network data.

use clap::Args;

use stakescope_analysis::{estimate_live_yield, LiveYieldEstimate};
use stakescope_core::AnalysisError;

use super::cadence;
use super::AppContext;
use crate::output::{percent, print_section, seconds, FieldRow};

/// Live yield estimate command.
#[derive(Debug, Args)]
pub struct YieldCmd {
    /// Consecutive-block gaps averaged for the cadence input (default: sampling.recent_window).
    #[arg(long)]
    pub num_blocks: Option<usize>,
}

/// Estimate the live yield for a known average slot time, with a client
/// scoped to this call.
pub async fn collect(
    ctx: &AppContext,
    avg_slot_time: f64,
) -> Result<LiveYieldEstimate, AnalysisError> {
    let client = ctx.connect()?;
    estimate_live_yield(&client, avg_slot_time, ctx.config.sampling.target_slot_time).await
}

pub fn rows(estimate: &LiveYieldEstimate) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Epoch", estimate.inflation.epoch),
        FieldRow::new("Inflation rate", percent(estimate.inputs.inflation_rate)),
        FieldRow::new(
            "Active stake",
            format!("{:.0} SOL", estimate.stake.total_active_stake_sol()),
        ),
        FieldRow::new(
            "Circulating supply",
            format!("{:.0} SOL", estimate.stake.circulating_supply_sol()),
        ),
        FieldRow::new("Staked ratio", percent(estimate.inputs.staked_ratio)),
        FieldRow::new("Average slot time", seconds(estimate.inputs.avg_slot_time)),
        FieldRow::new("Nominal yield", percent(estimate.result.nominal_yield)),
        FieldRow::new("Real yield", percent(estimate.result.real_yield)),
    ]
}

/// Run the yield command: sample the recent cadence, then estimate.
pub async fn run(ctx: &AppContext, cmd: &YieldCmd) -> Result<(), Box<dyn std::error::Error>> {
    let num_blocks = cmd.num_blocks.unwrap_or(ctx.config.sampling.recent_window);
    let cadence = cadence::collect(ctx, num_blocks, None).await?;
    let estimate = collect(ctx, cadence.average_slot_time).await?;
    print_section(ctx.format, "Live Staking Yield", &estimate, &rows(&estimate));
    Ok(())
}

// crates/stakescope-cli/src/commands/cadence.rs
//
// `stakescope cadence`: average time between consecutive blocks.

use clap::Args;

use stakescope_analysis::{CadenceReport, CadenceSampler};
use stakescope_core::{AnalysisError, Slot};

use super::AppContext;
use crate::output::{print_section, seconds, FieldRow};

/// Block cadence sampling command.
#[derive(Debug, Args)]
pub struct CadenceCmd {
    /// Number of consecutive-block gaps to average (default: sampling.recent_window).
    #[arg(long)]
    pub num_blocks: Option<usize>,

    /// Slot to walk backward from (default: the node's latest slot).
    #[arg(long)]
    pub start_slot: Option<Slot>,
}

/// Sample one window with a client scoped to this call.
pub async fn collect(
    ctx: &AppContext,
    num_blocks: usize,
    start_slot: Option<Slot>,
) -> Result<CadenceReport, AnalysisError> {
    let client = ctx.connect()?;
    CadenceSampler::new(&client)
        .with_config(ctx.config.sampler_config())
        .sample(num_blocks, start_slot)
        .await
}

pub fn rows(report: &CadenceReport) -> Vec<FieldRow> {
    let min = report.deltas.iter().min().copied().unwrap_or_default();
    let max = report.deltas.iter().max().copied().unwrap_or_default();
    vec![
        FieldRow::new("Start slot", report.start_slot),
        FieldRow::new("Blocks averaged", report.num_blocks),
        FieldRow::new("Average slot time", seconds(report.average_slot_time)),
        FieldRow::new("Delta range", format!("{}s .. {}s", min, max)),
        FieldRow::new("Missing blocks skipped", report.failed_attempts),
        FieldRow::new("Slots scanned", report.slots_scanned),
    ]
}

/// Run the cadence command.
pub async fn run(ctx: &AppContext, cmd: &CadenceCmd) -> Result<(), Box<dyn std::error::Error>> {
    let num_blocks = cmd.num_blocks.unwrap_or(ctx.config.sampling.recent_window);
    let report = collect(ctx, num_blocks, cmd.start_slot).await?;
    print_section(ctx.format, "Block Cadence", &report, &rows(&report));
    Ok(())
}

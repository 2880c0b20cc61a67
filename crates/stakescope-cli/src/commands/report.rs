// crates/stakescope-cli/src/commands/report.rs
//
// `stakescope report`: every routine in sequence.
//
// Each routine gets its own client and its own failure boundary: a failed
// routine is logged and listed under failures, and the rest still run.
// Yield estimates that depend on a failed cadence window are skipped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use stakescope_analysis::{CadenceReport, HistoricalEstimate, LiveYieldEstimate};
use stakescope_core::{AnalysisError, ValidatorCensus};

use super::{cadence, census, historical, yields, AppContext};
use crate::output::{format_json, format_table, print_section, OutputFormat};

const CENSUS: &str = "Validator census";
const RECENT_CADENCE: &str = "Recent block cadence";
const HISTORICAL_CADENCE: &str = "Historical block cadence";
const LIVE_YIELD: &str = "Live staking yield";
const HISTORICAL_YIELD: &str = "Historical staking yield";

/// A routine that did not produce a result.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RoutineFailure {
    #[tabled(rename = "Routine")]
    pub routine: &'static str,
    #[tabled(rename = "Error")]
    pub error: String,
    #[tabled(skip)]
    pub insufficient_data: bool,
}

/// Everything one report run produced.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub census: Option<ValidatorCensus>,
    pub recent_cadence: Option<CadenceReport>,
    pub historical_cadence: Option<CadenceReport>,
    pub live_yield: Option<LiveYieldEstimate>,
    pub historical_yield: Option<HistoricalEstimate>,
    pub failures: Vec<RoutineFailure>,
}

impl Report {
    /// Keep a routine's value, or log and record its failure.
    fn record<T>(&mut self, routine: &'static str, result: Result<T, AnalysisError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(routine, error = %e, "Routine failed");
                self.failures.push(RoutineFailure {
                    routine,
                    insufficient_data: e.is_insufficient_data(),
                    error: e.to_string(),
                });
                None
            }
        }
    }

    fn skip(&mut self, routine: &'static str, reason: &str) {
        tracing::info!(routine, reason, "Routine skipped");
        self.failures.push(RoutineFailure {
            routine,
            error: format!("skipped: {}", reason),
            insufficient_data: false,
        });
    }
}

/// Run every routine against the configured node.
pub async fn collect(ctx: &AppContext, now: DateTime<Utc>) -> Report {
    let mut report = Report::default();
    let historical = &ctx.config.historical;

    report.census = report.record(CENSUS, census::collect(ctx).await);

    let recent = cadence::collect(ctx, ctx.config.sampling.recent_window, None).await;
    report.recent_cadence = report.record(RECENT_CADENCE, recent);

    let past = cadence::collect(ctx, historical.window, Some(historical.start_slot)).await;
    report.historical_cadence = report.record(HISTORICAL_CADENCE, past);

    let recent_avg = report.recent_cadence.as_ref().map(|c| c.average_slot_time);
    report.live_yield = match recent_avg {
        Some(avg) => {
            let result = yields::collect(ctx, avg).await;
            report.record(LIVE_YIELD, result)
        }
        None => {
            report.skip(LIVE_YIELD, "recent block cadence unavailable");
            None
        }
    };

    let historical_avg = report.historical_cadence.as_ref().map(|c| c.average_slot_time);
    report.historical_yield = match historical_avg {
        Some(avg) => {
            let result = historical::collect(ctx, avg, now).await;
            report.record(HISTORICAL_YIELD, result)
        }
        None => {
            report.skip(HISTORICAL_YIELD, "historical block cadence unavailable");
            None
        }
    };

    report
}

/// Print a report in the requested format.
pub fn render(format: OutputFormat, report: &Report) {
    if format == OutputFormat::Json {
        println!("{}", format_json(report));
        return;
    }

    if let Some(value) = &report.census {
        print_section(format, CENSUS, value, &census::rows(value));
    }
    if let Some(value) = &report.recent_cadence {
        print_section(format, RECENT_CADENCE, value, &cadence::rows(value));
    }
    if let Some(value) = &report.historical_cadence {
        print_section(format, HISTORICAL_CADENCE, value, &cadence::rows(value));
    }
    if let Some(value) = &report.live_yield {
        print_section(format, LIVE_YIELD, value, &yields::rows(value));
    }
    if let Some(value) = &report.historical_yield {
        print_section(format, HISTORICAL_YIELD, value, &historical::rows(value));
    }
    if !report.failures.is_empty() {
        println!("Failures");
        println!("{}", format_table(&report.failures));
    }
}

/// Run the report command. Partial results are not an error.
pub async fn run(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let report = collect(ctx, Utc::now()).await;
    render(ctx.format, &report);
    Ok(())
}

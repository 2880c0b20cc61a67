// crates/stakescope-analysis/src/yields.rs
//
// Live and historical yield estimates assembled from node queries.
//
// Both paths end in `stakescope_economics::estimate_yield`. The live path
// measures the staked ratio from the node; the historical path reconstructs
// an earlier inflation rate from the taper and uses a configured staked
// ratio, since the node cannot report past stake.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use stakescope_core::{AnalysisError, InflationRate, QueryClient};
use stakescope_economics::{
    days_between, estimate_yield, historical_inflation, StakeSnapshot, YieldInputs, YieldResult,
    TARGET_SLOT_TIME_SECS,
};

/// Assumed staked ratio for the historical window.
pub const DEFAULT_HISTORICAL_STAKED_RATIO: f64 = 0.60;

/// Slot used as the historical reference window (early 2022).
pub const DEFAULT_HISTORICAL_START_SLOT: u64 = 120_000_000;

/// Measure active stake against circulating supply.
///
/// # Errors
/// Returns `AnalysisError::InvalidInput` if the node reports a circulating
/// supply of zero.
pub async fn measure_stake<C>(client: &C) -> Result<StakeSnapshot, AnalysisError>
where
    C: QueryClient + ?Sized,
{
    let sets = client.get_validator_sets().await?;
    let supply = client.get_supply().await?;

    let snapshot = StakeSnapshot::new(sets.total_activated_stake(), supply.circulating)
        .ok_or_else(|| {
            AnalysisError::InvalidInput("node reported zero circulating supply".to_string())
        })?;

    tracing::info!(
        total_active_stake = snapshot.total_active_stake,
        circulating_supply = snapshot.circulating_supply,
        staked_ratio = snapshot.staked_ratio,
        "Measured staked ratio"
    );

    Ok(snapshot)
}

/// Reject an average slot time the yield formula cannot divide by.
///
/// Block times have one-second resolution, so a short window of sub-second
/// slots can average exactly zero.
fn check_avg_slot_time(avg_slot_time: f64) -> Result<(), AnalysisError> {
    if avg_slot_time.is_finite() && avg_slot_time > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput(format!(
            "average slot time must be positive, got {}",
            avg_slot_time
        )))
    }
}

/// A yield estimate from current network data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveYieldEstimate {
    pub inflation: InflationRate,
    pub stake: StakeSnapshot,
    pub inputs: YieldInputs,
    pub result: YieldResult,
}

/// Estimate the current staking yield from the node's inflation rate, the
/// measured staked ratio, and an observed average slot time.
///
/// # Errors
/// Returns `AnalysisError::InvalidInput` if `avg_slot_time` is not positive
/// or the node reports zero circulating supply.
pub async fn estimate_live_yield<C>(
    client: &C,
    avg_slot_time: f64,
    target_slot_time: f64,
) -> Result<LiveYieldEstimate, AnalysisError>
where
    C: QueryClient + ?Sized,
{
    check_avg_slot_time(avg_slot_time)?;
    let inflation = client.get_inflation_rate().await?;
    let stake = measure_stake(client).await?;

    let inputs = YieldInputs::new(inflation.total, stake.staked_ratio, avg_slot_time)
        .with_target_slot_time(target_slot_time);
    let result = estimate_yield(&inputs);

    tracing::info!(
        epoch = inflation.epoch,
        nominal_yield = result.nominal_yield,
        real_yield = result.real_yield,
        "Live yield estimated"
    );

    Ok(LiveYieldEstimate {
        inflation,
        stake,
        inputs,
        result,
    })
}

/// Modeling assumptions for the historical estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalParams {
    /// Staked ratio assumed for the historical period.
    pub staked_ratio: f64,
    /// Date the historical window represents.
    pub reference_date: NaiveDate,
    pub target_slot_time: f64,
}

impl Default for HistoricalParams {
    fn default() -> Self {
        Self {
            staked_ratio: DEFAULT_HISTORICAL_STAKED_RATIO,
            reference_date: NaiveDate::from_ymd_opt(2022, 2, 1).unwrap_or_default(),
            target_slot_time: TARGET_SLOT_TIME_SECS,
        }
    }
}

impl HistoricalParams {
    pub fn reference_datetime(&self) -> DateTime<Utc> {
        self.reference_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

/// A yield estimate for a past period, reconstructed from today's inflation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEstimate {
    pub current_inflation: f64,
    pub taper: f64,
    pub days_elapsed: f64,
    pub historical_inflation: f64,
    pub inputs: YieldInputs,
    pub result: YieldResult,
}

impl HistoricalEstimate {
    /// Pure reconstruction from already-fetched figures.
    pub fn compute(
        current_inflation: f64,
        taper: f64,
        days_elapsed: f64,
        avg_slot_time: f64,
        params: &HistoricalParams,
    ) -> Self {
        let historical = historical_inflation(current_inflation, taper, days_elapsed);
        let inputs = YieldInputs::new(historical, params.staked_ratio, avg_slot_time)
            .with_target_slot_time(params.target_slot_time);
        let result = estimate_yield(&inputs);

        Self {
            current_inflation,
            taper,
            days_elapsed,
            historical_inflation: historical,
            inputs,
            result,
        }
    }
}

/// Reconstruct the yield at `params.reference_date` using the current
/// inflation rate and taper reported by the node.
///
/// # Errors
/// Returns `AnalysisError::InvalidInput` if `avg_slot_time` is not positive.
pub async fn reconstruct_historical_yield<C>(
    client: &C,
    params: &HistoricalParams,
    avg_slot_time: f64,
    now: DateTime<Utc>,
) -> Result<HistoricalEstimate, AnalysisError>
where
    C: QueryClient + ?Sized,
{
    check_avg_slot_time(avg_slot_time)?;
    let inflation = client.get_inflation_rate().await?;
    let schedule = client.get_inflation_schedule().await?;
    let days_elapsed = days_between(params.reference_datetime(), now);

    let estimate = HistoricalEstimate::compute(
        inflation.total,
        schedule.taper,
        days_elapsed,
        avg_slot_time,
        params,
    );

    tracing::info!(
        reference_date = %params.reference_date,
        days_elapsed,
        historical_inflation = estimate.historical_inflation,
        nominal_yield = estimate.result.nominal_yield,
        "Historical yield reconstructed"
    );

    Ok(estimate)
}

// crates/stakescope-analysis/src/cadence.rs
//
// Block cadence sampler: average wall-clock time between consecutive slots.
//
// The sampler walks backward from a start slot, one timestamp lookup per
// slot. Slots without a block (skipped by their leader, or pruned from the
// node's long-term storage) are common on a live network. Averaging
// `ts(start) - ts(start - N)` over a raw slot range would fold those gaps
// into the estimate, so only strictly adjacent slot pairs contribute a
// delta. To still end up with N such pairs the walk over-collects: it keeps
// going until it holds `N + 1 + failed_attempts` timestamps.
//
// The walk is additionally bounded by a lookback limit and by slot 0, so a
// node that never returns a timestamp ends in `InsufficientData` instead of
// looping forever.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use stakescope_core::{
    AnalysisError, QueryClient, QueryError, Slot, SlotTimestampSample, UnixTimestamp,
};

/// Default cap on the number of slots a single walk may look up.
pub const DEFAULT_MAX_LOOKBACK_SLOTS: u64 = 5_000;

/// Classification of one per-slot timestamp lookup.
#[derive(Debug)]
pub enum SlotOutcome {
    /// The block exists and carries a timestamp.
    Valid(UnixTimestamp),
    /// No usable block in this slot. Counted, never surfaced.
    Gap,
    /// Any other failure. Aborts the walk.
    Fatal(QueryError),
}

impl SlotOutcome {
    pub fn classify(result: Result<Option<UnixTimestamp>, QueryError>) -> Self {
        match result {
            Ok(Some(timestamp)) => SlotOutcome::Valid(timestamp),
            Ok(None) => SlotOutcome::Gap,
            Err(e) if e.is_block_unavailable() => SlotOutcome::Gap,
            Err(e) => SlotOutcome::Fatal(e),
        }
    }
}

/// Tuning for a cadence walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Maximum lookups in flight at once. 1 walks strictly sequentially.
    pub concurrency: usize,
    /// Maximum number of slots looked up before giving up.
    pub max_lookback_slots: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            max_lookback_slots: DEFAULT_MAX_LOOKBACK_SLOTS,
        }
    }
}

/// Result of a successful cadence walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CadenceReport {
    /// Slot the walk started from (resolved from the node if not given).
    pub start_slot: Slot,
    /// Number of consecutive-block deltas averaged.
    pub num_blocks: usize,
    /// Mean of `deltas`, in seconds.
    pub average_slot_time: f64,
    /// Deltas between strictly adjacent slots, newest first.
    pub deltas: Vec<i64>,
    /// Lookups that returned no block.
    pub failed_attempts: usize,
    /// Total lookups issued.
    pub slots_scanned: u64,
}

/// Samples block timestamps through a borrowed query client.
pub struct CadenceSampler<'a, C: ?Sized> {
    client: &'a C,
    config: SamplerConfig,
}

impl<'a, C> CadenceSampler<'a, C>
where
    C: QueryClient + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            config: SamplerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    /// Average the time between `num_blocks` consecutive-slot pairs, walking
    /// backward from `start_slot` or from the node's latest slot.
    ///
    /// # Errors
    /// - `AnalysisError::InvalidInput` if `num_blocks` is zero.
    /// - `AnalysisError::InsufficientData` if the walk hit its bounds before
    ///   enough timestamps or consecutive pairs were found.
    /// - `AnalysisError::Query` for any lookup failure other than a missing
    ///   block.
    pub async fn sample(
        &self,
        num_blocks: usize,
        start_slot: Option<Slot>,
    ) -> Result<CadenceReport, AnalysisError> {
        if num_blocks == 0 {
            return Err(AnalysisError::InvalidInput(
                "num_blocks must be at least 1".to_string(),
            ));
        }

        let start_slot = match start_slot {
            Some(slot) => slot,
            None => {
                let slot = self.client.get_latest_reference_slot().await?;
                tracing::info!(slot, "Resolved start slot from node tip");
                slot
            }
        };

        let required = num_blocks + 1;
        let concurrency = self.config.concurrency.max(1);
        let client = self.client;

        let mut sample = SlotTimestampSample::new();
        let mut failed_attempts: usize = 0;
        let mut slots_scanned: u64 = 0;
        let mut cursor: Option<Slot> = Some(start_slot);

        while sample.len() < required + failed_attempts {
            let Some(top) = cursor else {
                tracing::debug!("Cadence walk reached slot 0");
                break;
            };
            let remaining = self.config.max_lookback_slots.saturating_sub(slots_scanned);
            if remaining == 0 {
                tracing::warn!(
                    start_slot,
                    slots_scanned,
                    collected = sample.len(),
                    failed_attempts,
                    "Cadence walk hit its lookback limit"
                );
                break;
            }

            // Each lookup either records a timestamp or raises the target by
            // one, so a batch no larger than the shortfall never reaches past
            // the slot where a sequential walk would stop.
            let shortfall = (required + failed_attempts - sample.len()) as u64;
            let batch = (concurrency as u64)
                .min(shortfall)
                .min(remaining)
                .min(top.saturating_add(1));

            let mut lookups = stream::iter((0..batch).map(|offset| top - offset))
                .map(move |slot| async move {
                    (slot, SlotOutcome::classify(client.get_block_timestamp(slot).await))
                })
                .buffer_unordered(concurrency);

            while let Some((slot, outcome)) = lookups.next().await {
                match outcome {
                    SlotOutcome::Valid(timestamp) => sample.record(slot, timestamp),
                    SlotOutcome::Gap => {
                        failed_attempts += 1;
                        tracing::debug!(slot, failed_attempts, "No block in slot, skipping");
                    }
                    SlotOutcome::Fatal(e) => {
                        tracing::warn!(slot, error = %e, "Aborting cadence walk");
                        return Err(e.into());
                    }
                }
            }

            slots_scanned += batch;
            cursor = top.checked_sub(batch);
        }

        let collected = sample.len();
        if collected < required {
            return Err(AnalysisError::InsufficientData {
                what: "block timestamps",
                collected,
                required,
            });
        }

        let deltas = sample.into_window().consecutive_deltas(num_blocks);
        if deltas.len() < num_blocks {
            return Err(AnalysisError::InsufficientData {
                what: "consecutive block deltas",
                collected: deltas.len(),
                required: num_blocks,
            });
        }

        let average_slot_time = deltas.iter().sum::<i64>() as f64 / deltas.len() as f64;

        tracing::info!(
            start_slot,
            num_blocks,
            failed_attempts,
            slots_scanned,
            average_slot_time,
            "Cadence sample complete"
        );

        Ok(CadenceReport {
            start_slot,
            num_blocks,
            average_slot_time,
            deltas,
            failed_attempts,
            slots_scanned,
        })
    }
}

// crates/stakescope-core/src/types.rs
//
// Transient value objects produced and consumed by the analytical routines.
// Nothing here outlives a single routine invocation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A discrete unit of network time in which one block may be produced.
pub type Slot = u64;

/// Wall-clock time in whole seconds since the Unix epoch.
pub type UnixTimestamp = i64;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// A single validator vote account as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteAccount {
    /// Base-58 vote account address.
    pub vote_pubkey: String,
    /// Base-58 identity of the validator node operating the account.
    pub node_pubkey: String,
    /// Stake delegated to this account and active in the current epoch,
    /// in the smallest denomination.
    pub activated_stake: u64,
    /// Commission percentage (0-100) charged on rewards.
    pub commission: u8,
}

/// Current and delinquent vote accounts, as returned by one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSets {
    pub current: Vec<VoteAccount>,
    pub delinquent: Vec<VoteAccount>,
}

impl ValidatorSets {
    /// Sum of activated stake over both sets.
    pub fn total_activated_stake(&self) -> u64 {
        self.current
            .iter()
            .chain(self.delinquent.iter())
            .map(|a| a.activated_stake)
            .fold(0u64, |acc, s| acc.saturating_add(s))
    }
}

/// Active vs. delinquent validator counts.
///
/// Fields are private so that `total_count` can only ever be the sum of the
/// other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatorCensus {
    active_count: usize,
    delinquent_count: usize,
    total_count: usize,
}

impl ValidatorCensus {
    pub fn new(active_count: usize, delinquent_count: usize) -> Self {
        Self {
            active_count,
            delinquent_count,
            total_count: active_count + delinquent_count,
        }
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn delinquent_count(&self) -> usize {
        self.delinquent_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }
}

impl From<&ValidatorSets> for ValidatorCensus {
    fn from(sets: &ValidatorSets) -> Self {
        ValidatorCensus::new(sets.current.len(), sets.delinquent.len())
    }
}

// ---------------------------------------------------------------------------
// Supply and inflation
// ---------------------------------------------------------------------------

/// Token supply figures, in the smallest denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub total: u64,
    pub circulating: u64,
    pub non_circulating: u64,
}

/// Annualized inflation rates for the current epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationRate {
    /// Total inflation rate.
    pub total: f64,
    /// Portion of total inflation paid to validators and stakers.
    pub validator: f64,
    /// Portion of total inflation paid to the foundation.
    pub foundation: f64,
    /// Epoch these values are valid for.
    pub epoch: u64,
}

/// The disinflation schedule the network follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationSchedule {
    /// Inflation rate at genesis.
    pub initial: f64,
    /// Floor the inflation rate converges to.
    pub terminal: f64,
    /// Fractional yearly reduction of the inflation rate.
    pub taper: f64,
    /// Fraction of inflation allocated to the foundation.
    pub foundation: f64,
    /// Years the foundation allocation lasts.
    pub foundation_term: f64,
}

// ---------------------------------------------------------------------------
// Block timestamps
// ---------------------------------------------------------------------------

/// Slot -> timestamp samples gathered by a cadence walk.
///
/// Insertion order is irrelevant; the sample is sorted once when converted
/// into a `BlockTimeWindow`.
#[derive(Debug, Clone, Default)]
pub struct SlotTimestampSample {
    timestamps: HashMap<Slot, UnixTimestamp>,
}

impl SlotTimestampSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the timestamp for `slot`, replacing any earlier value.
    pub fn record(&mut self, slot: Slot, timestamp: UnixTimestamp) {
        self.timestamps.insert(slot, timestamp);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get(&self, slot: Slot) -> Option<UnixTimestamp> {
        self.timestamps.get(&slot).copied()
    }

    /// Sort the sample newest-first.
    pub fn into_window(self) -> BlockTimeWindow {
        let mut entries: Vec<(Slot, UnixTimestamp)> = self.timestamps.into_iter().collect();
        entries.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        BlockTimeWindow { entries }
    }
}

impl FromIterator<(Slot, UnixTimestamp)> for SlotTimestampSample {
    fn from_iter<I: IntoIterator<Item = (Slot, UnixTimestamp)>>(iter: I) -> Self {
        Self {
            timestamps: iter.into_iter().collect(),
        }
    }
}

/// `(slot, timestamp)` pairs sorted by descending slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTimeWindow {
    entries: Vec<(Slot, UnixTimestamp)>,
}

impl BlockTimeWindow {
    pub fn entries(&self) -> &[(Slot, UnixTimestamp)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time deltas between strictly adjacent slots, newest pair first.
    ///
    /// Pairs whose slot numbers differ by more than one span a gap and are
    /// skipped. At most `limit` deltas are returned.
    pub fn consecutive_deltas(&self, limit: usize) -> Vec<i64> {
        self.entries
            .windows(2)
            .filter(|pair| pair[0].0 == pair[1].0 + 1)
            .map(|pair| pair[0].1 - pair[1].1)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(stake: u64) -> VoteAccount {
        VoteAccount {
            vote_pubkey: "vote".to_string(),
            node_pubkey: "node".to_string(),
            activated_stake: stake,
            commission: 10,
        }
    }

    #[test]
    fn test_census_total_is_sum() {
        for (active, delinquent) in [(0, 0), (1, 0), (0, 7), (1_912, 63)] {
            let census = ValidatorCensus::new(active, delinquent);
            assert_eq!(
                census.total_count(),
                census.active_count() + census.delinquent_count()
            );
        }
    }

    #[test]
    fn test_census_from_sets() {
        let sets = ValidatorSets {
            current: vec![account(5), account(6), account(7)],
            delinquent: vec![account(1)],
        };
        let census = ValidatorCensus::from(&sets);
        assert_eq!(census.active_count(), 3);
        assert_eq!(census.delinquent_count(), 1);
        assert_eq!(census.total_count(), 4);
        assert_eq!(sets.total_activated_stake(), 19);
    }

    #[test]
    fn test_window_sorted_descending() {
        let sample: SlotTimestampSample = [(10, 100), (12, 102), (11, 101)].into_iter().collect();
        let window = sample.into_window();
        let slots: Vec<Slot> = window.entries().iter().map(|e| e.0).collect();
        assert_eq!(slots, vec![12, 11, 10]);
    }

    #[test]
    fn test_gap_pairs_are_excluded() {
        // Slot 98 is missing: the 99 -> 97 pair must not contribute.
        let sample: SlotTimestampSample =
            [(100, 1_000), (99, 999), (97, 990), (96, 989)].into_iter().collect();
        let deltas = sample.into_window().consecutive_deltas(10);
        assert_eq!(deltas, vec![1, 1]);
    }

    #[test]
    fn test_deltas_respect_limit() {
        let sample: SlotTimestampSample = (0..10u64).map(|s| (s, s as i64 * 2)).collect();
        let deltas = sample.into_window().consecutive_deltas(4);
        assert_eq!(deltas, vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_record_overwrites_duplicate_slot() {
        let mut sample = SlotTimestampSample::new();
        sample.record(5, 50);
        sample.record(5, 51);
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.get(5), Some(51));
    }
}
